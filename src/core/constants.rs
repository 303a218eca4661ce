// Playfield (world units, origin top-left, y grows downward)
pub const PLAYFIELD_WIDTH: f64 = 800.0;
pub const PLAYFIELD_HEIGHT: f64 = 600.0;
pub const GROUND_BAND_HEIGHT: f64 = 60.0;

// Bird
pub const BIRD_X: f64 = 150.0;
pub const BIRD_WIDTH: f64 = 50.0;
pub const BIRD_HEIGHT: f64 = 40.0;
pub const GRAVITY: f64 = 0.6;
pub const LIFT: f64 = -12.0;

/// Shrinks the bird box on every side before pipe tests.
pub const HITBOX_INSET: f64 = 8.0;

// Pipes
pub const PIPE_WIDTH: f64 = 80.0;
pub const PIPE_SPAWN_INTERVAL: u64 = 100;
/// Gap top is drawn uniformly from [0, height * SPLIT_FACTOR].
pub const PIPE_SPLIT_FACTOR: f64 = 0.45;

// Progression
pub const INITIAL_GAME_SPEED: f64 = 2.0;
pub const GAME_SPEED_STEP: f64 = 1.0;
pub const INITIAL_GAP: f64 = 180.0;
pub const GAP_STEP: f64 = 20.0;
pub const MIN_GAP: f64 = 100.0;
pub const LEVEL_THRESHOLDS: [u32; 2] = [10, 25];

// Animation
pub const ANIM_CADENCE_TICKS: u64 = 5;
pub const ANIM_FRAMES: u32 = 3;

// Real-time stepping
pub const STEP_MS: u64 = 16; // ~60 ticks per second
pub const MAX_FRAME_MS: u64 = 100;

// High score table
pub const HIGH_SCORE_SLOTS: usize = 10;

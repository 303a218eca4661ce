//! Tunable simulation parameters.
//!
//! Every field has a default matching the classic game, so a JSON config file
//! only needs to list the values it overrides.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Difficulty profiles. Each one picks a spawn cadence, starting speed and gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Novice,
    Apprentice,
    Journeyman,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Apprentice,
        Difficulty::Journeyman,
        Difficulty::Master,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Difficulty::Novice)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Apprentice => "Apprentice",
            Self::Journeyman => "Journeyman",
            Self::Master => "Master",
        }
    }

    /// Ticks between pipe spawns.
    pub fn spawn_interval(&self) -> u64 {
        match self {
            Self::Novice => 100,
            Self::Apprentice => 100,
            Self::Journeyman => 95,
            Self::Master => 90,
        }
    }

    /// Pipe speed at level 1, in units per tick.
    pub fn initial_speed(&self) -> f64 {
        match self {
            Self::Novice => 2.0,
            Self::Apprentice => 2.0,
            Self::Journeyman => 2.5,
            Self::Master => 3.0,
        }
    }

    /// Vertical clearance at level 1.
    pub fn initial_gap(&self) -> f64 {
        match self {
            Self::Novice => 180.0,
            Self::Apprentice => 160.0,
            Self::Journeyman => 160.0,
            Self::Master => 140.0,
        }
    }
}

/// What happens when the bird reaches the top of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CeilingPolicy {
    /// y is clamped to 0; never terminal.
    #[default]
    Clamp,
    /// The bird may leave the top of the screen freely.
    Ignore,
    /// Contact with y <= 0 ends the run.
    Terminal,
}

impl CeilingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Ignore => "ignore",
            Self::Terminal => "terminal",
        }
    }
}

impl FromStr for CeilingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "ignore" => Ok(Self::Ignore),
            "terminal" => Ok(Self::Terminal),
            other => Err(format!(
                "unknown ceiling policy '{other}' (expected clamp, ignore or terminal)"
            )),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let expected = "novice, apprentice, journeyman or master";
                format!("unknown difficulty '{s}' (expected {expected})")
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
    pub ground_band: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            ground_band: GROUND_BAND_HEIGHT,
        }
    }
}

impl Playfield {
    /// y coordinate of the top of the ground band.
    pub fn ground_line(&self) -> f64 {
        self.height - self.ground_band
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdConfig {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub gravity: f64,
    /// Velocity assigned on flap (negative = upward).
    pub lift: f64,
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            gravity: GRAVITY,
            lift: LIFT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeConfig {
    pub width: f64,
    pub spawn_interval: u64,
    pub split_factor: f64,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            width: PIPE_WIDTH,
            spawn_interval: PIPE_SPAWN_INTERVAL,
            split_factor: PIPE_SPLIT_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingConfig {
    pub initial_speed: f64,
    pub speed_step: f64,
    pub initial_gap: f64,
    pub gap_step: f64,
    /// Leveling never shrinks the gap below this.
    pub min_gap: f64,
    /// Score values that advance the level, strictly increasing.
    /// `thresholds[n]` moves the run from level n + 1 to n + 2.
    pub thresholds: Vec<u32>,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            initial_speed: INITIAL_GAME_SPEED,
            speed_step: GAME_SPEED_STEP,
            initial_gap: INITIAL_GAP,
            gap_step: GAP_STEP,
            min_gap: MIN_GAP,
            thresholds: LEVEL_THRESHOLDS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestepConfig {
    pub step_ms: u64,
    /// Upper bound on the wall-clock delta consumed per frame.
    pub max_frame_ms: u64,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            step_ms: STEP_MS,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub cadence_ticks: u64,
    pub frames: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            cadence_ticks: ANIM_CADENCE_TICKS,
            frames: ANIM_FRAMES,
        }
    }
}

/// Full simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub playfield: Playfield,
    pub bird: BirdConfig,
    pub pipes: PipeConfig,
    pub leveling: LevelingConfig,
    pub hitbox_inset: f64,
    pub ceiling: CeilingPolicy,
    pub timestep: TimestepConfig,
    pub animation: AnimationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Novice,
            playfield: Playfield::default(),
            bird: BirdConfig::default(),
            pipes: PipeConfig::default(),
            leveling: LevelingConfig::default(),
            hitbox_inset: HITBOX_INSET,
            ceiling: CeilingPolicy::default(),
            timestep: TimestepConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Default config with the profile's spawn cadence, speed and gap applied.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let mut config = Self::default();
        config.apply_difficulty(difficulty);
        config
    }

    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.pipes.spawn_interval = difficulty.spawn_interval();
        self.leveling.initial_speed = difficulty.initial_speed();
        self.leveling.initial_gap = difficulty.initial_gap();
    }

    /// Reject configurations that would produce a non-physical playfield.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.playfield;
        if field.width <= 0.0 || field.height <= 0.0 || field.ground_band < 0.0 {
            return Err(ConfigError::NonPositive("playfield"));
        }
        if field.ground_band >= field.height {
            return Err(ConfigError::GroundBandTooTall {
                ground_band: field.ground_band,
                height: field.height,
            });
        }
        if self.bird.width <= 0.0 || self.bird.height <= 0.0 {
            return Err(ConfigError::NonPositive("bird size"));
        }
        if self.pipes.width <= 0.0 {
            return Err(ConfigError::NonPositive("pipe width"));
        }
        if self.pipes.spawn_interval == 0 {
            return Err(ConfigError::NonPositive("pipe spawn interval"));
        }
        if !(self.pipes.split_factor > 0.0 && self.pipes.split_factor <= 1.0) {
            return Err(ConfigError::SplitFactorOutOfRange(self.pipes.split_factor));
        }

        let leveling = &self.leveling;
        if leveling.initial_speed <= 0.0 {
            return Err(ConfigError::NonPositive("initial game speed"));
        }
        if leveling.speed_step < 0.0 {
            return Err(ConfigError::NegativeStep("speed step"));
        }
        if leveling.gap_step < 0.0 {
            return Err(ConfigError::NegativeStep("gap step"));
        }
        if leveling.min_gap <= 0.0 {
            return Err(ConfigError::NonPositive("minimum gap"));
        }
        if leveling.min_gap > leveling.initial_gap {
            return Err(ConfigError::MinGapAboveInitial {
                min_gap: leveling.min_gap,
                initial_gap: leveling.initial_gap,
            });
        }
        let highest_top = field.height * self.pipes.split_factor;
        if highest_top + leveling.initial_gap > field.ground_line() {
            return Err(ConfigError::GapDoesNotFit {
                lowest_bottom: highest_top + leveling.initial_gap,
                ground_line: field.ground_line(),
            });
        }
        let mut previous = 0;
        for &threshold in &leveling.thresholds {
            if threshold <= previous {
                return Err(ConfigError::ThresholdsNotIncreasing(leveling.thresholds.clone()));
            }
            previous = threshold;
        }

        let inset = self.hitbox_inset;
        if inset < 0.0 || inset * 2.0 >= self.bird.width.min(self.bird.height) {
            return Err(ConfigError::InsetTooLarge(inset));
        }
        if self.timestep.step_ms == 0 {
            return Err(ConfigError::NonPositive("step size"));
        }
        if self.animation.frames == 0 || self.animation.cadence_ticks == 0 {
            return Err(ConfigError::NonPositive("animation cadence"));
        }
        Ok(())
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive(&'static str),
    /// Leveling must never ease the game.
    NegativeStep(&'static str),
    GroundBandTooTall { ground_band: f64, height: f64 },
    SplitFactorOutOfRange(f64),
    MinGapAboveInitial { min_gap: f64, initial_gap: f64 },
    GapDoesNotFit { lowest_bottom: f64, ground_line: f64 },
    ThresholdsNotIncreasing(Vec<u32>),
    InsetTooLarge(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive(what) => write!(f, "{what} must be positive"),
            Self::NegativeStep(what) => write!(f, "{what} must not be negative"),
            Self::GroundBandTooTall {
                ground_band,
                height,
            } => write!(
                f,
                "ground band {ground_band} leaves no sky in a playfield {height} tall"
            ),
            Self::SplitFactorOutOfRange(k) => {
                write!(f, "split factor {k} is outside (0, 1]")
            }
            Self::MinGapAboveInitial {
                min_gap,
                initial_gap,
            } => write!(
                f,
                "minimum gap {min_gap} is larger than the initial gap {initial_gap}"
            ),
            Self::GapDoesNotFit {
                lowest_bottom,
                ground_line,
            } => write!(
                f,
                "a gap can reach down to {lowest_bottom}, below the ground line at {ground_line}"
            ),
            Self::ThresholdsNotIncreasing(thresholds) => {
                write!(f, "level thresholds {thresholds:?} are not strictly increasing from 1")
            }
            Self::InsetTooLarge(inset) => {
                write!(f, "hitbox inset {inset} does not leave a bird-sized box")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read a JSON config file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> io::Result<GameConfig> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Like [`load_config`], but a missing file is `Ok(None)`. A file that exists
/// and does not parse is still an error.
pub fn load_config_if_present(path: &Path) -> io::Result<Option<GameConfig>> {
    match load_config(path) {
        Ok(config) => Ok(Some(config)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        for d in Difficulty::ALL {
            assert_eq!(GameConfig::for_difficulty(d).validate(), Ok(()), "{}", d.name());
        }
    }

    #[test]
    fn test_difficulty_from_index() {
        assert_eq!(Difficulty::from_index(0), Difficulty::Novice);
        assert_eq!(Difficulty::from_index(3), Difficulty::Master);
        assert_eq!(Difficulty::from_index(99), Difficulty::Novice);
    }

    #[test]
    fn test_difficulty_spawn_interval_range() {
        for d in Difficulty::ALL {
            assert!((90..=100).contains(&d.spawn_interval()));
        }
    }

    #[test]
    fn test_for_difficulty_applies_profile() {
        let config = GameConfig::for_difficulty(Difficulty::Master);
        assert_eq!(config.difficulty, Difficulty::Master);
        assert_eq!(config.pipes.spawn_interval, 90);
        assert!((config.leveling.initial_speed - 3.0).abs() < f64::EPSILON);
        assert!((config.leveling.initial_gap - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let mut config = GameConfig::default();
        config.leveling.thresholds = vec![10, 10];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdsNotIncreasing(_))
        ));

        config.leveling.thresholds = vec![0, 5];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_min_gap_above_initial() {
        let mut config = GameConfig::default();
        config.leveling.min_gap = 500.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MinGapAboveInitial { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_steps() {
        let mut config = GameConfig::default();
        config.leveling.speed_step = -5.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeStep("speed step"))
        );

        let mut config = GameConfig::default();
        config.leveling.gap_step = -500.0;
        assert_eq!(config.validate(), Err(ConfigError::NegativeStep("gap step")));

        // Flat leveling is allowed.
        let mut config = GameConfig::default();
        config.leveling.speed_step = 0.0;
        config.leveling.gap_step = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_gap_below_ground() {
        let mut config = GameConfig::default();
        config.pipes.split_factor = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_inset() {
        let mut config = GameConfig::default();
        config.hitbox_inset = 20.0; // bird is 40 tall
        assert_eq!(config.validate(), Err(ConfigError::InsetTooLarge(20.0)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "ceiling": "terminal", "bird": { "gravity": 0.4 } }"#)
                .unwrap();
        assert_eq!(config.ceiling, CeilingPolicy::Terminal);
        assert!((config.bird.gravity - 0.4).abs() < f64::EPSILON);
        assert!((config.bird.lift - LIFT).abs() < f64::EPSILON);
        assert_eq!(config.leveling.thresholds, vec![10, 25]);
    }

    #[test]
    fn test_optional_config_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_if_present(&dir.path().join("config.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_optional_config_malformed_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "ceiling": "sideways" }"#).unwrap();
        let err = load_config_if_present(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_optional_config_present_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "difficulty": "Master" }"#).unwrap();
        let loaded = load_config_if_present(&path).unwrap();
        assert_eq!(loaded.map(|c| c.difficulty), Some(Difficulty::Master));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("master".parse::<Difficulty>(), Ok(Difficulty::Master));
        assert_eq!("Novice".parse::<Difficulty>(), Ok(Difficulty::Novice));
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!("TERMINAL".parse::<CeilingPolicy>(), Ok(CeilingPolicy::Terminal));
        assert!("bounce".parse::<CeilingPolicy>().is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NonPositive("pipe width");
        assert_eq!(err.to_string(), "pipe width must be positive");
    }
}

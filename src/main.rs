use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::core::config::{load_config, load_config_if_present};
use flappy::scores::{HighScores, ScoreEntry};
use flappy::ui::{render_flappy, SceneInfo};
use flappy::utils::persistence::save_path;
use flappy::{
    flap, reset, start, tick_flappy, CeilingPolicy, Difficulty, FlappyGame, GameConfig, Phase,
    RenderFrame, TickEvent, TickStatus,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Redraw cadence. The simulation steps on its own fixed timestep.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "flappy", version, about = "Flappy Bird in your terminal")]
struct Cli {
    /// novice, apprentice, journeyman or master
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// JSON config file (defaults to ~/.flappy/config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// clamp, ignore or terminal
    #[arg(long)]
    ceiling: Option<CeilingPolicy>,

    /// Seed for pipe placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write tracing output here (the screen is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

struct Session {
    game: FlappyGame,
    rng: ChaCha8Rng,
    scores: HighScores,
    new_rank: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = resolve_config(&cli)?;
    info!(
        difficulty = config.difficulty.name(),
        ceiling = config.ceiling.name(),
        "starting flappy"
    );

    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut session = Session {
        game: FlappyGame::new(config),
        rng,
        scores: HighScores::load(),
        new_rank: None,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut session);

    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("could not read config {}", path.display()))?,
        None => match save_path("config.json") {
            Ok(path) => load_config_if_present(&path)
                .with_context(|| format!("could not read config {}", path.display()))?
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "no config directory, using defaults");
                GameConfig::default()
            }
        },
    };
    if let Some(difficulty) = cli.difficulty {
        config.apply_difficulty(difficulty);
    }
    if let Some(ceiling) = cli.ceiling {
        config.ceiling = ceiling;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, session: &mut Session) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let view = RenderFrame::capture(&session.game);
        let difficulty = session.game.config.difficulty;
        let info = SceneInfo {
            difficulty: difficulty.name(),
            best: session.scores.best_for(difficulty).map(|e| e.score),
            new_rank: session.new_rank,
        };
        terminal.draw(|frame| {
            let area = frame.size();
            render_flappy(frame, area, &view, &info);
        })?;

        let timeout = FRAME.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => on_flap_key(session),
                    _ => {}
                },
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    on_flap_key(session)
                }
                _ => {}
            }
        }

        let dt_ms = last_tick.elapsed().as_millis() as u64;
        last_tick = Instant::now();
        let outcome = tick_flappy(&mut session.game, dt_ms, &mut session.rng);

        for event in &outcome.events {
            if let TickEvent::LevelUp(level_up) = event {
                info!(level = level_up.level, "level up");
            }
        }
        if let TickStatus::Terminal(collision) = outcome.status {
            let progression = &session.game.progression;
            info!(
                score = progression.score,
                level = progression.level,
                cause = collision.describe(),
                "run over"
            );
            session.new_rank = session.scores.record(ScoreEntry::now(
                progression.score,
                progression.level,
                difficulty,
            ));
            if session.new_rank.is_some() {
                if let Err(e) = session.scores.save() {
                    warn!(error = %e, "could not save high scores");
                }
            }
        }
    }
}

/// One key drives the whole lifecycle: start, flap, then back to the menu.
fn on_flap_key(session: &mut Session) {
    match session.game.phase {
        Phase::Ready => {
            session.new_rank = None;
            start(&mut session.game);
        }
        Phase::Running => {
            flap(&mut session.game);
        }
        Phase::Over(_) => reset(&mut session.game),
    }
}

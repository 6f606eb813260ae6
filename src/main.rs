pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reflex::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::Game,
    game_mode::get_all_modes,
    highscores::{Highscores, LoadOutcome, MAX_ENTRIES},
    input::{self, Command},
    layout::{arena_for, ScreenLayout},
    runtime::{CrosstermEventSource, EventSource, FixedTicker, GameEvent, Runner, Ticker},
};

/// reflex-training target shooter with local leaderboards
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Click circular targets as fast as you can. Reaction times are averaged per round and ranked on a per-mode top-10 leaderboard kept on disk."
)]
pub struct Cli {
    /// leaderboard file to read and write
    #[clap(long)]
    scores: Option<PathBuf>,

    /// frame interval in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// print every leaderboard and exit
    #[clap(long)]
    list: bool,
}

impl Cli {
    /// Command-line values win over the config file
    fn apply(&self, mut config: Config) -> Config {
        if let Some(path) = &self.scores {
            config.scores_path = Some(path.clone());
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        config
    }
}

/// Everything the event loop and the renderer share
#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub scores: Highscores,
    pub layout: ScreenLayout,
}

impl App {
    pub fn new(game: Game, scores: Highscores, area: Rect) -> Self {
        let mut app = Self {
            game,
            scores,
            layout: ScreenLayout::new(area),
        };
        app.resize(area);
        app
    }

    pub fn resize(&mut self, area: Rect) {
        self.layout = ScreenLayout::new(area);
        self.game.set_arena(arena_for(area));
    }

    /// Feed one event through; returns false when the player asked to quit
    pub fn on_event(&mut self, event: &GameEvent) -> bool {
        // Every event is a frame, not only idle ticks
        self.game.update();

        match event {
            GameEvent::Tick => {}
            GameEvent::Resize(w, h) => self.resize(Rect::new(0, 0, *w, *h)),
            _ => match input::translate(self.game.screen(), event, &self.layout) {
                Some(Command::Quit) => return false,
                Some(Command::Act(action)) => self.game.handle(action, &mut self.scores),
                None => {}
            },
        }
        true
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.apply(FileConfigStore::new().load());

    if cli.list {
        let (scores, _) = Highscores::load(config.scores_path());
        print!("{}", leaderboards_report(&scores));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(&config, &AppDirs::log_path())?;
    info!("Reflex starting, scores at {:?}", config.scores_path());

    let (scores, outcome) = Highscores::load(config.scores_path());
    match &outcome {
        LoadOutcome::Loaded => info!("Loaded highscores"),
        LoadOutcome::Missing => info!("No highscores yet, starting fresh"),
        LoadOutcome::Defaulted(reason) => warn!("Highscores reset to defaults: {}", reason),
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    let mut app = App::new(Game::new(arena_for(area)), scores, area);

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.tick_rate_ms)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Reflex exiting");
    result
}

fn init_logging(config: &Config, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reflex={}", config.log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;

    Ok(())
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        let event = runner.step();
        if !app.on_event(&event) {
            break;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

/// Plain-text dump of every leaderboard, for `--list`
fn leaderboards_report(scores: &Highscores) -> String {
    let mut out = String::new();
    for (mode, info) in get_all_modes() {
        out.push_str(&format!("{} - Top Scores:\n", info.name));
        for line in ui::leaderboard_text(scores, mode, MAX_ENTRIES).lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}

use std::{
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use mindwell::{
    app::App,
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{AppEvent, ChannelEventSource, EventSource, Runner},
    store::FileSessionStore,
    ui,
};

/// calm terminal wellness companion
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A calm terminal wellness companion: a short check-in quiz, a mood journal, a community board, and a counselor chat that surfaces crisis resources when it hears distress."
)]
pub struct Cli {
    /// milliseconds before the counselor replies
    #[clap(long)]
    reply_delay_ms: Option<u64>,

    /// milliseconds between a reply and the crisis resources popup
    #[clap(long)]
    crisis_delay_ms: Option<u64>,

    /// screen refresh interval in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// only check session expiry at startup instead of while running
    #[clap(long)]
    no_expiry_recheck: bool,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,

    /// directory for the session record, exports and the log file
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

impl Cli {
    /// Overlays command line flags on the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(ms) = self.reply_delay_ms {
            cfg.reply_delay_ms = ms;
        }
        if let Some(ms) = self.crisis_delay_ms {
            cfg.crisis_delay_ms = ms;
        }
        if let Some(ms) = self.tick_rate_ms {
            cfg.tick_rate_ms = ms.max(1);
        }
        if self.no_expiry_recheck {
            cfg.recheck_expiry = false;
        }
        cfg
    }
}

fn init_logging(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    // the terminal belongs to the UI, so logs only go to the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false);
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("MINDWELL_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(AppDirs::data_dir);
    init_logging(&AppDirs::log_path(&data_dir))?;

    let config_store = FileConfigStore::new();
    let config = cli.apply(config_store.load());
    if cli.save_config {
        config_store
            .save(&config)
            .context("failed to save config")?;
    }
    info!(?config, data_dir = %data_dir.display(), "starting");

    let store = FileSessionStore::in_dir(&data_dir);
    let runner = Runner::new(ChannelEventSource::terminal(), config.tick_interval());
    let mut app = App::new(Box::new(store), Arc::new(SystemClock), config, data_dir);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn run_app<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Resize | AppEvent::Tick => {}
            AppEvent::Closed => {
                warn!("terminal input closed");
                return Ok(());
            }
        }
        // timers are checked on every wakeup so steady typing cannot stall a reply
        app.on_tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}

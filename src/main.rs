use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use countdown::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, Ticker, TimerEvent, TimerEventSource},
    widget::KeyOutcome,
    TimerWidget,
};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::info;

/// countdown timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A small countdown timer: type a duration in seconds, set it, then start, pause, resume and reset the countdown."
)]
pub struct Cli {
    /// duration in seconds to set on startup
    #[clap(short = 'd', long)]
    duration: Option<u64>,

    /// how often the screen polls for input, in milliseconds
    #[clap(long = "tick-ms", value_parser = clap::value_parser!(u64).range(1..=1000))]
    tick_ms: Option<u64>,

    /// write logs to this file (defaults to the state dir when COUNTDOWN_LOG is set)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// use this config file instead of the platform default
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// store the effective settings in the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Flags win over whatever the config file says
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.duration {
            config.initial_duration = Some(secs);
        }
        if let Some(ms) = self.tick_ms {
            config.poll_interval_ms = ms;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(path.clone()),
            None if std::env::var_os(logging::LOG_ENV).is_some() => AppDirs::log_path(),
            None => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let store = cli.config_store();
    let settings = cli.apply(store.load());
    if cli.save_config {
        store
            .save(&settings)
            .with_context(|| format!("saving config to {}", store.path().display()))?;
    }

    if let Some(path) = cli.log_path() {
        logging::init(&path, logging::env_filter(logging::DEFAULT_FILTER))
            .with_context(|| format!("opening log file {}", path.display()))?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    info!(?settings, "starting");

    enable_raw_mode().context("enabling raw mode")?;
    let mut terminal = or_restore(enter_terminal(), disable_raw_mode)?;

    let mut widget = settings
        .initial_duration
        .map(TimerWidget::with_duration)
        .unwrap_or_default();
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(settings.poll_interval_ms)),
    );

    let result = start_tui(&mut terminal, &mut widget, &runner);
    widget.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Runs `restore` when terminal setup failed, so raw mode is not left on
fn or_restore<T>(
    setup: io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> anyhow::Result<T> {
    setup.or_else(|err| {
        let _ = restore();
        Err(anyhow::Error::new(err).context("setting up terminal"))
    })
}

fn start_tui<B: Backend, E: TimerEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    widget: &mut TimerWidget,
    runner: &Runner<E, T>,
) -> anyhow::Result<()> {
    terminal.draw(|f| ui(widget, f))?;

    loop {
        let event = runner.step_until(widget.countdown.next_due());
        let now = Instant::now();

        let mut redraw = widget.on_tick(now) > 0;
        match event {
            TimerEvent::Tick => {}
            TimerEvent::Resize => redraw = true,
            TimerEvent::Key(key) => match widget.handle_key(key, now) {
                KeyOutcome::Quit => break,
                KeyOutcome::Handled => redraw = true,
                KeyOutcome::Ignored => {}
            },
        }

        if redraw {
            terminal.draw(|f| ui(widget, f))?;
        }
    }

    Ok(())
}

fn ui(widget: &TimerWidget, f: &mut Frame) {
    let area = f.area();
    f.render_widget(widget, area);
    if let Some(position) = widget.cursor_position(area) {
        f.set_cursor_position(position);
    }
}

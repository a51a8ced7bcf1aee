use std::{
    error::Error,
    io::{self, stdin, Stdout},
    path::PathBuf,
    process,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keytally::{
    app::{run as run_app, App},
    config::{Config, ConfigStore, FileConfigStore},
    error::{KeytallyError, Result as KtResult},
    logging, observer,
    runtime::{ChannelEventSource, FixedTicker, Runner, TerminalReader},
    sampler::sample_interval_from_ms,
    ui::charting::format_duration,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

/// count the letters you type anywhere and chart your typing speed live
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Counts alphabetic key presses system-wide and charts the running letter count and typing speed (characters per minute, idle gaps over 10s excluded). Start, stop and reset with F1/F2/F3 or by clicking the buttons."
)]
pub struct Cli {
    /// milliseconds between samples on the charts (overrides the config file)
    #[clap(short = 'i', long)]
    sample_interval_ms: Option<u64>,

    /// config file to use instead of the platform default
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings to the config file and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }

    /// File settings with command line overrides applied
    fn resolve(&self, mut config: Config) -> Config {
        if let Some(ms) = self.sample_interval_ms {
            config.sample_interval_ms = ms;
        }
        config
    }
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> KtResult<Tui> {
    enable_raw_mode().map_err(|e| KeytallyError::TerminalInit(e.to_string()))?;

    let mut stdout = io::stdout();
    undo_on_err(
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture),
        disable_raw_mode,
    )?;

    undo_on_err(Terminal::new(CrosstermBackend::new(stdout)), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        disable_raw_mode()
    })
}

/// A failed setup step leaves the shell in raw mode unless `undo` runs first
fn undo_on_err<T>(step: io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> KtResult<T> {
    step.map_err(|e| {
        if let Err(undo_err) = undo() {
            error!(error = %undo_err, "could not undo terminal setup");
        }
        KeytallyError::TerminalInit(e.to_string())
    })
}

fn restore_terminal(terminal: &mut Tui) -> KtResult<()> {
    disable_raw_mode().map_err(|e| KeytallyError::TerminalCleanup(e.to_string()))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| KeytallyError::TerminalCleanup(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| KeytallyError::TerminalCleanup(e.to_string()))
}

/// Listener failures are the one thing the app cannot run without.
fn exit_on_listener_error(err: KeytallyError) -> ! {
    error!(error = %err, "cannot observe keyboard");
    eprintln!("error: {err}");
    eprintln!(
        "hint: keytally needs a reachable display server (X11 on Linux) and permission to \
         monitor input (macOS: Privacy & Security > Input Monitoring / Accessibility)"
    );
    process::exit(1);
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = cli.config_store();
    let file_config = store.load().unwrap_or_else(|e| {
        eprintln!("Warning: {e} ({}), using defaults", store.path().display());
        Config::default()
    });
    let config = cli.resolve(file_config);

    if cli.write_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(&config.log_filter);
    let interval = sample_interval_from_ms(config.sample_interval_ms);
    info!(sample_interval_ms = interval.as_millis() as u64, "keytally starting");

    let (tx, events) = ChannelEventSource::new();
    let hook = observer::spawn(tx.clone()).unwrap_or_else(|e| exit_on_listener_error(e));

    let mut terminal = setup_terminal()?;
    let mut reader = TerminalReader::spawn(tx);
    let mut runner = Runner::new(events, FixedTicker::new(interval));
    let mut app = App::new();

    let result = run_app(&mut terminal, &mut app, &mut runner);

    // the hook must go quiet before the UI is torn down
    hook.stop();
    reader.stop();
    restore_terminal(&mut terminal)?;
    result?;

    if let Some(msg) = app.observer_error.take() {
        exit_on_listener_error(KeytallyError::Listener(msg));
    }

    let metrics = app.metrics();
    info!(
        letter_count = metrics.letter_count,
        speed_cpm = metrics.speed_cpm,
        "keytally exiting"
    );
    println!(
        "{} letters, {} CPM over {} of active typing",
        metrics.letter_count,
        metrics.speed_cpm as u64,
        format_duration(metrics.active_duration)
    );

    Ok(())
}

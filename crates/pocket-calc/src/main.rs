//! Pocket Calc command-line entry point
//!
//! ## Usage
//!
//! ```bash
//! pocket-calc                          # Interactive terminal calculator
//! pocket-calc --theme deep-ocean       # Start with another theme
//! pocket-calc --keys '1200*3{Enter}'   # Scripted: prints 3,600
//! pocket-calc --no-persist --log-file calc.log --log-level debug
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use pocket_calc::config::{AppConfig, ConfigError};
use pocket_calc::core::Calculator;
use pocket_calc::storage::{FileStorage, Persistence};
use pocket_calc::theme::Theme;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Four-function pocket calculator
#[derive(Debug, Parser)]
#[command(name = "pocket-calc", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(long, value_name = "FILE", env = "POCKET_CALC_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for saved history and theme
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Theme to use when none is saved
    #[arg(long, value_name = "ID")]
    theme: Option<String>,

    /// Do not load or save history and theme
    #[arg(long)]
    no_persist: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Press these keys, print the display and exit
    #[arg(long, value_name = "KEYS")]
    keys: Option<String>,
}

/// Errors that end the process
#[derive(Debug, Error)]
enum AppError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal or log file failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid combination of arguments
    #[error("{0}")]
    Usage(String),
}

type AppResult<T> = Result<T, AppError>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_logging(cli.log_file.as_deref(), &config.log_level)?;
    info!(?config, "starting");

    let persistence = open_persistence(&config);
    match cli.keys.as_deref() {
        Some(script) => {
            println!("{}", run_keys(persistence, &config, script));
            Ok(())
        }
        None => interactive::run(persistence, &config),
    }
}

/// Config file first, then flags
fn build_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(theme) = &cli.theme {
        if Theme::find(theme).is_none() {
            let known: Vec<_> = Theme::all().iter().map(|t| t.id).collect();
            return Err(AppError::Usage(format!(
                "unknown theme '{theme}' (expected one of: {})",
                known.join(", ")
            )));
        }
        config = config.with_theme(theme);
    }
    if cli.no_persist {
        config = config.with_persist(false);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level);
    }
    Ok(config)
}

/// Logs go to a file only; the terminal belongs to the UI
fn init_logging(log_file: Option<&Path>, default_level: &str) -> AppResult<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_persistence(config: &AppConfig) -> Persistence {
    if !config.persist {
        return Persistence::in_memory();
    }
    match config.storage_dir() {
        Some(dir) => {
            info!(dir = %dir.display(), "using file storage");
            Persistence::new(FileStorage::new(dir))
        }
        None => {
            warn!("no data directory available, state will not be saved");
            Persistence::in_memory()
        }
    }
}

fn run_keys(mut persistence: Persistence, config: &AppConfig, script: &str) -> String {
    let theme = persistence.load_theme_or(config.default_theme());
    let mut calculator =
        Calculator::with_history(persistence.load_history()).with_separator(config.grouping);
    let before = calculator.history().clone();

    let display = pocket_calc::run_script(&mut calculator, script);
    if *calculator.history() != before {
        persistence.save(calculator.history(), theme);
    }
    display
}

#[cfg(feature = "tui")]
mod interactive {
    use std::io;

    use crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
            MouseEvent, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use pocket_calc::config::AppConfig;
    use pocket_calc::storage::Persistence;
    use pocket_calc::tui::{hit_test, render, AppLayout, CalculatorApp, InputHandler, Panel};
    use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};

    use super::AppResult;

    pub(super) fn run(persistence: Persistence, config: &AppConfig) -> AppResult<()> {
        let app = CalculatorApp::with_persistence(persistence, config.default_theme())
            .with_separator(config.grouping);

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = run_app(&mut terminal, app);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: CalculatorApp) -> AppResult<()> {
        let input_handler = InputHandler::new();

        while !app.should_quit() {
            terminal.draw(|f| render(&app, f))?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = input_handler.handle_key(key, app.panel());
                    app.handle_action(action);
                }
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) if app.panel() == Panel::Keypad => {
                    let size = terminal.size()?;
                    let layout = AppLayout::new(Rect::new(0, 0, size.width, size.height));
                    if let Some(index) = hit_test(app.keypad(), layout.keypad, column, row) {
                        app.click(index);
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(not(feature = "tui"))]
mod interactive {
    use pocket_calc::config::AppConfig;
    use pocket_calc::storage::Persistence;

    use super::{AppError, AppResult};

    pub(super) fn run(_persistence: Persistence, _config: &AppConfig) -> AppResult<()> {
        Err(AppError::Usage(
            "built without the `tui` feature; use --keys".to_string(),
        ))
    }
}

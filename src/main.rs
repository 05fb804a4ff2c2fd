//! # Python Template Gallery Entry Point
//!
//! A terminal gallery of small interactive programs. Each template pairs a
//! short Python script with an input form; pressing Enter runs the script's
//! `run(...)` function through a Python 3 interpreter and shows the result.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive gallery
//! pygallery
//!
//! # Use a specific interpreter and a 5 second call limit
//! pygallery --python /usr/bin/python3.12 --timeout 5
//!
//! # List templates and exit
//! pygallery --list
//!
//! # Run one form template without the TUI
//! pygallery --run add 12 30
//! pygallery --run stats "4, 8, 15, 16, 23, 42"
//! ```
//!
//! ## Startup
//!
//! 1. The registry is validated (duplicate ids abort startup)
//! 2. The terminal switches to the alternate screen
//! 3. Interpreter initialization starts in the background; the status pill
//!    moves from `Loading Python…` to `Python Ready` (or the footer shows
//!    the failure)
//! 4. Templates are built the first time they are opened
//!
//! ## Key Bindings
//!
//! ### Sidebar
//! - `q` / `Q` - Quit the application
//! - `j` / `Down` - Move highlight down
//! - `k` / `Up` - Move highlight up
//! - `Enter` / `l` - Open the highlighted template
//! - `Tab` - Focus the open template
//! - `t` - Cycle theme
//! - `i` - Show/hide info modal
//!
//! ### Template
//! - `Enter` - Run
//! - `Tab` / `Shift+Tab` - Next/previous field
//! - `Ctrl+R` - New game (hangman)
//! - `Esc` - Return focus to the sidebar
//!
//! `Ctrl+C` quits from anywhere.

use pygallery::bridge::{Bridge, PythonLoader, RuntimeStatus};
use pygallery::shell::{registry, validate_registry, Shell};
use pygallery::templates::{self, catalog, CallRequest, FormTemplate, TemplateUnit};
use pygallery::ui::config::Config;
use pygallery::ui::theme::Theme;
use pygallery::ui::{self, App, AppEvent};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing_subscriber::EnvFilter;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Python Template Gallery - run small Python programs from your terminal
#[derive(Parser, Debug)]
#[command(name = "pygallery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A terminal gallery of interactive Python templates", long_about = None)]
struct Args {
    /// Python 3 executable to use (overrides the config file)
    #[arg(long, value_name = "PATH")]
    python: Option<PathBuf>,

    /// Seconds a single script call may run, 0 for no limit (overrides the config file)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the template registry and exit
    #[arg(long, conflicts_with = "run")]
    list: bool,

    /// Run one form template without the TUI and print its result
    #[arg(long, value_name = "ID")]
    run: Option<String>,

    /// Field values for --run, in form order (defaults to the form's initial values)
    #[arg(value_name = "ARGS", requires = "run", allow_hyphen_values = true)]
    values: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

async fn run_application(args: Args) -> Result<()> {
    validate_registry(registry()).context("Invalid template registry")?;

    if args.list {
        print_registry();
        return Ok(());
    }

    let mut config = Config::load();
    let python = args
        .python
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.python));
    let call_timeout = match args.timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.call_timeout(),
    };
    let bridge = Arc::new(Bridge::new(Arc::new(PythonLoader::new(python, call_timeout))));

    if let Some(id) = args.run.as_deref() {
        let output = run_headless(&bridge, id, &args.values).await?;
        println!("{}", output);
        return Ok(());
    }

    let theme = Theme::by_name(&config.theme)
        .unwrap_or_else(Theme::default_theme)
        .clone();
    let mut app = App::new(Shell::new(registry()), theme);

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_initialize(&bridge, &tx);

    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(
        &mut terminal,
        &mut app,
        &bridge,
        (&tx, &mut rx),
        &mut event_reader,
        &mut config,
    )
    .await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

fn print_registry() {
    for d in registry() {
        let kind = if catalog::form_spec(d.id).is_some() {
            "form"
        } else {
            "interactive"
        };
        println!("{:<12} {} {:<12} ({})", d.id, d.icon, d.label, kind);
    }
}

/// Initialize the interpreter, then run a single form template.
async fn run_headless(bridge: &Bridge, id: &str, values: &[String]) -> Result<String> {
    let spec = catalog::form_spec(id).with_context(|| {
        if registry().iter().any(|d| d.id == id) {
            format!("Template '{}' is interactive and cannot be run with --run", id)
        } else {
            format!("Unknown template '{}' (see --list)", id)
        }
    })?;

    let mut form = FormTemplate::new(spec);
    if !values.is_empty() {
        form.set_values(values)?;
    }

    bridge
        .initialize(&|_: RuntimeStatus| {})
        .await
        .context("Failed to start Python")?;

    templates::drive(&mut form, bridge).await;
    match form.output().error() {
        Some(e) => anyhow::bail!("{}", e),
        None => Ok(form.output().success().unwrap_or_default().to_string()),
    }
}

/// Start interpreter initialization in the background, reporting progress
/// as [`AppEvent`]s.
fn spawn_initialize(bridge: &Arc<Bridge>, tx: &UnboundedSender<AppEvent>) {
    let bridge = Arc::clone(bridge);
    let tx = tx.clone();
    tokio::spawn(async move {
        let status_tx = tx.clone();
        let observer = move |status: RuntimeStatus| {
            let _ = status_tx.send(AppEvent::Status(status));
        };
        if let Err(e) = bridge.initialize(&observer).await {
            let _ = tx.send(AppEvent::InitFailed(e.to_string()));
        }
    });
}

/// Run a template's call in the background; the outcome comes back as
/// [`AppEvent::CallFinished`] for the same unit, visible or not.
fn spawn_call(
    bridge: &Arc<Bridge>,
    tx: &UnboundedSender<AppEvent>,
    unit_id: &'static str,
    request: CallRequest,
) {
    let bridge = Arc::clone(bridge);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = bridge.call(request.script, &request.args).await;
        if let Err(e) = &outcome {
            tracing::debug!("'{}' call failed: {}", unit_id, e);
        }
        let _ = tx.send(AppEvent::CallFinished { unit_id, outcome });
    });
}

/// Apply every pending background event to the app.
fn drain_events(app: &mut App, bridge: &Bridge, rx: &mut UnboundedReceiver<AppEvent>) {
    while let Ok(event) = rx.try_recv() {
        if event == AppEvent::Status(RuntimeStatus::Ready) {
            app.runtime_name = bridge.describe();
        }
        app.apply_event(event);
    }
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    bridge: &Arc<Bridge>,
    (tx, rx): (&UnboundedSender<AppEvent>, &mut UnboundedReceiver<AppEvent>),
    event_reader: &mut dyn EventReader,
    config: &mut Config,
) -> Result<()> {
    loop {
        drain_events(app, bridge, rx);

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Short poll while anything is in flight so results show promptly
        let busy = app.runtime_status == RuntimeStatus::Loading
            || app.shell.active_unit().is_some_and(|unit| unit.is_running());
        let poll_timeout = if busy {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        let Some(event) = event_reader.read_event(poll_timeout)? else {
            continue;
        };

        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let theme_before = app.theme.name;
            if let Some((unit_id, request)) = app.handle_key(key) {
                spawn_call(bridge, tx, unit_id, request);
            }

            if app.theme.name != theme_before {
                config.theme = app.theme.name.to_string();
                if let Err(e) = config.save() {
                    tracing::warn!("failed to save config: {:#}", e);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod data;
mod events;
mod poller;
mod sim;
mod timer;
mod ui;
mod view;

use api::ApiClient;
use app::App;
use config::Settings;
use data::duration::parse_duration;
use poller::Poller;
use view::DashboardState;

#[derive(Parser, Debug)]
#[command(name = "sagin-monitor")]
#[command(about = "Terminal dashboard for monitoring a PQ-Tor testbed over SAGIN links")]
struct Args {
    /// Base URL of the monitoring API [default: http://localhost:8080/api]
    #[arg(short, long)]
    api: Option<String>,

    /// Poll interval (e.g., "5s", "2500ms") [default: 5s]
    #[arg(short, long)]
    interval: Option<String>,

    /// Per-request timeout (e.g., "4s") [default: 4s]
    #[arg(long)]
    timeout: Option<String>,

    /// Path to a TOML config file (defaults to ./sagin-monitor.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start in demo mode
    #[arg(long)]
    demo: bool,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run one poll cycle, export the dashboard state to JSON and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    if let Some(ref log_file) = settings.log_file {
        init_tracing(log_file)?;
    }

    let rt = Runtime::new()?;
    let client = ApiClient::new(&settings.api_base, settings.request_timeout)?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_once(&rt, &client, export_path);
    }

    let poller = Poller::new(Arc::new(client), settings.poll_interval);
    run_tui(&rt, poller, &settings)
}

/// Merge command-line flags over file and environment settings.
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;

    if let Some(ref api) = args.api {
        settings.api_base = api.clone();
    }
    if let Some(ref interval) = args.interval {
        settings.poll_interval =
            parse_duration(interval).with_context(|| format!("Invalid --interval: {}", interval))?;
        if settings.poll_interval.is_zero() {
            anyhow::bail!("--interval must be greater than zero");
        }
    }
    if let Some(ref timeout) = args.timeout {
        settings.request_timeout =
            parse_duration(timeout).with_context(|| format!("Invalid --timeout: {}", timeout))?;
        if settings.request_timeout.is_zero() {
            anyhow::bail!("--timeout must be greater than zero");
        }
    }
    if args.demo {
        settings.demo_on_start = true;
    }
    if args.log_file.is_some() {
        settings.log_file = args.log_file.clone();
    }

    Ok(settings)
}

/// Send tracing output to a file; the terminal belongs to the TUI.
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Run a single cycle and write the resulting dashboard state.
fn export_once(rt: &Runtime, client: &ApiClient, export_path: &Path) -> Result<()> {
    let outcome = rt.block_on(poller::run_cycle(client));

    let mut state = DashboardState::new();
    data::updater::apply_outcome(&mut state, &outcome);
    app::write_export(&state, export_path)?;

    println!("Exported dashboard state to: {}", export_path.display());
    if let Some(err) = outcome.first_error() {
        eprintln!("Warning: {}", err);
    }
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(rt: &Runtime, poller: Poller, settings: &Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app, start polling and the local timers
    let mut app = App::new(poller, settings, ui::Theme::auto_detect());
    app.start(rt.handle());
    info!(api = %settings.api_base, "dashboard started");

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    app.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Apply finished cycles and fire due timers
        app.tick(Instant::now());
    }

    Ok(())
}

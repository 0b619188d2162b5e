// SPDX-License-Identifier: MIT
#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod analysis;
mod api;
mod report;
mod session;
mod tui;
mod upload;

use std::io::{self, IsTerminal, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use num_format::{Locale, ToFormattedString};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::client::{BackendClient, DEFAULT_BASE_URL, RadarApi};
use crate::api::types::{SessionStats, render_value};
use crate::session::{POLL_INTERVAL, RecordingSession, SessionState, format_elapsed};
use crate::tui::app::App;
use crate::tui::input::{Action, handle_key};
use crate::upload::SelectedFile;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(10);
const HEADLESS_STATUS_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(
    name = "somnoscope",
    about = "somnoscope: sleep radar monitor and analysis client"
)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live recording dashboard
    Monitor {
        /// Serial port the radar is attached to
        #[arg(short, long, default_value = "COM14")]
        port: String,
        /// Recording duration in seconds
        #[arg(short, long, default_value = "60")]
        duration: u64,
    },
    /// Record without the TUI (headless)
    Record {
        /// Serial port the radar is attached to
        #[arg(short, long, default_value = "COM14")]
        port: String,
        /// Recording duration in seconds
        #[arg(short, long, default_value = "60")]
        duration: u64,
    },
    /// Upload a CSV capture for sleep-stage analysis
    Analyze { file: PathBuf },
    /// Fetch current session statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = BackendClient::new(&cli.url);

    match cli.command {
        Commands::Monitor { port, duration } => cmd_monitor(&client, &cli.url, port, duration),
        Commands::Record { port, duration } => cmd_record(&client, &port, duration),
        Commands::Analyze { file } => cmd_analyze(&client, &file),
        Commands::Stats => cmd_stats(&client),
    }
}

// ---------------------------------------------------------------------------
// Signal handling
// ---------------------------------------------------------------------------

fn install_signal_handler() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown))
        .context("failed to register SIGINT handler")?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&shutdown))
        .context("failed to register SIGTERM handler")?;
    Ok(shutdown)
}

// ---------------------------------------------------------------------------
// Terminal setup / teardown
// ---------------------------------------------------------------------------

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Monitor subcommand
// ---------------------------------------------------------------------------

fn cmd_monitor(client: &BackendClient, base_url: &str, port: String, duration: u64) -> Result<()> {
    let shutdown = install_signal_handler()?;
    let mut terminal = setup_terminal()?;
    let mut app = App::new(base_url.to_string(), port, duration);

    let result = run_monitor_loop(&shutdown, client, &mut app, &mut terminal);

    // Don't leave the backend recording when the dashboard goes away.
    if app.session.is_recording() {
        let _ = app.session.stop(client);
    }
    restore_terminal(&mut terminal)?;
    result
}

fn run_monitor_loop(
    shutdown: &Arc<AtomicBool>,
    client: &BackendClient,
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<()> {
    loop {
        if shutdown.load(Ordering::Relaxed) || app.should_quit {
            break;
        }

        if event::poll(EVENT_POLL_TIMEOUT).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match handle_key(key.code) {
                Action::ToggleRecording => app.toggle_recording(client, Instant::now()),
                action => app.handle_action(&action),
            }
        }

        app.session.tick(client, Instant::now());

        terminal
            .draw(|f| app.render(f))
            .context("failed to draw frame")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Record (headless) subcommand
// ---------------------------------------------------------------------------

fn cmd_record(client: &BackendClient, port: &str, duration: u64) -> Result<()> {
    let shutdown = install_signal_handler()?;
    let mut session = RecordingSession::new();
    session.start(client, port, duration, Instant::now())?;

    eprintln!("Recording on {port} for {duration} s ...");
    let mut last_status = Instant::now();

    loop {
        if shutdown.load(Ordering::Relaxed) {
            eprintln!("\nInterrupted.");
            session.stop(client)?;
            break;
        }

        session.tick(client, Instant::now());
        if matches!(session.state(), SessionState::Idle) {
            eprintln!("\nDuration limit reached.");
            break;
        }

        if last_status.elapsed() >= HEADLESS_STATUS_INTERVAL {
            print_recording_status(&session);
            last_status = Instant::now();
        }

        std::thread::sleep(POLL_INTERVAL);
    }

    if let Some(status) = &session.status {
        eprintln!("{status}");
    }
    print_stats(&session.stats);
    Ok(())
}

fn print_recording_status(session: &RecordingSession) {
    let current = session
        .current_value
        .map_or_else(|| "--".to_string(), |v| format!("{v:.2} mm"));
    eprintln!(
        "  [{}] {} points, current {current}",
        format_elapsed(session.elapsed),
        session.point_count().to_formatted_string(&Locale::en),
    );
}

fn print_stats(stats: &SessionStats) {
    println!("Statistics:");
    println!("  mean: {}", render_value(&stats.mean));
    println!("  min:  {}", render_value(&stats.min));
    println!("  max:  {}", render_value(&stats.max));
    println!("  std:  {}", render_value(&stats.std));
}

// ---------------------------------------------------------------------------
// Analyze subcommand
// ---------------------------------------------------------------------------

fn cmd_analyze(client: &BackendClient, file: &Path) -> Result<()> {
    let selected = SelectedFile::open(file)?;
    eprintln!(
        "Analyzing {} ({}) ...",
        selected.name,
        selected.size_display()
    );

    let result = client.predict(&selected.name, &selected.content)?;

    let mut stdout = io::stdout();
    let color = stdout.is_terminal();
    report::print_report(&mut stdout, &result, color)
}

// ---------------------------------------------------------------------------
// Stats subcommand
// ---------------------------------------------------------------------------

fn cmd_stats(client: &BackendClient) -> Result<()> {
    let stats = client.stats()?;
    print_stats(&stats);
    Ok(())
}

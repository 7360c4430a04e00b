// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod config;
mod events;
mod sim;
mod ui;

use app::{App, View};
use config::Settings;
use sim::duration::parse_duration;
use sim::{Responder, VitalsBoard, Ward};
use ui::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeChoice {
    Auto,
    Light,
    Dark,
}

#[derive(Parser, Debug)]
#[command(name = "wardwatch")]
#[command(about = "Clinical ward dashboard TUI with simulated vitals, beds and an assistant console")]
struct Args {
    /// Interval between reading-card updates (e.g., "3s", "500ms")
    #[arg(long)]
    card_refresh: Option<String>,

    /// Interval between chart window rolls (e.g., "30s", "1m")
    #[arg(long)]
    chart_refresh: Option<String>,

    /// Delay before a mock assistant reply is delivered (e.g., "2s")
    #[arg(long)]
    reply_delay: Option<String>,

    /// Seed for the simulation; a fixed seed reproduces the whole session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Path to a wardwatch.toml settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export a generated snapshot to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;

    let log_file = args
        .log_file
        .clone()
        .or_else(|| settings.log_file.as_ref().map(PathBuf::from));
    init_logging(log_file.as_deref())?;

    let card_refresh = resolve_duration(&args.card_refresh, &settings.card_refresh, "3s")?;
    let chart_refresh = resolve_duration(&args.chart_refresh, &settings.chart_refresh, "30s")?;
    let reply_delay = resolve_duration(&args.reply_delay, &settings.reply_delay, "2s")?;
    let seed = args.seed.or(settings.seed);
    let theme = resolve_theme(args.theme, settings.theme.as_deref());

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_snapshot(seed, &export_path);
    }

    // Background runtime for the assistant's delayed replies; the TUI
    // keeps the main thread.
    let rt = tokio::runtime::Runtime::new()?;
    let responder = Responder::new(rt.handle().clone(), reply_delay);
    let mut app = App::new(seed, responder, theme);

    run_tui(&mut app, card_refresh, chart_refresh)
}

/// Effective interval: CLI flag, then config file, then built-in default.
fn resolve_duration(
    cli: &Option<String>,
    configured: &Option<String>,
    default: &str,
) -> Result<Duration> {
    match cli.as_deref().or(configured.as_deref()) {
        Some(text) => parse_duration(text),
        None => parse_duration(default),
    }
}

fn resolve_theme(cli: Option<ThemeChoice>, configured: Option<&str>) -> Theme {
    let choice = cli.unwrap_or(match configured {
        Some("light") => ThemeChoice::Light,
        Some("dark") => ThemeChoice::Dark,
        _ => ThemeChoice::Auto,
    });

    match choice {
        ThemeChoice::Light => Theme::light(),
        ThemeChoice::Dark => Theme::dark(),
        ThemeChoice::Auto => Theme::auto_detect(),
    }
}

/// Set up file logging when a log path is configured.
///
/// Without a path no subscriber is installed and tracing calls are no-ops.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI with the resolved refresh intervals
fn run_tui(app: &mut App, card_refresh: Duration, chart_refresh: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, app, card_refresh, chart_refresh);

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

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    card_refresh: Duration,
    chart_refresh: Duration,
) -> Result<()> {
    let mut last_card_tick = Instant::now();
    let mut last_chart_tick = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    area.height.min(5),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(12),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with ward overview
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Vitals => ui::vitals::render(frame, app, chunks[2]),
                View::Beds => ui::beds::render(frame, app, chunks[2]),
                View::Assistant => ui::assistant::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render bed detail overlay if active
            if app.show_bed_detail {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Deliver any due assistant replies
        app.poll_replies();

        // Walk the reading cards periodically
        if last_card_tick.elapsed() >= card_refresh {
            app.tick_cards();
            last_card_tick = Instant::now();
        }

        // Roll the chart window periodically
        if last_chart_tick.elapsed() >= chart_refresh {
            app.tick_chart();
            last_chart_tick = Instant::now();
        }
    }

    Ok(())
}

/// Export a freshly generated snapshot to a JSON file without starting
/// the TUI.
fn export_snapshot(seed: Option<u64>, export_path: &Path) -> Result<()> {
    use std::io::Write;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let now = Local::now();
    let board = VitalsBoard::new(&mut rng, now);
    let ward = Ward::generate(&mut rng, now);

    let export = serde_json::json!({
        "exported_at": now.to_rfc3339(),
        "ward": {
            "stats": ward.stats(),
            "beds": ward.beds,
        },
        "vitals": {
            "readings": board.readings,
            "chart": board.chart,
        },
    });

    let json = serde_json::to_string_pretty(&export)?;
    let mut file = std::fs::File::create(export_path)?;
    file.write_all(json.as_bytes())?;

    println!("Exported ward snapshot to: {}", export_path.display());
    Ok(())
}

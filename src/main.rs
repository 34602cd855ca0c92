mod app;
mod clock;
mod domain;
mod input;
mod persistence;
mod report;
mod ticker;
mod ui;

use anyhow::Result;
use app::{AppState, UiMode};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Timeline, TimelineConfig};
use persistence::{
    data_file, ensure_timebar_dir, init_local_timebar, load_markers, snapshot_file_name,
    today_data_file, write_snapshot, RemoteClient,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "timebar")]
#[command(about = "A terminal day timeline: split your day with draggable markers and see where the hours went", long_about = None)]
struct Cli {
    /// Wall-clock hour at the left edge of the bar
    #[arg(long, default_value_t = 2.0)]
    day_start: f64,

    /// Hours spanned by the bar (use 26 for the overlapping-night variant)
    #[arg(long, default_value_t = 24.0)]
    day_length: f64,

    /// Base URL of the persistence server, e.g. http://localhost:5000
    #[arg(long)]
    server: Option<String>,

    /// Shared secret for the server (otherwise asked for in the app)
    #[arg(long)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .timebar directory in the current directory
    Init,
    /// Generate a daily report with block and category statistics
    Report {
        /// Date to generate report for (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to ~/.timebar/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Export a day's markers as a dated snapshot file
    Export {
        /// Date to export (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to ./timebar_data_YYYY-MM-DD.json
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn parse_date(date: Option<String>) -> Result<chrono::NaiveDate> {
    match date {
        Some(date_str) => chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.day_length <= 0.0 || !cli.day_length.is_finite() {
        anyhow::bail!("--day-length must be a positive number of hours");
    }
    if !cli.day_start.is_finite() {
        anyhow::bail!("--day-start must be a finite hour");
    }
    let config = TimelineConfig::new(cli.day_start, cli.day_length);

    match cli.command {
        Some(Commands::Init) => {
            let timebar_dir = init_local_timebar()?;
            println!("Initialized timebar directory: {}", timebar_dir.display());
            println!();
            println!("Timebar will now use this local directory for marker storage.");
            println!("Run 'timebar' to start splitting your day.");
            Ok(())
        }
        Some(Commands::Report { date, output }) => {
            let report_date = parse_date(date)?;
            let output_path = output.map(PathBuf::from);

            println!("Generating report for {}...", report_date);
            let report_path = report::generate_report(Some(report_date), output_path, config)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::Export { date, output }) => {
            let export_date = parse_date(date)?;
            let records = load_markers(data_file(export_date)?)?;

            let output_path = output
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(snapshot_file_name(export_date)));
            write_snapshot(&output_path, &records)?;
            println!(
                "Exported {} markers to {}",
                records.len(),
                output_path.display()
            );
            Ok(())
        }
        None => run_tui(&cli, config),
    }
}

fn run_tui(cli: &Cli, config: TimelineConfig) -> Result<()> {
    // Ensure timebar directory exists
    ensure_timebar_dir()?;

    let data_path = today_data_file()?;
    eprintln!("Using data file: {}", data_path.display());

    let remote = match &cli.server {
        Some(url) => Some(RemoteClient::new(url)?),
        None => None,
    };

    // Restore markers: remote first when reachable, local as the fallback
    // source (and always the fallback when the remote day is empty).
    let mut records = Vec::new();
    let mut loaded_remote = false;
    if let (Some(client), Some(password)) = (&remote, &cli.password) {
        match client.load_markers(password) {
            Ok(remote_records) if !remote_records.is_empty() => {
                eprintln!("Loaded {} markers from server", remote_records.len());
                records = remote_records;
                loaded_remote = true;
            }
            Ok(_) => {}
            Err(e) => eprintln!("Warning: remote load failed ({}); using local data", e),
        }
    }
    if !loaded_remote {
        records = load_markers(&data_path)?;
    }

    let mut timeline = Timeline::new(config);
    timeline.restore(records.iter().map(|r| (r.position, r.content.as_str())));

    let mut app = AppState::new(timeline, data_path, remote, cli.password.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    app.release_drag();
    app.save_now();

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Check for midnight crossing - the data file is per-day, so force
        // a restart rather than silently writing yesterday's file.
        if app.has_day_changed() && app.ui_mode != UiMode::DayChanged {
            app.release_drag();
            app.save_now();
            app.ui_mode = UiMode::DayChanged;
        }

        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    // If day changed, only allow quit
                    if app.ui_mode == UiMode::DayChanged {
                        if key.code == event::KeyCode::Char('q') || key.code == event::KeyCode::Esc
                        {
                            return Ok(());
                        }
                        continue;
                    }

                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Tick: clock pointer, debounced saves, status expiry, remote events
        app.tick();
    }
}

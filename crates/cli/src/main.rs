mod settings;

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use fluency_core::pipeline::session_driver::{DriverMessage, SessionDriver};
use fluency_core::pipeline::session_logger::StdoutSessionLogger;
use fluency_core::session::infrastructure::event_script::{parse_line, read_events};
use fluency_core::shared::constants::TICK_PERIOD;
use fluency_core::{Session, SessionEvent, SessionStatus, SessionSummary};

use settings::Settings;

const MAX_EDIT_DISTANCE_LIMIT: usize = 3;
const MAX_RESYNC_WINDOW: usize = 20;

/// Replays a scripted oral reading session and reports fluency metrics.
#[derive(Parser)]
#[command(name = "fluency")]
struct Cli {
    /// Reference passage (plain text).
    passage: PathBuf,

    /// Event script: one JSON event per line (start, pause, resume, stop,
    /// tick, transcript). Use `-` to read events live from stdin, with the
    /// clock ticking once per second.
    events: PathBuf,

    /// Settings file (JSON). Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference words the aligner may skip to resynchronize (0 disables).
    #[arg(long)]
    resync_window: Option<usize>,

    /// Largest edit distance accepted as the same word.
    #[arg(long)]
    max_edit_distance: Option<usize>,

    /// Disable Soundex matching.
    #[arg(long)]
    no_phonetic: bool,

    /// Print every status update as a JSON line.
    #[arg(long)]
    trace: bool,

    /// Print the final result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = apply_overrides(Settings::load(cli.config.as_deref())?, &cli);
    let passage = fs::read_to_string(&cli.passage)?;
    let session = Session::with_config(&passage, settings.alignment)?;
    log::info!(
        "Loaded passage with {} reference words",
        session.total_reference_words()
    );

    let live = is_stdin(&cli.events);
    let logger = StdoutSessionLogger::new(settings.progress_throttle_words);
    let driver = SessionDriver::spawn(
        session,
        Box::new(logger),
        live.then_some(TICK_PERIOD),
    );

    if live {
        for (idx, line) in io::stdin().lock().lines().enumerate() {
            let Some(event) = parse_line(&line?, idx + 1)? else {
                continue;
            };
            let stopping = event == SessionEvent::Stop;
            driver.send(event)?;
            report(driver.messages().try_iter(), cli.trace)?;
            if stopping {
                break;
            }
        }
    } else {
        let events = read_events(&cli.events)?;
        log::info!("Replaying {} events", events.len());
        for event in events {
            driver.send(event)?;
        }
    }

    let messages = driver.messages().clone();
    let session = driver.finish()?;
    report(messages.try_iter(), cli.trace)?;

    match session.summary() {
        Some(summary) if cli.json => println!("{}", serde_json::to_string_pretty(&summary)?),
        Some(summary) => print_summary(&summary),
        None => {
            log::warn!("Event stream ended without stopping the session");
            let status = session.status();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }

    Ok(())
}

fn report(
    messages: impl Iterator<Item = DriverMessage>,
    trace: bool,
) -> Result<(), serde_json::Error> {
    for message in messages {
        match message {
            DriverMessage::Status(status) if trace => {
                println!("{}", serde_json::to_string(&status)?);
            }
            DriverMessage::Rejected(reason) => eprintln!("Warning: {reason}"),
            _ => {}
        }
    }
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(window) = cli.resync_window {
        settings.alignment.resync_window = window;
    }
    if let Some(distance) = cli.max_edit_distance {
        settings.alignment.policy.max_edit_distance = distance;
    }
    if cli.no_phonetic {
        settings.alignment.policy.phonetic = false;
    }
    settings
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.passage.exists() {
        return Err(format!("Passage file not found: {}", cli.passage.display()).into());
    }
    if !is_stdin(&cli.events) && !cli.events.exists() {
        return Err(format!("Event script not found: {}", cli.events.display()).into());
    }
    if let Some(distance) = cli.max_edit_distance {
        if distance > MAX_EDIT_DISTANCE_LIMIT {
            return Err(format!(
                "Max edit distance must be between 0 and {MAX_EDIT_DISTANCE_LIMIT}, got {distance}"
            )
            .into());
        }
    }
    if let Some(window) = cli.resync_window {
        if window > MAX_RESYNC_WINDOW {
            return Err(format!(
                "Resync window must be between 0 and {MAX_RESYNC_WINDOW}, got {window}"
            )
            .into());
        }
    }
    Ok(())
}

fn print_status(status: &SessionStatus) {
    let m = &status.metrics;
    println!("State:          {}", status.state);
    println!("Cursor:         {}", status.cursor_position);
    println!("Words read:     {}", m.words_read);
    println!("Speed:          {} wpm", m.reading_speed_wpm);
    println!("Miscues:        {}", m.miscues);
    println!("Accuracy:       {:.0}%", m.accuracy_percent);
    println!("Elapsed:        {}s", m.elapsed_seconds);
}

fn print_summary(summary: &SessionSummary) {
    let m = &summary.metrics;
    println!("Words read:     {}/{}", m.words_read, summary.total_reference_words);
    println!("Speed:          {} wpm", m.reading_speed_wpm);
    println!("Miscues:        {}", m.miscues);
    println!("Accuracy:       {:.0}%", m.accuracy_percent);
    println!("Elapsed:        {}s", m.elapsed_seconds);
    println!(
        "Updates:        {} ({} final)",
        summary.updates_applied, summary.final_updates
    );
    if !summary.missed_words.is_empty() {
        let missed: Vec<_> = summary
            .missed_words
            .iter()
            .map(|w| w.display_text.as_str())
            .collect();
        println!("Missed:         {}", missed.join(" "));
    }
}

//! Bitcoin SV Vanity Address Generator CLI
//!
//! Usage:
//!   bsv_vanity ZUKU                      # JSON result for one prefix
//!   bsv_vanity ZUKU,BSV,GKS              # wallet files for several prefixes
//!   bsv_vanity "ZUKU; BSV; GKS" 50000    # status every 50,000 tries

use std::io::{self, IsTerminal};
use std::process;

use clap::Parser;
use tracing::warn;

use bsv_vanity::app::{run_multi, run_single};
use bsv_vanity::matcher::{difficulty_description, estimated_attempts, is_base58};
use bsv_vanity::report::{clear_screen, ConsoleReporter, ReportStyle};
use bsv_vanity::sink::to_pretty_json;
use bsv_vanity::{
    Config, JsonFileSink, Mode, SearchEngine, SearchError, Secp256k1Provider, SinkError,
    StopHandle,
};

/// Conventional exit status after SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Error setting Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Cannot determine output directory: {0}")]
    OutputDir(#[source] io::Error),

    #[error("Failed to encode result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Unsaved(String),
}

fn main() {
    let config = Config::parse();

    if let Err(e) = bsv_vanity::logging::init(&config.log_level) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    match run(&config) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_INTERRUPTED),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` if the user interrupted the search.
fn run(config: &Config) -> Result<bool, CliError> {
    let prefixes = config.prefix_list();
    for prefix in prefixes.iter().filter(|p| !is_base58(p)) {
        warn!(
            prefix = %prefix,
            "prefix contains characters outside the Base58 alphabet (0, O, I, l); it can never match"
        );
    }

    let engine = SearchEngine::new(Secp256k1Provider::new(), config.search_config());
    ctrlc_handler(engine.stop_handle())?;

    match config.mode() {
        Mode::Single => single(&engine, &prefixes[0]),
        Mode::Multi => multi(config, &engine, &prefixes),
    }
}

fn single(engine: &SearchEngine<Secp256k1Provider>, prefix: &str) -> Result<bool, CliError> {
    // Status goes to stderr so stdout carries only the JSON result.
    let mut reporter = ConsoleReporter::new(io::stderr(), ReportStyle::Inline);
    let run = run_single(engine, prefix, &mut reporter)?;

    match run.result {
        Some(result) => {
            println!("{}", to_pretty_json(&result)?);
            Ok(true)
        }
        None => {
            eprintln!("Stopped by user.");
            Ok(false)
        }
    }
}

fn multi(
    config: &Config,
    engine: &SearchEngine<Secp256k1Provider>,
    prefixes: &[String],
) -> Result<bool, CliError> {
    let color = io::stdout().is_terminal();
    if color && !config.no_clear {
        let _ = clear_screen(&mut io::stdout());
    }
    print_header(prefixes, engine.config().workers, color);

    let mut sink = JsonFileSink::new(config.output_dir().map_err(CliError::OutputDir)?)?;
    let mut reporter = ConsoleReporter::new(io::stdout(), ReportStyle::Lines).with_color(color);
    let run = run_multi(engine, prefixes, &config.name, &mut reporter, &mut sink)?;

    if !run.outcome.is_completed() {
        if let Some(notice) = run.unsaved_notice() {
            eprintln!("Warning: {}", notice);
        }
        println!("Stopped by user.");
        return Ok(false);
    }
    match run.unsaved_notice() {
        Some(notice) => Err(CliError::Unsaved(notice)),
        None => Ok(true),
    }
}

fn print_header(prefixes: &[String], workers: usize, color: bool) {
    let title = format!(
        "bsv_vanity v{} - BSV Vanity Generator: key/address pairs for the given vanity prefixes",
        env!("CARGO_PKG_VERSION")
    );
    if color {
        println!("\x1b[47m\x1b[30m{}\x1b[0m", title);
    } else {
        println!("{}", title);
    }
    println!();
    println!("Workers:    {}", workers);
    for prefix in prefixes {
        println!(
            "Prefix:     1{} ({})",
            prefix,
            difficulty_description(estimated_attempts(prefix))
        );
    }
    println!();
}

fn ctrlc_handler(stop: StopHandle) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || stop.stop())
}

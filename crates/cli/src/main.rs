//! Round-robin scheduling simulator CLI.
//!
//! This binary loads a workload file, simulates it under round-robin with the
//! quantum given on the command line, and reports:
//! 1. **Averages:** `Average waiting time` and `Average response time`, two decimals each.
//! 2. **Per-process table:** Response, wait, and end time of every process (`--processes`).
//! 3. **JSON report:** Averages and outcomes as one JSON document (`--json`).
//!
//! Every failure prints a diagnostic to stderr, prints nothing to stdout, and
//! exits with an errno-style status.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rrsim_core::common::{Quantum, Ticks};
use rrsim_core::config::{Config, ReportFormat};
use rrsim_core::sim::{SchedEvent, Simulator, loader};
use rrsim_core::stats::{self, Report, ScheduleStats};
use rrsim_core::{Result, SimError};

#[derive(Parser, Debug)]
#[command(
    name = "rrsim",
    author,
    version,
    about = "Round-robin CPU scheduling simulator",
    long_about = "Simulate round-robin scheduling of a fixed workload on one CPU and report the average waiting and response times.\n\nThe workload file holds the process count followed by `pid arrival burst` for each process, as decimal integers separated by any non-digit characters.\n\nExamples:\n  rrsim processes.txt 3\n  rrsim processes.txt 2 --processes\n  rrsim processes.txt 4 --json --trace"
)]
struct Cli {
    /// Workload file to simulate.
    input: PathBuf,

    /// Quantum length in ticks (decimal digits only).
    #[arg(allow_hyphen_values = true)]
    quantum: String,

    /// JSON configuration file; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Print one line per process after the averages.
    #[arg(long)]
    processes: bool,

    /// Print every tick's scheduling events to stderr.
    #[arg(long)]
    trace: bool,
}

impl Cli {
    /// Layers command-line flags over a loaded configuration.
    fn apply(&self, config: &mut Config) {
        if self.json {
            config.report.format = ReportFormat::Json;
        }
        if self.processes {
            config.report.per_process = true;
        }
        if self.trace {
            config.general.trace_ticks = true;
        }
    }
}

/// One line of the JSON tick trace.
#[derive(Serialize)]
struct TraceRecord<'a> {
    tick: Ticks,
    #[serde(flatten)]
    event: &'a SchedEvent,
}

fn main() {
    init_tracing();

    let code = match run() {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(kind = e.kind(), "run failed");
            eprintln!("rrsim: {e}");
            e.exit_code()
        }
    };
    process::exit(code);
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Parses arguments, converting malformed command lines into usage errors.
///
/// Help and version requests print and exit successfully as usual.
fn parse_cli() -> Result<Cli> {
    Cli::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
        _ => SimError::Usage(e.to_string().trim_end().to_string()),
    })
}

/// Loads, simulates, and reports. Nothing reaches stdout unless every step succeeds.
fn run() -> Result<()> {
    let cli = parse_cli()?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);

    let workload = loader::load_workload(&cli.input)?;
    let quantum: Quantum = cli.quantum.parse()?;
    let simulator = Simulator::new(&workload, quantum)?;

    let format = config.report.format;
    let schedule = if config.general.trace_ticks {
        simulator.run_with(|tick, events| trace_tick(tick, events, format))
    } else {
        simulator.run()
    };
    let stats = ScheduleStats::from_schedule(&schedule)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        ReportFormat::Text => {
            stats
                .write_summary(&mut out, config.report.precision)
                .map_err(SimError::Output)?;
            if config.report.per_process {
                stats::write_process_table(&mut out, &schedule).map_err(SimError::Output)?;
            }
        }
        ReportFormat::Json => {
            let json = Report::new(&stats, &schedule).to_json()?;
            writeln!(out, "{json}").map_err(SimError::Output)?;
        }
    }
    out.flush().map_err(SimError::Output)
}

/// Writes one tick's events to stderr.
fn trace_tick(tick: Ticks, events: &[SchedEvent], format: ReportFormat) {
    let stderr = io::stderr();
    let mut err = stderr.lock();
    for event in events {
        let _ = match format {
            ReportFormat::Text => writeln!(err, "t={tick}: {event}"),
            ReportFormat::Json => serde_json::to_string(&TraceRecord { tick, event })
                .map_err(io::Error::from)
                .and_then(|line| writeln!(err, "{line}")),
        };
    }
}

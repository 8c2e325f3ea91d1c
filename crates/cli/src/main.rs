//! Round-robin dispatch simulator CLI.
//!
//! This binary runs one simulation. It performs:
//! 1. **Configuration:** Optional JSON config, overridden by the positional `N QUANTUM P`
//!    parameters and flags, validated before anything is loaded.
//! 2. **Loading:** Reads the creation-order file and every process file it names.
//! 3. **Run:** Writes one trace line per dispatch cycle to `OUTPUT` and prints the final
//!    preemption count on stdout.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=info` (or `debug`) to see
//! load progress, I/O events, and dispatch decisions.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rrsim_core::config::Config;
use rrsim_core::sim::trace::WriterSink;
use rrsim_core::stats::STATS_SECTIONS;
use rrsim_core::{SimError, SimResult, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "rrsim",
    author,
    version,
    about = "Preemptive round-robin dispatch simulator",
    long_about = "Simulate a round-robin dispatcher over processes described as opcode tapes.\n\nEach process file lists one opcode per line: I (compute), ES (I/O wait), F (finish attempt).\nThe creation-order file lists `<arrival> <basename>` per line; the first entry is the dispatcher itself.\n\nExamples:\n  rrsim 3 5 4 Procesos salida.txt\n  rrsim 2 4 1 Procesos salida.txt --seed 7 --stats\n  rrsim 3 5 4 Procesos salida.txt --config sim.json\n\nWith --config, the positional N, QUANTUM and P still take precedence over the file's scheduler values."
)]
struct Cli {
    /// Opcodes executed per dispatch burst.
    n: usize,

    /// Preemption threshold in opcodes per dispatch.
    quantum: usize,

    /// FinishAttempt succeeds with probability 1/P.
    p: u32,

    /// Directory holding `<basename>.txt` process files.
    process_dir: PathBuf,

    /// Trace output file (created or truncated).
    output: PathBuf,

    /// Creation-order file.
    #[arg(long)]
    orders: Option<PathBuf>,

    /// JSON configuration file for seed, dispatch limit, and orders file.
    ///
    /// `N`, `QUANTUM` and `P` are required positionals and always replace the
    /// file's `burst`, `quantum` and `finish_denominator`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for FinishAttempt outcomes (reproducible runs).
    #[arg(long)]
    seed: Option<u64>,

    /// Abort after this many dispatch cycles if processes are still runnable.
    #[arg(long)]
    max_dispatches: Option<u64>,

    /// Print the statistics report after the preemption count.
    #[arg(long)]
    stats: bool,

    /// Restrict the report to these sections (summary, scheduling, processes).
    #[arg(long = "stats-section", value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
    stats_sections: Vec<String>,
}

fn main() {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => fatal(&e),
    };
    init_tracing();

    if let Err(e) = run(&cli) {
        fatal(&e);
    }
}

fn fatal(e: &SimError) -> ! {
    eprintln!("[!] FATAL: {e}");
    process::exit(1);
}

/// Parses the command line. Malformed or missing parameters become
/// [`SimError::Config`]; `--help` and `--version` print and exit normally.
fn parse_cli<I, T>(args: I) -> SimResult<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        if !e.use_stderr() {
            e.exit();
        }
        let rendered = e.to_string();
        let message = rendered
            .lines()
            .take_while(|line| !line.is_empty() && !line.starts_with("Usage"))
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ");
        SimError::Config(message.trim_start_matches("error: ").to_owned())
    })
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Layers CLI values over the optional JSON configuration.
fn build_config(cli: &Cli) -> SimResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    config.scheduler.burst = cli.n;
    config.scheduler.quantum = cli.quantum;
    config.scheduler.finish_denominator = cli.p;
    config.input.process_dir.clone_from(&cli.process_dir);
    if let Some(orders) = &cli.orders {
        config.input.orders_file.clone_from(orders);
    }
    if cli.seed.is_some() {
        config.scheduler.seed = cli.seed;
    }
    if cli.max_dispatches.is_some() {
        config.scheduler.max_dispatches = cli.max_dispatches;
    }

    config.validate()?;
    Ok(config)
}

/// Runs the simulation: config, load, then trace. The output file is only created
/// once every process has loaded.
fn run(cli: &Cli) -> SimResult<()> {
    let config = build_config(cli)?;
    tracing::info!(
        burst = config.scheduler.burst,
        quantum = config.scheduler.quantum,
        p = config.scheduler.finish_denominator,
        orders = %config.input.orders_file.display(),
        "configuration"
    );

    let mut sim = Simulator::new(&config)?;
    let mut sink = WriterSink::create(&cli.output)?;
    let stats = sim.run(&mut sink)?;

    println!("{}", stats.preemptions);
    if cli.stats || !cli.stats_sections.is_empty() {
        stats.print_sections(&cli.stats_sections);
    }
    Ok(())
}

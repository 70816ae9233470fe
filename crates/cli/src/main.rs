//! Tomasulo scheduling simulator CLI.
//!
//! This binary provides a single entry point for running programs through the engine. It performs:
//! 1. **Run:** Load a program (and optionally a JSON config), step it to completion, and print
//!    per-cycle tables or JSON snapshots followed by the timing table and statistics.
//! 2. **Demo:** Run the built-in seven-instruction program on the default architecture.

mod render;

use std::io::Write;
use std::path::PathBuf;
use std::{fs, process};

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tomasulo_core::config::Config;
use tomasulo_core::isa::parse_program;
use tomasulo_core::sim::Snapshot;
use tomasulo_core::stats::STATS_SECTIONS;
use tomasulo_core::{SimError, Simulator};

/// Program run when no `--program` is given.
const DEMO_PROGRAM: &str = "\
# RAW chain through R1 and R4, an independent SUB feeding the DIV,
# and a WAW/WAR pair on R7 and R8.
ADD  R1, R2, R3
ADD  R4, R1, R5
SUB  R6, R7, R8
MULT R9, R4, R10
DIV  R11, R12, R6
MULT R8, R1, R5
MULT R7, R2, R3
";

#[derive(Parser, Debug)]
#[command(
    name = "tomasulo",
    author,
    version,
    about = "Cycle-stepped Tomasulo dynamic scheduling simulator",
    long_about = "Run an arithmetic program through reservation stations, register renaming, and a Common Data Bus.\n\nExamples:\n  tomasulo demo\n  tomasulo run --program prog.s --config machine.json\n  tomasulo run --json --quiet > cycles.jsonl\n  RUST_LOG=debug tomasulo run --program prog.s"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion.
    Run {
        /// Program text file (one `OP Rd, Rs1, Rs2` per line). Defaults to the demo program.
        #[arg(short, long)]
        program: Option<PathBuf>,

        /// JSON machine configuration. Omitted fields take their defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit one JSON snapshot per cycle instead of tables.
        #[arg(long)]
        json: bool,

        /// Suppress per-cycle output; print only the final tables.
        #[arg(short, long)]
        quiet: bool,

        /// Log stage events (same as `RUST_LOG=debug`).
        #[arg(long)]
        trace: bool,

        /// Statistics sections to print. Default: all.
        #[arg(long, num_args = 1.., value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        stats: Vec<String>,
    },

    /// Run the built-in demo program on the default machine.
    Demo,
}

/// Output options for a run.
#[derive(Debug, Default)]
struct Output {
    json: bool,
    quiet: bool,
    stats: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            program,
            config,
            json,
            quiet,
            trace,
            stats,
        } => cmd_run(
            program,
            config,
            trace,
            &Output {
                json,
                quiet,
                stats,
            },
        ),
        Commands::Demo => {
            init_tracing(false);
            run(Config::default(), DEMO_PROGRAM, &Output::default())
        }
    };

    if let Err(e) = result {
        eprintln!("\n[!] {e}");
        let _ = std::io::stdout().flush();
        process::exit(1);
    }
}

/// Installs the `fmt` subscriber. `RUST_LOG` wins over `--trace`.
fn init_tracing(trace: bool) {
    let default = if trace { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the program and config from disk, then runs.
fn cmd_run(
    program: Option<PathBuf>,
    config: Option<PathBuf>,
    trace: bool,
    output: &Output,
) -> Result<(), SimError> {
    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_tracing(trace || config.general.trace);

    let text = match program {
        Some(path) => fs::read_to_string(&path).map_err(|e| SimError::Parse {
            line: 0,
            reason: format!("cannot read {}: {e}", path.display()),
        })?,
        None => DEMO_PROGRAM.to_string(),
    };
    run(config, &text, output)
}

/// Steps `text` to completion on `config`, printing as it goes.
///
/// The final tables and statistics are printed even when the run stops on an
/// error, so a faulting program still shows how far it got.
fn run(config: Config, text: &str, output: &Output) -> Result<(), SimError> {
    let program = parse_program(text)?;
    let mut sim = Simulator::new(&config, program)?;

    if !output.json {
        println!("Configuration:");
        println!(
            "  Stations: add={} mult={} div={}  Latency: add={} mult={} div={}",
            config.stations.add,
            config.stations.mult,
            config.stations.div,
            config.latency.add,
            config.latency.mult,
            config.latency.div
        );
        println!(
            "  Registers: {}  CDB: {:?}  Max cycles: {}",
            config.registers.count,
            config.cdb.policy,
            sim.max_cycles()
        );
        println!();
        println!("[*] Initial state");
        render::print_cycle(&sim.snapshot());
    }

    let result = sim.run_with(|engine| {
        if output.quiet {
            return;
        }
        let snapshot = Snapshot::capture(engine);
        if output.json {
            match snapshot.to_json() {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!("snapshot serialization failed: {e}"),
            }
        } else {
            render::print_cycle(&snapshot);
        }
    });

    if !output.json {
        let last = sim.snapshot();
        println!();
        match &result {
            Ok(cycles) => println!("[*] Completed in {cycles} cycles"),
            Err(_) => println!("[*] Stopped at cycle {}", last.cycle),
        }
        render::print_timings(&last);
        println!();
        render::print_registers(&last);
        sim.engine.stats.print_sections(&output.stats);
    }

    result.map(|_| ())
}

//! Fetch Target Queue model CLI.
//!
//! This binary replays stimulus files through the queue model. It performs:
//! 1. **Run:** Load a JSON stimulus, replay every step, print statistics.
//! 2. **Dump:** Optionally write each step's outputs as JSON lines.
//! 3. **Config:** Print the default configuration as JSON, as a starting point for stimuli.

use std::io::{self, BufWriter, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ftqsim_core::config::Config;
use ftqsim_core::core::units::bru::UpdateLog;
use ftqsim_core::sim::{load_stimulus, replay};

#[derive(Parser, Debug)]
#[command(
    name = "ftqsim",
    author,
    version,
    about = "Fetch Target Queue model",
    long_about = "Replay a JSON stimulus through the fetch target queue model.\n\nExamples:\n  ftqsim run stimuli/redirect.json\n  ftqsim run stimuli/redirect.json --outputs\n  ftqsim config > base.json"
)]
struct Cli {
    /// Enable debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a stimulus file.
    Run {
        /// Stimulus JSON file.
        path: String,

        /// Print each step's outputs as a JSON line.
        #[arg(long)]
        outputs: bool,

        /// Print the training records received by the predictor as JSON lines.
        #[arg(long)]
        updates: bool,
    },

    /// Print the default configuration as JSON.
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            path,
            outputs,
            updates,
        } => cmd_run(&path, outputs, updates),
        Commands::Config => cmd_config(),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Installs the `fmt` subscriber, honouring `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads `path`, replays it and prints statistics.
fn cmd_run(path: &str, outputs: bool, updates: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stimulus = load_stimulus(path)?;
    let cfg = stimulus.config.ftq.clone();

    println!("[*] Stimulus: {path}");
    println!(
        "    entries={} fetch_width={} ghist={} ports={} steps={}",
        cfg.num_entries,
        cfg.fetch_width,
        cfg.ghist_length,
        cfg.lookup_ports,
        stimulus.steps.len()
    );

    let (sim, step_outputs) = replay(stimulus, UpdateLog::default())?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if outputs {
        for o in &step_outputs {
            writeln!(out, "{}", serde_json::to_string(o)?)?;
        }
    }
    if updates {
        for u in &sim.trainer().updates {
            writeln!(out, "{}", serde_json::to_string(u)?)?;
        }
    }
    out.flush()?;
    drop(out);

    sim.stats().print();
    Ok(())
}

/// Prints `Config::default()` as pretty JSON.
fn cmd_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&Config::default())?);
    Ok(())
}

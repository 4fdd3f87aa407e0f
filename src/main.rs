use anyhow::{Context, Result};
use clap::Parser;
use lane_sim::{Params, RunSummary, Simulation};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Simulates a single lane of traffic and writes the trajectory as JSON.
#[derive(Parser, Debug)]
#[command(name = "lane-sim")]
struct Args {
    /// JSON file holding the run parameters; defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of time steps to simulate.
    #[arg(short = 'n', long, default_value_t = 100)]
    steps: usize,

    /// Seed for the velocity jitter.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output file for the trajectory; stdout if omitted.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print a run summary to stderr.
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let params = match &args.config {
        Some(path) => Params::from_json_file(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => Params::default(),
    };

    let mut sim = match args.seed {
        Some(seed) => Simulation::with_seed(params, seed)?,
        None => Simulation::new(params)?,
    };
    sim.run(args.steps);
    let data = sim.into_data();

    match &args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            data.write_json(&mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            data.write_json(&mut writer)?;
            writeln!(writer)?;
        }
    }

    if args.summary {
        let summary = RunSummary::from_data(&data);
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

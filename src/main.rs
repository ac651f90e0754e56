use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use num_bigint::BigInt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hail_and_wires::{
    check, minimum_cut, parse_hail, reference_hail, split, xy_crossings, CutReport,
    PartitionReport, SolveOutcome, StoneReport, System, WireGraph,
};

#[derive(Parser)]
#[command(name = "hail-and-wires")]
#[command(about = "Exact stone-trajectory solver and wiring min-cut splitter")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the stone trajectory that hits every hailstone
    Stone {
        /// Hail records `px, py, pz @ vx, vy, vz`; the built-in reference hail when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Lower bound of the xy test area for path crossings
        #[arg(long, default_value = "200000000000000")]
        area_min: i64,

        /// Upper bound of the xy test area for path crossings
        #[arg(long, default_value = "400000000000000")]
        area_max: i64,
    },
    /// Split a wiring diagram at its minimum cut
    Wires {
        /// Wiring records `node: neighbor neighbor ...`
        #[arg(short, long, default_value = "input/25.txt")]
        input: PathBuf,

        #[arg(long, default_value = "zsj")]
        source: String,

        #[arg(long, default_value = "qln")]
        sink: String,
    },
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn run_stone(input: Option<&Path>, area_min: i64, area_max: i64) -> Result<()> {
    let start = Instant::now();
    let hail = match input {
        Some(path) => {
            let hail = parse_hail(&read(path)?).with_context(|| path.display().to_string())?;
            let crossings = xy_crossings(&hail, &BigInt::from(area_min), &BigInt::from(area_max));
            println!("Crossings: {crossings}");
            hail
        }
        None => reference_hail(),
    };
    let system = System::new(hail);
    let outcome = check(&system);
    info!(elapsed = ?start.elapsed(), "stone solve finished");
    match outcome {
        SolveOutcome::Sat(model) => {
            let report = StoneReport::from_model(&model)
                .ok_or_else(|| anyhow!("model is missing stone unknowns"))?;
            println!("{report}");
            Ok(())
        }
        SolveOutcome::Unsat => {
            warn!("no stone trajectory meets every hailstone");
            Err(anyhow!("stone system is unsatisfiable"))
        }
        SolveOutcome::Unknown(reason) => {
            warn!(%reason, "stone system could not be decided");
            Err(anyhow!("stone system is undecided: {reason}"))
        }
    }
}

fn run_wires(input: &Path, source: &str, sink: &str) -> Result<()> {
    let start = Instant::now();
    let wires = WireGraph::parse(&read(input)?).with_context(|| input.display().to_string())?;

    let cut = minimum_cut(&wires, source, sink)?;
    println!("{}", CutReport(&cut));

    let partition = split(wires)?;
    let report = PartitionReport::new(&partition)?;
    println!("{report}");
    let agree = cut.product() == report.total;
    info!(
        agree,
        elapsed = ?start.elapsed(),
        "wires split finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Stone {
            input,
            area_min,
            area_max,
        } => run_stone(input.as_deref(), area_min, area_max),
        Command::Wires {
            input,
            source,
            sink,
        } => run_wires(&input, &source, &sink),
    }
}

use std::path::Path;

use clap::Parser;
use indicatif::ProgressBar;

mod accumulator;
mod config;
mod datatypes;
mod enumerator;
mod error;
mod evaluator;
mod grid;
mod materials;
mod post_processor;
mod sweep;

use config::{load_config_file, SweepConfig};
use error::{CmutError, Result};

/// Brute-force design sweep of a capacitive micromachined membrane transducer
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// JSON sweep configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Grid samples per dimension axis
    #[arg(short, long)]
    length: Option<usize>,

    /// Membrane materials, comma separated
    #[arg(long, value_delimiter = ',')]
    membranes: Option<Vec<String>>,

    /// Insulator materials, comma separated
    #[arg(long, value_delimiter = ',')]
    insulators: Option<Vec<String>>,

    /// Top electrode metals, comma separated
    #[arg(long, value_delimiter = ',')]
    metals: Option<Vec<String>>,

    /// Lower bound of the target resonant frequency band, Hz (exclusive)
    #[arg(long)]
    band_low: Option<f64>,

    /// Upper bound of the target resonant frequency band, Hz (exclusive)
    #[arg(long)]
    band_high: Option<f64>,

    /// Directory the csv is written to
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Print the material catalog and exit
    #[arg(long)]
    list_materials: bool,
}

/// Applies command-line overrides on top of the file or default config
fn build_config(args: Args) -> Result<SweepConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => SweepConfig::default(),
    };

    if let Some(length) = args.length {
        config.length = length;
    }
    if let Some(membranes) = args.membranes {
        config.membranes = membranes;
    }
    if let Some(insulators) = args.insulators {
        config.insulators = insulators;
    }
    if let Some(metals) = args.metals {
        config.metals = metals;
    }
    if let Some(low) = args.band_low {
        config.target_band.low_hz = low;
    }
    if let Some(high) = args.band_high {
        config.target_band.high_hz = high;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    if args.list_materials {
        materials::print_catalog();
        return Ok(());
    }

    let config = build_config(args)?;

    let output_dir = Path::new(&config.output_dir);
    if !output_dir.is_dir() {
        return Err(CmutError::Output(format!(
            "Output directory {} does not exist",
            output_dir.display()
        )));
    }

    let progress = ProgressBar::new(config.expected_rows()? as u64);
    let table = sweep::run(&config, &progress)?;

    let output = post_processor::output_path(output_dir, &chrono::Local::now());
    post_processor::csv_output(&table, &output)?;

    println!("Outputted to {}", output.display());
    print!("{}", post_processor::summary(&table));
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1)
    }
}

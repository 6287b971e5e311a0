use anyhow::Context;
use better_fpt::utils::{logger, validation::Validate};
use better_fpt::{run_batch, TomlConfig};
use chrono::Local;
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter};

#[derive(Parser)]
#[command(name = "batch-estimate")]
#[command(about = "Estimate every row of a CSV of F0/F1/F2 sizes")]
struct Args {
    /// Path to TOML model configuration
    #[arg(short, long, default_value = "fpt-config.toml")]
    config: String,

    /// CSV with columns item_id,f0,f1,f2,created
    #[arg(short, long)]
    input: String,

    /// Where to write the results CSV
    #[arg(short, long, default_value = "estimates.csv")]
    output: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;
    config.validate().context("Invalid model configuration")?;
    let engine = config.build_engine().context("Failed to load models")?;

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input '{}'", args.input))?;
    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create output '{}'", args.output))?;

    let report = run_batch(
        &engine,
        BufReader::new(input),
        BufWriter::new(output),
        Local::now().naive_local(),
    )?;

    println!(
        "✅ {} of {} rows estimated, results in {}",
        report.succeeded,
        report.total(),
        args.output
    );
    if report.failed > 0 {
        eprintln!("⚠️  {} rows failed, see the status column", report.failed);
        std::process::exit(2);
    }

    Ok(())
}

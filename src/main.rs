use better_fpt::utils::error::EstimatorError;
use better_fpt::utils::{logger, validation::Validate};
use better_fpt::{run_estimate, CliConfig, TomlConfig};
use clap::Parser;

fn fail(e: EstimatorError) -> ! {
    e.log("better-fpt");
    tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

fn main() {
    let args = CliConfig::parse();

    if args.format.as_deref() == Some("json") {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Err(e) = args.validate() {
        fail(e);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = TomlConfig::from_file(&args.config).unwrap_or_else(|e| fail(e));
    if let Err(e) = config.validate() {
        fail(e);
    }

    let request = args.to_request().unwrap_or_else(|e| fail(e));
    let format = args.format.as_deref().unwrap_or_else(|| config.output_format());
    let output = args.output.as_deref().or_else(|| config.output_path());

    match run_estimate(&config, &request, format, output) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => fail(e),
    }
}

pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::config::toml_config::OUTPUT_FORMATS;
    use crate::domain::model::{EstimateRequest, FeatureSizes};
    use crate::utils::error::Result;
    use crate::utils::validation::{parse_date_time, validate_one_of, validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "better-fpt")]
    #[command(about = "Estimate feature cost (mhrs) and turnaround from F0/F1/F2 sizes")]
    pub struct CliConfig {
        /// F0 estimate
        #[arg(long, default_value_t = 0)]
        pub f0: u64,

        /// F1 estimate
        #[arg(long, default_value_t = 0)]
        pub f1: u64,

        /// F2 estimate
        #[arg(long, default_value_t = 0)]
        pub f2: u64,

        #[arg(long, help = "Identifier shown in the summary")]
        pub item_id: Option<String>,

        #[arg(long, help = "Creation date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS), defaults to now")]
        pub created: Option<String>,

        #[arg(short, long, default_value = "fpt-config.toml")]
        pub config: String,

        #[arg(long, help = "Output format: text or json (overrides the config file)")]
        pub format: Option<String>,

        #[arg(short, long, help = "Also write the result to this file")]
        pub output: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn to_request(&self) -> Result<EstimateRequest> {
            let mut request = EstimateRequest::new(FeatureSizes::new(self.f0, self.f1, self.f2));
            if let Some(created) = &self.created {
                request = request.with_created(parse_date_time("created", created)?);
            }
            if let Some(item_id) = self.item_id.as_deref().filter(|id| !id.trim().is_empty()) {
                request = request.with_item_id(item_id);
            }
            Ok(request)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("config", &self.config)?;
            if let Some(format) = &self.format {
                validate_one_of("format", format, &OUTPUT_FORMATS)?;
            }
            if let Some(output) = &self.output {
                validate_path("output", output)?;
            }
            if let Some(created) = &self.created {
                parse_date_time("created", created)?;
            }
            Ok(())
        }
    }

}

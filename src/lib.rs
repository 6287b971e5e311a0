pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::LinearModel;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{batch::run_batch, estimator::EstimationEngine, output::run_estimate};
pub use crate::domain::model::{EstimateRequest, EstimateResult, FeatureSizes};
pub use crate::domain::ports::{FnPredictor, Predictor};
pub use crate::utils::error::{EstimatorError, Result};

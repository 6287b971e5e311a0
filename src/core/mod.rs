pub mod batch;
pub mod estimator;
pub mod output;
pub mod summary;

pub use crate::domain::model::{EstimateRequest, EstimateResult, FeatureSizes};
pub use crate::domain::ports::{FnPredictor, Predictor};
pub use crate::utils::error::Result;

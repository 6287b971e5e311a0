use crate::domain::model::FeatureSizes;
use crate::utils::error::Result;

/// A pre-trained model answering in hours for a set of feature sizes.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureSizes) -> Result<f64>;

    fn name(&self) -> &str;
}

/// Wraps a plain function as a named predictor.
pub struct FnPredictor<F> {
    name: String,
    func: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&FeatureSizes) -> Result<f64> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&FeatureSizes) -> Result<f64> + Send + Sync,
{
    fn predict(&self, features: &FeatureSizes) -> Result<f64> {
        (self.func)(features)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

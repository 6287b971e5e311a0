// Adapters layer: concrete predictor implementations backed by model artifacts.

pub mod linear;

pub use linear::{LinearArtifact, LinearModel};

// Domain layer: request/result models and the predictor port.

pub mod model;
pub mod ports;

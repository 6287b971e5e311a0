use thiserror::Error;
use tracing::Level;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid input '{value}' for '{field}': {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Predictor '{model}' failed: {message}")]
    PredictionError { model: String, message: String },

    #[error("Estimation failed: {reason}")]
    EstimationFailure { reason: String },
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Prediction,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimatorError::ConfigError { .. }
            | EstimatorError::ConfigValidationError { .. }
            | EstimatorError::InvalidConfigValueError { .. }
            | EstimatorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EstimatorError::CsvError(_)
            | EstimatorError::SerializationError(_)
            | EstimatorError::InvalidInputError { .. } => ErrorCategory::Input,
            EstimatorError::PredictionError { .. } | EstimatorError::EstimationFailure { .. } => {
                ErrorCategory::Prediction
            }
            EstimatorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Prediction | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the person at the keyboard. Prediction problems are
    /// never itemised: every cause reads the same.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Prediction => "Sorry, there was a problem".to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read input: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EstimatorError::MissingConfigError { .. } => {
                "Add the missing field to the model configuration file"
            }
            EstimatorError::ConfigError { .. }
            | EstimatorError::ConfigValidationError { .. }
            | EstimatorError::InvalidConfigValueError { .. } => {
                "Check the model configuration file against the documented layout"
            }
            EstimatorError::InvalidInputError { .. } => {
                "F0, F1 and F2 must be non-negative integers and dates YYYY-MM-DD"
            }
            EstimatorError::CsvError(_) => "Check that the input CSV has the item_id,f0,f1,f2,created header",
            EstimatorError::SerializationError(_) => "Check that the model artifact is valid JSON",
            EstimatorError::PredictionError { .. } | EstimatorError::EstimationFailure { .. } => {
                "Check that the model artifacts are present and the inputs are plausible"
            }
            EstimatorError::IoError(_) => "Check file paths and permissions",
        }
    }

    /// Process exit code for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// Prediction causes stay out of user-visible logs.
    pub fn log_level(&self) -> Level {
        match self.category() {
            ErrorCategory::Prediction => Level::DEBUG,
            ErrorCategory::Input => Level::WARN,
            ErrorCategory::Configuration | ErrorCategory::System => Level::ERROR,
        }
    }

    pub fn log(&self, context: &str) {
        let level = self.log_level();
        if level == Level::DEBUG {
            tracing::debug!("{}: {}", context, self);
        } else if level == Level::WARN {
            tracing::warn!("{}: {}", context, self);
        } else {
            tracing::error!(
                "❌ {}: {} (Category: {:?}, Severity: {:?})",
                context,
                self,
                self.category(),
                self.severity()
            );
        }
    }

    pub(crate) fn estimation_failure(reason: impl Into<String>) -> Self {
        EstimatorError::EstimationFailure {
            reason: reason.into(),
        }
    }
}

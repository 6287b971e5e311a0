use crate::adapters::LinearModel;
use crate::core::estimator::EstimationEngine;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_one_of, validate_path,
    validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub estimator: EstimatorInfo,
    pub cost: ModelConfig,
    pub turnaround: ModelConfig,
    pub output: Option<OutputConfig>,

    /// Directory that relative artifact paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorInfo {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// A model is either a JSON artifact on disk or inline coefficients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub artifact: Option<String>,
    pub intercept: Option<f64>,
    pub coefficients: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub path: Option<String>,
}

impl TomlConfig {
    /// Loads a config file; artifact paths resolve against its directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EstimatorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names stay as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("estimator.name", &self.estimator.name)?;
        self.cost.validate_as("cost")?;
        self.turnaround.validate_as("turnaround")?;

        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            validate_one_of("output.format", format, &OUTPUT_FORMATS)?;
        }
        if let Some(path) = self.output.as_ref().and_then(|o| o.path.as_deref()) {
            validate_path("output.path", path)?;
        }

        Ok(())
    }

    pub fn output_format(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .unwrap_or("text")
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    fn resolve(&self, artifact: &str) -> PathBuf {
        let path = Path::new(artifact);
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn load_model(&self, name: &str, model: &ModelConfig) -> Result<LinearModel> {
        match &model.artifact {
            Some(artifact) => LinearModel::from_file(name, self.resolve(artifact)),
            None => {
                let coefficients =
                    validate_required_field(&format!("{}.coefficients", name), &model.coefficients)?;
                LinearModel::from_parts(name, model.intercept.unwrap_or(0.0), coefficients)
            }
        }
    }

    /// A model that cannot be loaded is reported as an estimation failure,
    /// the same as one that fails to predict.
    pub fn build_engine(&self) -> Result<EstimationEngine<LinearModel, LinearModel>> {
        let cost = self.load_model_or_fail("cost", &self.cost)?;
        let turnaround = self.load_model_or_fail("turnaround", &self.turnaround)?;
        tracing::info!(
            "Loaded estimator '{}' {}",
            self.estimator.name,
            self.estimator.version.as_deref().unwrap_or("")
        );
        Ok(EstimationEngine::new(cost, turnaround))
    }

    fn load_model_or_fail(&self, name: &str, model: &ModelConfig) -> Result<LinearModel> {
        self.load_model(name, model).map_err(|e| {
            tracing::debug!("Loading {} model failed: {}", name, e);
            EstimatorError::estimation_failure(format!("{} model unavailable", name))
        })
    }
}

impl ModelConfig {
    fn validate_as(&self, name: &str) -> Result<()> {
        match (&self.artifact, &self.coefficients) {
            (Some(_), Some(_)) => Err(EstimatorError::ConfigValidationError {
                field: name.to_string(),
                message: "use either 'artifact' or inline 'coefficients', not both".to_string(),
            }),
            (Some(artifact), None) => {
                let field = format!("{}.artifact", name);
                validate_path(&field, artifact)?;
                validate_file_extension(&field, artifact, &["json"])
            }
            (None, Some(_)) => Ok(()),
            (None, None) => Err(EstimatorError::MissingConfigError {
                field: format!("{}.artifact or {}.coefficients", name, name),
            }),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FeatureSizes;
    use crate::domain::ports::Predictor;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const INLINE_CONFIG: &str = r#"
[estimator]
name = "feature-cost"
version = "1.0"

[cost]
intercept = 10.0
coefficients = [0.1, 0.05, 0.02]

[turnaround]
coefficients = [0.2, 0.2, 0.08]

[output]
format = "json"
"#;

    #[test]
    fn test_parse_inline_config() {
        let config = TomlConfig::from_toml_str(INLINE_CONFIG).unwrap();

        assert_eq!(config.estimator.name, "feature-cost");
        assert_eq!(config.output_format(), "json");
        assert!(config.validate().is_ok());

        let engine = config.build_engine().unwrap();
        let hours = engine
            .turnaround_predictor()
            .predict(&FeatureSizes::new(500, 500, 500))
            .unwrap();
        assert!((hours - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BETTER_FPT_TEST_MODEL_NAME", "from-env");

        let toml_content = r#"
[estimator]
name = "${BETTER_FPT_TEST_MODEL_NAME}"

[cost]
coefficients = [1.0, 1.0, 1.0]

[turnaround]
coefficients = [1.0, 1.0, 1.0]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.estimator.name, "from-env");

        std::env::remove_var("BETTER_FPT_TEST_MODEL_NAME");
    }

    #[test]
    fn test_missing_model_source_fails_validation() {
        let toml_content = r#"
[estimator]
name = "broken"

[cost]
intercept = 1.0

[turnaround]
coefficients = [1.0, 1.0, 1.0]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EstimatorError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_output_format_fails_validation() {
        let config = TomlConfig::from_toml_str(&INLINE_CONFIG.replace("\"json\"", "\"xml\"")).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_artifact_resolved_relative_to_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("models")).unwrap();
        std::fs::write(
            dir.path().join("models/cost.json"),
            r#"{"intercept": 0.0, "coefficients": [1.0, 0.0, 0.0]}"#,
        )
        .unwrap();

        let config_path = dir.path().join("fpt-config.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(
            br#"
[estimator]
name = "on-disk"

[cost]
artifact = "models/cost.json"

[turnaround]
coefficients = [0.0, 0.0, 0.0]
intercept = 24.0
"#,
        )
        .unwrap();

        let config = TomlConfig::from_file(&config_path).unwrap();
        assert!(config.validate().is_ok());

        let engine = config.build_engine().unwrap();
        let hours = engine
            .cost_predictor()
            .predict(&FeatureSizes::new(7, 100, 100))
            .unwrap();
        assert_eq!(hours, 7.0);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[estimator\nname = 1"),
            Err(EstimatorError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_artifact_is_estimation_failure() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("fpt-config.toml");
        std::fs::write(
            &config_path,
            r#"
[estimator]
name = "absent"

[cost]
artifact = "models/nope.json"

[turnaround]
coefficients = [1.0, 1.0, 1.0]
"#,
        )
        .unwrap();

        let config = TomlConfig::from_file(&config_path).unwrap();
        assert!(config.validate().is_ok());

        let err = config.build_engine().err().unwrap();
        assert!(matches!(err, EstimatorError::EstimationFailure { .. }));
        assert_eq!(err.user_friendly_message(), "Sorry, there was a problem");
    }

    #[test]
    fn test_config_from_missing_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("missing.toml");
        assert!(matches!(
            TomlConfig::from_file(path),
            Err(EstimatorError::IoError(_))
        ));
    }
}

use crate::utils::error::{EstimatorError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EstimatorError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` (midnight) or a full `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_date_time(field_name: &str, value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| EstimatorError::InvalidInputError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS".to_string(),
        })
}

pub fn parse_feature_size(field_name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| EstimatorError::InvalidInputError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected a non-negative integer: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("cost.artifact", "models/cost.json").is_ok());
        assert!(validate_path("cost.artifact", "").is_err());
        assert!(validate_path("cost.artifact", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("cost.artifact", "cost.json", &["json"]).is_ok());
        assert!(validate_file_extension("cost.artifact", "cost.mlmodel", &["json"]).is_err());
        assert!(validate_file_extension("cost.artifact", "cost", &["json"]).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("cost.intercept", 1.5).is_ok());
        assert!(validate_finite("cost.intercept", f64::NAN).is_err());
        assert!(validate_finite("cost.intercept", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("x", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("x", &missing),
            Err(EstimatorError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_parse_date_time() {
        let midnight = parse_date_time("created", "2024-01-02").unwrap();
        assert_eq!(midnight.to_string(), "2024-01-02 00:00:00");

        let stamped = parse_date_time("created", "2024-01-02T08:15:00").unwrap();
        assert_eq!(stamped.to_string(), "2024-01-02 08:15:00");

        assert!(parse_date_time("created", "02/01/2024").is_err());
    }

    #[test]
    fn test_parse_feature_size() {
        assert_eq!(parse_feature_size("f0", " 501 ").unwrap(), 501);
        assert_eq!(parse_feature_size("f0", "0").unwrap(), 0);
        assert!(parse_feature_size("f0", "-3").is_err());
        assert!(matches!(
            parse_feature_size("f0", "ten"),
            Err(EstimatorError::InvalidInputError { .. })
        ));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.format", "json", &["text", "json"]).is_ok());
        assert!(validate_one_of("output.format", "xml", &["text", "json"]).is_err());
    }
}

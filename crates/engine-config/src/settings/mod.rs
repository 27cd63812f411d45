use crate::settings::{
    error::SettingsError, validated::ValidatedSettings, validator::SettingsValidator,
};
use batch_size::DEFAULT_BATCH_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod batch_size;
pub mod error;
pub mod validated;
pub mod validator;

/// Raw scan settings as written by the user, e.g. `{"batch_size": 500, "start": 1}`.
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub batch_size: i64,
    pub start: Option<i64>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE as i64,
            start: None,
        }
    }
}

impl BatchSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Parses and validates a JSON settings document.
pub fn load(json: &str) -> Result<ValidatedSettings, SettingsError> {
    SettingsValidator::new().validate(&BatchSettings::from_json(json)?)
}

/// Reads, parses and validates a JSON settings file.
pub fn load_file(path: impl AsRef<Path>) -> Result<ValidatedSettings, SettingsError> {
    SettingsValidator::new().validate(&BatchSettings::from_file(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_test::traced_test;

    #[test]
    fn test_defaults_when_fields_missing() {
        let validated = load("{}").unwrap();
        assert_eq!(validated, ValidatedSettings::default());
        assert_eq!(validated.batch_size(), 1000);
        assert!(validated.start().is_none());
    }

    #[test]
    fn test_explicit_values() {
        let validated = load(r#"{"batch_size": 250, "start": 1}"#).unwrap();
        assert_eq!(validated.batch_size, 250);
        assert_eq!(validated.start, Some(Value::Int(1)));
    }

    #[test]
    fn test_zero_and_negative_batch_sizes_rejected() {
        for json in [r#"{"batch_size": 0}"#, r#"{"batch_size": -10}"#] {
            match load(json) {
                Err(SettingsError::ValidationFailed(errors)) => {
                    assert_eq!(errors.len(), 1);
                    assert!(errors[0].contains("batch_size must be at least 1"));
                }
                other => panic!("expected validation failure, got {other:?}"),
            }
        }
    }

    #[test]
    #[traced_test]
    fn test_large_batch_size_warns() {
        let validated = load(r#"{"batch_size": 250000}"#).unwrap();
        assert_eq!(validated.batch_size, 250_000);
        assert!(logs_contain("is very large"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            load(r#"{"batch_size": "lots"}"#),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"batch_size": 10, "start": -5}}"#).unwrap();

        let validated = load_file(file.path()).unwrap();
        assert_eq!(validated.batch_size, 10);
        assert_eq!(validated.start, Some(Value::Int(-5)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_file(dir.path().join("absent.json")),
            Err(SettingsError::Io(_))
        ));
    }
}

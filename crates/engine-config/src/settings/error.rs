use thiserror::Error;

/// Errors raised when loading or validating batch settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// One or more settings failed validation.
    #[error("Invalid settings: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// The settings document is not valid JSON or has the wrong shape.
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}

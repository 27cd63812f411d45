use connectors::error::ConnectorError;
use engine_config::settings::error::SettingsError;
use engine_core::error::PluckError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to connect: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Scan failed: {0}")]
    Pluck(#[from] PluckError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

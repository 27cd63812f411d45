use crate::settings::{
    BatchSettings,
    batch_size::BatchSizeSetting,
    error::SettingsError,
    validated::{ValidatedSettings, ValidatedSettingsBuilder},
};
use model::core::value::Value;
use tracing::{info, warn};

/// Validates raw batch settings before a scan uses them.
#[derive(Debug, Default)]
pub struct SettingsValidator;

impl SettingsValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, settings: &BatchSettings) -> Result<ValidatedSettings, SettingsError> {
        info!("Validating settings: {settings:?}");

        let mut builder = ValidatedSettingsBuilder::new();
        let mut errors: Vec<String> = Vec::new();

        self.validate_batch_size(settings, &mut builder, &mut errors);
        self.validate_start(settings, &mut builder);

        if !errors.is_empty() {
            return Err(SettingsError::ValidationFailed(errors));
        }

        let validated = builder.build();
        info!(
            batch_size = validated.batch_size,
            start = ?validated.start,
            "Settings validation completed successfully"
        );
        Ok(validated)
    }

    fn validate_batch_size(
        &self,
        settings: &BatchSettings,
        builder: &mut ValidatedSettingsBuilder,
        errors: &mut Vec<String>,
    ) {
        let setting = BatchSizeSetting(settings.batch_size);
        match setting.validate() {
            Ok(size) => {
                if setting.is_large() {
                    warn!(
                        "Batch size {} is very large, may cause memory issues",
                        settings.batch_size
                    );
                }
                builder.batch_size = Some(size);
            }
            Err(err) => errors.push(err),
        }
    }

    fn validate_start(&self, settings: &BatchSettings, builder: &mut ValidatedSettingsBuilder) {
        builder.start = settings.start.map(Value::Int);
    }
}

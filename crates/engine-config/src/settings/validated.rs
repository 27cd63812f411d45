use crate::settings::batch_size::DEFAULT_BATCH_SIZE;
use model::core::value::Value;

/// Immutable, validated configuration for a batch scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSettings {
    /// Maximum number of rows fetched per query
    pub batch_size: usize,
    /// Inclusive primary key to start from; `None` scans from the key type's minimum
    pub start: Option<Value>,
}

impl Default for ValidatedSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            start: None,
        }
    }
}

impl ValidatedSettings {
    pub fn from_builder(builder: ValidatedSettingsBuilder) -> Self {
        Self {
            batch_size: builder.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            start: builder.start,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn start(&self) -> Option<&Value> {
        self.start.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct ValidatedSettingsBuilder {
    pub batch_size: Option<usize>,
    pub start: Option<Value>,
}

impl ValidatedSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> ValidatedSettings {
        ValidatedSettings::from_builder(self)
    }
}

use model::core::value::Value;

/// What a finished scan delivered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationSummary {
    pub batches: usize,
    pub rows: usize,
    /// Primary key of the last delivered row.
    pub last_id: Option<Value>,
}

impl IterationSummary {
    /// Key a follow-up scan should start from to see only newer rows.
    pub fn resume_from(&self) -> Option<Value> {
        self.last_id.as_ref().and_then(Value::successor)
    }

    pub(crate) fn record_batch(&mut self, rows: usize, last_id: Value) {
        self.batches += 1;
        self.rows += rows;
        self.last_id = Some(last_id);
    }
}

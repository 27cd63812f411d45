/// Batch sizes above this are accepted but logged as a memory risk.
pub const LARGE_BATCH_SIZE: i64 = 100_000;

pub const DEFAULT_BATCH_SIZE: usize = 1000;

pub struct BatchSizeSetting(pub i64);

impl BatchSizeSetting {
    pub fn validate(&self) -> Result<usize, String> {
        if self.0 <= 0 {
            return Err(format!("batch_size must be at least 1, got {}", self.0));
        }
        usize::try_from(self.0).map_err(|_| format!("batch_size {} is too large", self.0))
    }

    pub fn is_large(&self) -> bool {
        self.0 > LARGE_BATCH_SIZE
    }
}

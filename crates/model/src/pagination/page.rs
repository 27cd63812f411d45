use crate::{pagination::cursor::Cursor, records::row::Row};

/// One page of rows read from a source.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub rows: Vec<Row>,
    /// Where the following page starts; `None` once the source is exhausted.
    pub next_cursor: Option<Cursor>,
    pub reached_end: bool,
    pub row_count: usize,
    pub took_ms: u128,
}

impl FetchResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

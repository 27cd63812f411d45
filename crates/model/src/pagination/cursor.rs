use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// Represents the pagination cursor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Cursor {
    /// No cursor specified; the scan starts at the smallest key the
    /// primary-key column can hold.
    None,

    /// Inclusive lower bound on a strictly increasing primary key.
    Pk { pk_col: String, from: Value },
}

impl Cursor {
    pub fn pk(pk_col: &str, from: impl Into<Value>) -> Self {
        Cursor::Pk {
            pk_col: pk_col.to_string(),
            from: from.into(),
        }
    }

    /// The inclusive lower bound, if one was given.
    pub fn lower_bound(&self) -> Option<&Value> {
        match self {
            Cursor::None => None,
            Cursor::Pk { from, .. } => Some(from),
        }
    }
}

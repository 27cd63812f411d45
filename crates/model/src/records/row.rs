use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// An ordered tuple of values, aligned with the column list it was selected with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Drops the leading column, used when the key was only selected for paging.
    pub fn without_leading(mut self) -> Self {
        if !self.values.is_empty() {
            self.values.remove(0);
        }
        self
    }

    /// Converts the row into what a consumer sees: a bare value when a single
    /// column was requested, a tuple otherwise.
    pub fn into_plucked(self) -> Plucked {
        if self.values.len() == 1 {
            let mut values = self.values;
            match values.pop() {
                Some(value) => Plucked::Scalar(value),
                None => Plucked::Tuple(values),
            }
        } else {
            Plucked::Tuple(self.values)
        }
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

/// A row as delivered to a batch consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Plucked {
    Scalar(Value),
    Tuple(Vec<Value>),
}

impl Plucked {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Plucked::Scalar(value) => Some(value),
            Plucked::Tuple(_) => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Plucked::Scalar(_) => None,
            Plucked::Tuple(values) => Some(values),
        }
    }
}

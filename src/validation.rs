use crate::error::{Error, Result};

use serde_json::Value;
use std::fmt;

/// Required attributes of a holiday record, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    State,
    SortKey,
    Name,
}

impl Field {
    const REQUIRED: [Field; 3] = [Field::State, Field::SortKey, Field::Name];

    pub fn name(&self) -> &'static str {
        match self {
            Self::State => "State",
            Self::SortKey => "SK",
            Self::Name => "Name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SortKey => write!(f, "SK (sort key)"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Checks `value` as a holiday entry. The first absent or falsy required field
/// wins.
pub fn validate_holiday(value: &Value) -> Result<()> {
    match Field::REQUIRED
        .into_iter()
        .find(|field| !value.get(field.name()).map(truthy).unwrap_or(false))
    {
        Some(field) => Err(Error::MissingField(field)),
        None => Ok(()),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

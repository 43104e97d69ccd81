use std::fmt;

use serde::{Deserialize, Serialize};

/// A column label as it appears on a table.
///
/// Only [`ColumnLabel::Text`] labels take part in alias resolution; integer and
/// composite labels are carried through every operation untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnLabel {
    Text(String),
    Integer(i64),
    Composite(Vec<ColumnLabel>),
}

impl ColumnLabel {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnLabel::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ColumnLabel::Text(_))
    }
}

impl From<&str> for ColumnLabel {
    fn from(value: &str) -> Self {
        ColumnLabel::Text(value.to_string())
    }
}

impl From<String> for ColumnLabel {
    fn from(value: String) -> Self {
        ColumnLabel::Text(value)
    }
}

impl From<i64> for ColumnLabel {
    fn from(value: i64) -> Self {
        ColumnLabel::Integer(value)
    }
}

impl<T: Into<ColumnLabel>> From<Vec<T>> for ColumnLabel {
    fn from(parts: Vec<T>) -> Self {
        ColumnLabel::Composite(parts.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLabel::Text(value) => f.write_str(value),
            ColumnLabel::Integer(value) => write!(f, "{value}"),
            ColumnLabel::Composite(parts) => {
                f.write_str("(")?;
                for (idx, part) in parts.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

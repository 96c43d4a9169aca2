use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length accepted for a description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Validated free-text description attached to items and lists.
///
/// The value is always trimmed; blank input collapses to the empty
/// description, which is a legal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Builds a description from raw input, trimming surrounding whitespace.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(DomainError::DescriptionTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds a description from optional input; `None` yields the empty value.
    pub fn from_option(value: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(raw) => Self::new(raw),
            None => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

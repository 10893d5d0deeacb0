//! Blueprint options
//!
//! Options are plain data. They can be built in code or read from JSON:
//!
//! ```json
//! { "key_style": "qualified" }
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use serde::{Deserialize, Serialize};

use crate::schema::{SchemaError, SchemaResult};

/// How failing field keys are spelled in messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// Bare field paths: `requiredString`, `user.lastName`
    #[default]
    Path,
    /// Paths prefixed with the blueprint name: `sut.requiredString`
    Qualified,
}

/// Per-blueprint options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub key_style: KeyStyle,
}

impl Options {
    /// Options producing blueprint-qualified keys
    pub fn qualified() -> Self {
        Self {
            key_style: KeyStyle::Qualified,
        }
    }

    /// Parses options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidOptions` on malformed JSON, unknown keys
    /// or unknown key styles.
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        serde_json::from_str(json).map_err(|e| SchemaError::InvalidOptions(e.to_string()))
    }
}

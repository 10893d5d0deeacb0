//! Schema and validation error types
//!
//! Two families:
//! - `SchemaError`: setup-time misuse (bad names, bad patterns, bad
//!   boundaries). Returned immediately from construction and registration.
//! - `ValidationError`: data failures. Returned from `validate` and from
//!   individual validators, never panicked.

use thiserror::Error;

/// Setup-time errors raised while building blueprints, validators and
/// comparators
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// Blueprint name is empty or blank
    #[error("blueprint requires a name {{string}}, and a blueprint {{object}}")]
    InvalidName,

    /// Schema value is not a plain mapping, or holds an unsupported node
    #[error("blueprint requires a name {{string}}, and a blueprint {{object}}: {0}")]
    InvalidSchema(String),

    /// Validator/type name is empty or blank
    #[error("{operation} requires a name {{string}}, and a validator {{function}}")]
    InvalidValidatorName {
        /// The registration operation that rejected the name
        operation: &'static str,
    },

    /// Regular expression failed to compile
    #[error("invalid expression: {0}")]
    InvalidExpression(#[from] regex::Error),

    /// Comparator boundary is not a number
    #[error("{comparator} requires a minimum number to compare values to")]
    InvalidBoundary { comparator: &'static str },

    /// Range options are missing a lower or upper bound
    #[error("{0}")]
    InvalidRange(String),

    /// Options could not be parsed
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for setup-time operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Machine-readable codes attached to field failures
pub mod codes {
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const EMPTY_STRING: &str = "empty_string";
    pub const INVALID_DECIMAL: &str = "invalid_decimal";
    pub const INVALID_EXPRESSION: &str = "invalid_expression";
    pub const INVALID_GT: &str = "invalid_gt";
    pub const INVALID_GTE: &str = "invalid_gte";
    pub const INVALID_LT: &str = "invalid_lt";
    pub const INVALID_LTE: &str = "invalid_lte";
}

/// Data validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A single field failed its validator
    #[error("{message}")]
    InvalidValue {
        /// Field path (e.g., "user.address.city")
        key: String,
        /// Human-readable expectation
        message: String,
        /// Stable machine code, see [`codes`]
        code: Option<&'static str>,
    },

    /// One or more elements of an array field failed
    #[error("{}", .messages.join(", "))]
    Elements { key: String, messages: Vec<String> },

    /// The schema names a validator that is not registered
    #[error("I don't know how to validate `{name}`")]
    Unresolved { key: String, name: String },

    /// A dynamic validator returned something other than a boolean or an
    /// `{err, value}` object
    #[error("the validator for `{key}` returned {returned}, expected a boolean or an object with `err` or `value`")]
    ContractViolation { key: String, returned: String },

    /// Error raised by a user validator
    #[error("{0}")]
    Custom(String),

    /// Aggregate failure of a whole blueprint
    #[error("Invalid {name}: {}", .messages.join(", "))]
    Invalid { name: String, messages: Vec<String> },
}

impl ValidationError {
    /// Creates a field failure
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            key: key.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Creates a field failure with a machine code
    pub fn with_code(key: impl Into<String>, message: impl Into<String>, code: &'static str) -> Self {
        ValidationError::InvalidValue {
            key: key.into(),
            message: message.into(),
            code: Some(code),
        }
    }

    /// Creates a custom failure
    pub fn custom(message: impl Into<String>) -> Self {
        ValidationError::Custom(message.into())
    }

    /// Returns every individual message, flattened. Aggregates return their
    /// parts so callers never have to split the joined message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ValidationError::Elements { messages, .. } | ValidationError::Invalid { messages, .. } => {
                messages.clone()
            }
            other => vec![other.to_string()],
        }
    }

    /// Returns the field path, when the error belongs to a single field
    pub fn key(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidValue { key, .. }
            | ValidationError::Elements { key, .. }
            | ValidationError::Unresolved { key, .. }
            | ValidationError::ContractViolation { key, .. } => Some(key),
            ValidationError::Custom(_) | ValidationError::Invalid { .. } => None,
        }
    }

    /// Returns the machine code, if any
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidValue { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<String> for ValidationError {
    fn from(message: String) -> Self {
        ValidationError::custom(message)
    }
}

impl From<&str> for ValidationError {
    fn from(message: &str) -> Self {
        ValidationError::custom(message)
    }
}

//! Type references and their variants
//!
//! Every registered type is reachable under four spellings:
//!
//! | spelling   | variant          |
//! |------------|------------------|
//! | `T`        | required         |
//! | `T?`       | optional         |
//! | `T[]`      | required array   |
//! | `T[]?`     | optional array   |
//!
//! `array<T>` and `array<T>?` are accepted as older spellings of the array
//! variants.

use std::fmt;

use crate::is::get_type;
use crate::schema::{codes, Outcome, ValidationContext, ValidationError, Validator};
use crate::value::Value;

/// Which of the four derived validators a reference selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Required,
    Optional,
    RequiredArray,
    OptionalArray,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Required,
        Variant::Optional,
        Variant::RequiredArray,
        Variant::OptionalArray,
    ];

    /// Suffix appended to the base name
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::Required => "",
            Variant::Optional => "?",
            Variant::RequiredArray => "[]",
            Variant::OptionalArray => "[]?",
        }
    }

    pub fn is_optional(self) -> bool {
        matches!(self, Variant::Optional | Variant::OptionalArray)
    }

    pub fn is_array(self) -> bool {
        matches!(self, Variant::RequiredArray | Variant::OptionalArray)
    }
}

/// A parsed type name: base plus variant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    base: String,
    variant: Variant,
}

impl TypeRef {
    pub fn new(base: impl Into<String>, variant: Variant) -> Self {
        Self {
            base: base.into(),
            variant,
        }
    }

    /// Splits a spelled name into base and variant. Names without a
    /// recognized suffix are required references to themselves.
    pub fn parse(name: &str) -> Self {
        if let Some(inner) = name.strip_prefix("array<") {
            if let Some(base) = inner.strip_suffix(">?") {
                return Self::new(base, Variant::OptionalArray);
            }
            if let Some(base) = inner.strip_suffix('>') {
                return Self::new(base, Variant::RequiredArray);
            }
        }

        if let Some(base) = name.strip_suffix("[]?") {
            Self::new(base, Variant::OptionalArray)
        } else if let Some(base) = name.strip_suffix("[]") {
            Self::new(base, Variant::RequiredArray)
        } else if let Some(base) = name.strip_suffix('?') {
            Self::new(base, Variant::Optional)
        } else {
            Self::new(name, Variant::Required)
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::parse(name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.variant.suffix())
    }
}

/// The four validators derived from one base type validator
#[derive(Debug, Clone)]
pub struct TypeValidators {
    name: String,
    required: Validator,
    optional: Validator,
    required_array: Validator,
    optional_array: Validator,
}

impl TypeValidators {
    pub(crate) fn derive(name: &str, base: Validator) -> Self {
        let required_array = array_of(name, base.clone());
        Self {
            name: name.to_string(),
            optional: nullable(base.clone()),
            optional_array: nullable(required_array.clone()),
            required_array,
            required: base,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, variant: Variant) -> &Validator {
        match variant {
            Variant::Required => &self.required,
            Variant::Optional => &self.optional,
            Variant::RequiredArray => &self.required_array,
            Variant::OptionalArray => &self.optional_array,
        }
    }

    pub fn required(&self) -> &Validator {
        &self.required
    }

    pub fn optional(&self) -> &Validator {
        &self.optional
    }

    pub fn required_array(&self) -> &Validator {
        &self.required_array
    }

    pub fn optional_array(&self) -> &Validator {
        &self.optional_array
    }

    /// Every spelling with its validator
    pub fn iter(&self) -> impl Iterator<Item = (String, &Validator)> + '_ {
        Variant::ALL
            .into_iter()
            .map(move |variant| (TypeRef::new(self.name.as_str(), variant).to_string(), self.get(variant)))
    }
}

/// Null and undefined pass through untouched; anything else goes to `inner`.
fn nullable(inner: Validator) -> Validator {
    Validator::new(move |ctx| {
        if ctx.value.is_nullish() {
            Ok(ctx.value.clone())
        } else {
            inner.validate(ctx)
        }
    })
}

/// Validates every element with `element`, reporting all failing elements.
fn array_of(name: &str, element: Validator) -> Validator {
    let expected = format!("{{{}[]}}", name);
    Validator::new(move |ctx| check_elements(ctx, &element, &expected))
}

fn check_elements(ctx: &ValidationContext<'_>, element: &Validator, expected: &str) -> Outcome {
    let items = match &ctx.value {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::with_code(
                ctx.key.clone(),
                format!("expected `{}` {{{}}} to be {}", ctx.key, get_type(other), expected),
                codes::INVALID_TYPE,
            ))
        }
    };

    let mut output = Vec::with_capacity(items.len());
    let mut messages = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let item_ctx = ctx.with_key_and_value(format!("{}[{}]", ctx.key, index), item.clone());
        match element.validate(&item_ctx) {
            Ok(validated) => output.push(validated),
            Err(err) => messages.extend(err.messages()),
        }
    }

    if messages.is_empty() {
        Ok(Value::Array(output))
    } else {
        Err(ValidationError::Elements {
            key: ctx.key.clone(),
            messages,
        })
    }
}

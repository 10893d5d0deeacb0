//! Schema definitions
//!
//! A schema is an ordered list of fields, each mapped to a node:
//! - a registered name (`"string"`, `"int?"`, `"person[]"`)
//! - a validator function
//! - a regular expression
//! - a nested schema

use regex::Regex;

use super::errors::{SchemaError, SchemaResult};
use super::validator::Validator;
use crate::is::get_type;
use crate::value::Value;

/// What a single schema field is validated with
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A name resolved through the registry at validation time
    Reference(String),
    /// An inline validator
    Validator(Validator),
    /// Matches string values against a pattern
    Expression(Regex),
    /// A nested object schema
    Nested(Schema),
}

impl SchemaNode {
    /// Short description used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            SchemaNode::Reference(name) => name.clone(),
            SchemaNode::Validator(_) => "function".to_string(),
            SchemaNode::Expression(re) => format!("/{}/", re.as_str()),
            SchemaNode::Nested(_) => "object".to_string(),
        }
    }
}

impl From<&str> for SchemaNode {
    fn from(name: &str) -> Self {
        SchemaNode::Reference(name.to_string())
    }
}

impl From<String> for SchemaNode {
    fn from(name: String) -> Self {
        SchemaNode::Reference(name)
    }
}

impl From<Validator> for SchemaNode {
    fn from(validator: Validator) -> Self {
        SchemaNode::Validator(validator)
    }
}

impl From<Regex> for SchemaNode {
    fn from(re: Regex) -> Self {
        SchemaNode::Expression(re)
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> Self {
        SchemaNode::Nested(schema)
    }
}

/// An ordered mapping from field names to schema nodes.
///
/// Fields are validated in declaration order, so validators may read
/// fields declared before them from the partial output.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, SchemaNode)>,
}

impl Schema {
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a field. Redeclaring a field replaces its node but keeps its
    /// original position.
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// In-place form of [`Schema::field`]
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<SchemaNode>) {
        let name = name.into();
        let node = node.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.fields.push((name, node)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    /// Iterates fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns a copy of this schema with `other` layered on top. Fields
    /// holding nested schemas on both sides are merged recursively; any
    /// other field in `other` replaces ours.
    pub fn merge(&self, other: &Schema) -> Schema {
        let mut merged = self.clone();
        for (name, node) in other.fields() {
            let combined = match (merged.get(name), node) {
                (Some(SchemaNode::Nested(ours)), SchemaNode::Nested(theirs)) => {
                    SchemaNode::Nested(ours.merge(theirs))
                }
                _ => node.clone(),
            };
            merged.insert(name, combined);
        }
        merged
    }
}

impl TryFrom<&Value> for Schema {
    type Error = SchemaError;

    /// Builds a schema from a dynamic object. Strings become references,
    /// regular expressions become expressions, functions become validators
    /// and objects become nested schemas.
    fn try_from(value: &Value) -> SchemaResult<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(SchemaError::InvalidSchema(format!(
                    "expected {{object}}, got {{{}}}",
                    get_type(other)
                )))
            }
        };

        let mut schema = Schema::new();
        for (name, node) in map {
            let node = match node {
                Value::String(reference) => SchemaNode::Reference(reference.clone()),
                Value::RegExp(re) => SchemaNode::Expression(re.clone()),
                Value::Function(func) => SchemaNode::Validator(Validator::from_function_value(func.clone())),
                Value::Object(_) => SchemaNode::Nested(Schema::try_from(node)?),
                other => {
                    return Err(SchemaError::InvalidSchema(format!(
                        "field `{}` cannot be validated by {{{}}}",
                        name,
                        get_type(other)
                    )))
                }
            };
            schema.insert(name.clone(), node);
        }
        Ok(schema)
    }
}

impl TryFrom<Value> for Schema {
    type Error = SchemaError;

    fn try_from(value: Value) -> SchemaResult<Self> {
        Schema::try_from(&value)
    }
}

/// Joins a parent path and a field name with a dot
pub(crate) fn make_path(prefix: Option<&str>, field: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}.{}", prefix, field),
        _ => field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FunctionValue;

    #[test]
    fn test_field_order_is_declaration_order() {
        let schema = Schema::new()
            .field("zeta", "string")
            .field("alpha", "number")
            .field("mid", "boolean");

        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_redeclared_field_keeps_position() {
        let schema = Schema::new()
            .field("a", "string")
            .field("b", "string")
            .field("a", "number");

        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(matches!(schema.get("a"), Some(SchemaNode::Reference(n)) if n == "number"));
    }

    #[test]
    fn test_merge_is_deep() {
        let base = Schema::new()
            .field("name", "string")
            .field("address", Schema::new().field("city", "string").field("zip", "string"));
        let patch = Schema::new()
            .field("address", Schema::new().field("zip", "number"))
            .field("age", "number?");

        let merged = base.merge(&patch);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["name", "address", "age"]);

        let address = match merged.get("address") {
            Some(SchemaNode::Nested(address)) => address,
            other => panic!("expected nested schema, got {:?}", other),
        };
        assert!(matches!(address.get("city"), Some(SchemaNode::Reference(n)) if n == "string"));
        assert!(matches!(address.get("zip"), Some(SchemaNode::Reference(n)) if n == "number"));
        // the receiver is untouched
        assert!(base.get("age").is_none());
    }

    #[test]
    fn test_try_from_value() {
        let value = Value::object([
            ("name", Value::from("string")),
            ("code", Value::from(Regex::new("^[A-Z]{3}$").unwrap())),
            ("check", Value::from(FunctionValue::new("check", |_| Value::from(true)))),
            ("nested", Value::object([("inner", Value::from("number"))])),
        ]);

        let schema = Schema::try_from(&value).unwrap();
        assert_eq!(schema.len(), 4);
        assert!(matches!(schema.get("code"), Some(SchemaNode::Expression(_))));
        assert!(matches!(schema.get("check"), Some(SchemaNode::Validator(_))));
        assert!(matches!(schema.get("nested"), Some(SchemaNode::Nested(s)) if s.len() == 1));
    }

    #[test]
    fn test_try_from_rejects_bad_nodes() {
        assert!(matches!(
            Schema::try_from(&Value::from("string")),
            Err(SchemaError::InvalidSchema(_))
        ));
        assert!(matches!(
            Schema::try_from(&Value::object([("n", Value::from(42))])),
            Err(SchemaError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_make_path() {
        assert_eq!(make_path(None, "a"), "a");
        assert_eq!(make_path(Some("user"), "a"), "user.a");
        assert_eq!(make_path(Some("users[1]"), "a"), "users[1].a");
    }
}

use indexmap::IndexMap;
use std::fmt;

use crate::error::{ParseError, ParseErrorKind};

/// Mapping node of a configuration tree, in document order.
pub type Map = IndexMap<String, Value>;

// ─── Value ───────────────────────────────────────────────────────────────────

/// A loosely-typed configuration node.
///
/// Validators never index into the tree blindly; every read goes through one
/// of the typed accessors below, which return `None` when the node has a
/// different shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Wide enough for every YAML integer, signed or unsigned 64-bit.
    Integer(i128),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload. Booleans and floats are never integers, even `30.0`.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key if this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// YAML-author truthiness: null, `false`, zero, and empty strings,
    /// lists and mappings are all "empty".
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "mapping",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            // Debug keeps the fractional part, so `1.0` stays `1.0`.
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Integer(i128::from(u))
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A parsed bot configuration: a non-empty mapping from section name to body.
///
/// Immutable once built; validation only reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root: Map,
}

impl Document {
    /// Wrap an already-built tree. Fails the same way [`crate::parse`] does for
    /// empty or non-mapping roots.
    pub fn from_value(value: Value) -> Result<Document, ParseError> {
        if !value.is_truthy() {
            return Err(ParseError {
                kind: ParseErrorKind::Empty,
                message: "Configuration file is empty".to_string(),
                line: None,
                column: None,
            });
        }
        match value {
            Value::Map(root) => Ok(Document { root }),
            other => Err(ParseError {
                kind: ParseErrorKind::TypeMismatch,
                message: format!(
                    "document root must be a YAML mapping, got {}",
                    other.type_name()
                ),
                line: None,
                column: None,
            }),
        }
    }

    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.root.contains_key(name)
    }

    pub fn root(&self) -> &Map {
        &self.root
    }
}

impl TryFrom<serde_json::Value> for Document {
    type Error = ParseError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Document::from_value(Value::from(value))
    }
}

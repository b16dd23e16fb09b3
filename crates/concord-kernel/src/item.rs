//! Extracted items: leaf values and structural-error sentinels.
//!
//! Both flow through the same counting and verdict pipeline, which is what
//! lets "three files are missing, one is present" be compared the same way
//! as "three files say 8080, one says 9090".

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A structural problem found while walking a document.
///
/// Serializes as snake case; deserializes from either `no_file` or `NO_FILE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum StructuralErrorKind {
    /// The document itself is absent.
    NoFile,
    /// The document is present but empty.
    FileEmpty,
    /// A traversed field exists but is empty.
    FieldEmpty,
    /// A traversed field is absent or null where the schema expects content.
    WrongKeys,
    /// A mapping was reached at a level the schema does not describe.
    MissingNestedKey,
}

impl StructuralErrorKind {
    pub const ALL: [StructuralErrorKind; 5] = [
        Self::NoFile,
        Self::FileEmpty,
        Self::FieldEmpty,
        Self::WrongKeys,
        Self::MissingNestedKey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoFile => "NO_FILE",
            Self::FileEmpty => "FILE_EMPTY",
            Self::FieldEmpty => "FIELD_EMPTY",
            Self::WrongKeys => "WRONG_KEYS",
            Self::MissingNestedKey => "MISSING_NESTED_KEY",
        }
    }
}

impl fmt::Display for StructuralErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StructuralErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown structural error kind: {s}"))
    }
}

impl TryFrom<String> for StructuralErrorKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A decoded scalar leaf.
///
/// Numbers are normalized on construction: any integral value is stored as
/// [`ScalarValue::Integer`], so `1` and `1.0` are the same item. Booleans never
/// compare equal to numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    String(String),
    Integer(i128),
    Float(f64),
    Bool(bool),
}

// Above this magnitude every f64 is integral but may not fit in i128.
const INTEGRAL_FLOAT_LIMIT: f64 = 1.0e36;

impl ScalarValue {
    pub fn from_number(number: &Number) -> Self {
        if let Some(value) = number.as_i64() {
            return Self::Integer(i128::from(value));
        }
        if let Some(value) = number.as_u64() {
            return Self::Integer(i128::from(value));
        }
        let value = number.as_f64().unwrap_or(f64::NAN);
        if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT {
            Self::Integer(value as i128)
        } else {
            Self::Float(value)
        }
    }

    /// Converts a JSON scalar. Containers and `null` yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Number(n) => Some(Self::from_number(n)),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ScalarValue {}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::String(s) => s.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::Bool(b) => b.hash(state),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One element of an extracted stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedItem {
    Value(ScalarValue),
    Error(StructuralErrorKind),
}

impl ExtractedItem {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_error(&self) -> Option<StructuralErrorKind> {
        match self {
            Self::Error(kind) => Some(*kind),
            Self::Value(_) => None,
        }
    }
}

impl fmt::Display for ExtractedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::Error(kind) => kind.fmt(f),
        }
    }
}

impl From<StructuralErrorKind> for ExtractedItem {
    fn from(kind: StructuralErrorKind) -> Self {
        Self::Error(kind)
    }
}

impl From<ScalarValue> for ExtractedItem {
    fn from(value: ScalarValue) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ExtractedItem {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for ExtractedItem {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for ExtractedItem {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<bool> for ExtractedItem {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

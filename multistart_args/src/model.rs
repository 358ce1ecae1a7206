use chrono::NaiveDateTime;

/// The value kind of a schema field.
///
/// The kind selects the coercion rule applied to the field's raw text; see the crate
/// documentation for the per-kind rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Verbatim text, with the executable-directory token substituted.
    Str,
    /// A signed integer.
    Int,
    /// A floating point number; empty text reads as `0.0`.
    Float,
    /// A strict `true`/`false` literal; empty text reads as `true`.
    Bool,
    /// A calendar date or date-time.
    DateTime,
    /// One of a fixed set of named members, matched case-insensitively.
    Enumeration(&'static [&'static str]),
    /// A comma-separated list of strings, no trimming.
    StrList,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Enumeration(_) => write!(f, "Enumeration"),
            kind => write!(f, "{:?}", kind),
        }
    }
}

/// A coerced value held in a [`ParamSet`](crate::ParamSet) slot.
///
/// `Absent` is the explicit absence marker: the seeded state of a slot whose default
/// never applied, and the coerced form of the `NULL` literal on a nullable field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A date-time.
    DateTime(NaiveDateTime),
    /// The canonical member name of an enumeration field.
    Enum(&'static str),
    /// A list of strings.
    List(Vec<String>),
    /// Explicitly no value.
    Absent,
}

impl Value {
    /// The string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The date-time payload, if this is a `DateTime`.
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    /// The selected member name, if this is an `Enum`.
    pub fn as_enum(&self) -> Option<&'static str> {
        match self {
            Value::Enum(member) => Some(*member),
            _ => None,
        }
    }

    /// The list payload, if this is a `List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Whether this slot holds the explicit absence marker.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

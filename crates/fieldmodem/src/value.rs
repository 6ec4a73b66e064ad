//! Encoder input values and JSON rendering.
//!
//! [`Value`] is the JSON-like key/value model accepted by the encoder. Its
//! `Display` impl renders canonical JSON, which the encoder uses for the
//! value shapes the wire cannot carry structurally (arrays, booleans, and
//! nested objects that fail to encode).

use indexmap::IndexMap;

/// Insertion-ordered map used for object values.
///
/// Iteration order is the order keys were inserted, which is also the
/// order fields are emitted on the wire.
pub type Map = IndexMap<String, Value>;

/// A JSON-like value accepted by the encoder.
///
/// How each variant reaches the wire:
///
/// - `String` becomes one blob field of UTF-8 bytes.
/// - `Number` becomes one int field (floored; the sign is not
///   representable and is silently omitted).
/// - `Object` becomes a recursively encoded sub-record embedded in one
///   blob field.
/// - `Array` and `Boolean` become JSON text in one blob field.
/// - `Null` cannot be represented and is a fatal encoding error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// The absence of a value; not representable on the wire.
    Null,
    /// A boolean.
    Boolean(bool),
    /// A double-precision number.
    Number(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// An insertion-ordered mapping of keys to values.
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`](Self::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Number`](Self::Number).
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`](Self::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Object`](Self::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, control characters, and the Unicode line
/// separators are replaced with their JSON escape sequences.
fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            // JSON escapes are exactly 4 hex digits; characters outside the
            // BMP are left to downstream processing.
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(values) => {
                f.write_str("[")?;
                let mut first = true;
                for v in values {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

//! Rendering fields and key/value structures to wire bytes.
//!
//! The encoder is the grammar's inverse: [`encode_field`] renders one
//! decoded field, and [`encode_object`] renders a JSON-like structure to a
//! concatenated field sequence in key iteration order. Structures nest by
//! embedding a sub-encoded field sequence inside a blob field; there is no
//! structural nesting tag on the wire.

use crate::{
    decoder::{FIELD_START, KIND_BLOB, KIND_INT, PIECE_SEP, RECORD_SEP},
    error::EncodeError,
    field::Field,
    value::{Map, Value},
};

/// Renders one decoded field back to its wire bytes.
///
/// # Examples
///
/// ```
/// use fieldmodem::{Field, encode_field};
///
/// let mut out = Vec::new();
/// encode_field(
///     &Field::Blob {
///         name: "body".into(),
///         value: b"hello".to_vec(),
///     },
///     &mut out,
/// );
/// assert_eq!(out, b":b body 5\nhello\n");
/// ```
pub fn encode_field(field: &Field, out: &mut Vec<u8>) {
    match field {
        Field::Int { name, value } => write_int(out, name, &value.to_string()),
        Field::Blob { name, value } => write_blob(out, name, value),
    }
}

/// Encodes a key/value structure as a concatenated field sequence.
///
/// Fields are emitted in the map's iteration order with no extra
/// separators; each field's own trailing terminator serves as the
/// separator for the next.
///
/// # Errors
///
/// [`EncodeError`] naming the offending key for null values, non-finite
/// numbers, and keys outside the field-name charset.
pub fn encode_object(map: &Map) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    for (key, value) in map {
        encode_entry(&mut out, key, value)?;
    }
    Ok(out)
}

fn encode_entry(out: &mut Vec<u8>, key: &str, value: &Value) -> Result<(), EncodeError> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(EncodeError::InvalidName { key: key.to_owned() });
    }
    match value {
        Value::Null => Err(EncodeError::NullValue { key: key.to_owned() }),
        Value::Number(n) if !n.is_finite() => Err(EncodeError::NonFiniteNumber {
            key: key.to_owned(),
            value: *n,
        }),
        Value::Number(n) => {
            // Floored toward negative infinity. The grammar has no sign
            // byte, so the magnitude is written and a negative sign is
            // silently omitted; this is a wire-format limitation.
            let digits = format!("{:.0}", n.floor().abs());
            write_int(out, key, &digits);
            Ok(())
        }
        Value::String(s) => {
            write_blob(out, key, s.as_bytes());
            Ok(())
        }
        Value::Object(inner) => {
            // Nested structures embed a sub-encoded field sequence; if the
            // sub-encode fails, fall back to JSON text instead of
            // propagating the failure.
            match encode_object(inner) {
                Ok(bytes) => write_blob(out, key, &bytes),
                Err(_) => write_blob(out, key, value.to_string().as_bytes()),
            }
            Ok(())
        }
        Value::Array(_) | Value::Boolean(_) => {
            write_blob(out, key, value.to_string().as_bytes());
            Ok(())
        }
    }
}

fn write_header(out: &mut Vec<u8>, kind: u8, name: &str) {
    out.push(FIELD_START);
    out.push(kind);
    out.push(PIECE_SEP);
    out.extend_from_slice(name.as_bytes());
    out.push(PIECE_SEP);
}

fn write_int(out: &mut Vec<u8>, name: &str, digits: &str) {
    write_header(out, KIND_INT, name);
    out.extend_from_slice(digits.as_bytes());
    out.push(RECORD_SEP);
}

fn write_blob(out: &mut Vec<u8>, name: &str, payload: &[u8]) {
    write_header(out, KIND_BLOB, name);
    out.extend_from_slice(payload.len().to_string().as_bytes());
    out.push(RECORD_SEP);
    out.extend_from_slice(payload);
    out.push(RECORD_SEP);
}

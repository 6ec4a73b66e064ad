//! Boundary transforms over decoded blob fields.

use crate::{error::TransformError, field::Field, record::Record, step::decode_record};

/// Views a blob field's payload as UTF-8 text.
///
/// # Errors
///
/// [`TransformError::NotABlob`] for int fields,
/// [`TransformError::InvalidUtf8`] when the payload is not UTF-8; both name
/// the field.
pub fn blob_text(field: &Field) -> Result<&str, TransformError> {
    match field {
        Field::Blob { name, value } => core::str::from_utf8(value)
            .map_err(|_| TransformError::InvalidUtf8 { field: name.clone() }),
        Field::Int { name, .. } => Err(TransformError::NotABlob { field: name.clone() }),
    }
}

/// Decodes a blob field's payload as an embedded sub-record.
///
/// Structures nest on this wire by embedding a sub-encoded field sequence
/// inside a blob payload; this undoes one level of that embedding.
///
/// # Errors
///
/// [`TransformError::NotABlob`] for int fields,
/// [`TransformError::NotARecord`] when the payload does not decode.
///
/// # Examples
///
/// ```
/// use fieldmodem::{blob_record, decode_record};
///
/// let outer = decode_record(b":b inner 7\n:i a 1\n\n").unwrap();
/// let inner = blob_record(outer.get("inner").unwrap().first()).unwrap();
/// assert_eq!(inner.get("a").unwrap().first().as_int(), Some(1));
/// ```
pub fn blob_record(field: &Field) -> Result<Record, TransformError> {
    match field {
        Field::Blob { name, value } => decode_record(value).map_err(|source| {
            TransformError::NotARecord {
                field: name.clone(),
                source,
            }
        }),
        Field::Int { name, .. } => Err(TransformError::NotABlob { field: name.clone() }),
    }
}

//! Error types for decoding, encoding, and blob transforms.

use core::fmt;

use thiserror::Error;

use crate::record::Record;

/// Renders a byte as a quoted character when printable, hex otherwise.
pub(crate) struct ByteDisplay(pub u8);

impl fmt::Display for ByteDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() || self.0 == b' ' {
            write!(f, "'{}'", char::from(self.0))
        } else {
            write!(f, "{:#04x}", self.0)
        }
    }
}

fn eof_suffix(expected: Option<u8>) -> String {
    match expected {
        Some(byte) => format!(", expected {}", ByteDisplay(byte)),
        None => String::new(),
    }
}

/// A failure while decoding one field.
///
/// Every variant except [`UnexpectedEof`](Self::UnexpectedEof) is fatal for
/// the whole parse. `UnexpectedEof` only means the buffered bytes ran out
/// mid-field: the incremental drivers roll the cursor back and retry once
/// more bytes arrive, and surface it as terminal only when the chunk source
/// is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A byte outside the accepted set at a known grammar position.
    #[error("unexpected byte {}, expected {}", ByteDisplay(*received), ByteDisplay(*expected))]
    UnexpectedByte {
        /// The byte that would have continued or ended the current token.
        expected: u8,
        /// The byte actually present at the cursor.
        received: u8,
    },

    /// The buffer was exhausted mid-field.
    ///
    /// `expected` is set only where a single byte is the unique
    /// continuation; ambiguous positions leave it untagged.
    #[error("unexpected end of input{}", eof_suffix(*expected))]
    UnexpectedEof {
        /// The byte expected next, when known.
        expected: Option<u8>,
    },

    /// The byte after `:` named no known field kind.
    #[error("unrecognized field kind {}", ByteDisplay(*received))]
    InvalidKind {
        /// The unrecognized kind byte.
        received: u8,
    },

    /// A field name of zero length.
    #[error("field name is empty")]
    MissingName,
}

impl ParseError {
    /// Whether this failure only means more bytes are needed.
    ///
    /// This is the signal the incremental drivers use to distinguish
    /// "wait for the next chunk" from "the input is malformed".
    #[must_use]
    pub fn is_starvation(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. })
    }
}

/// A terminal decode failure, carrying the structure built from the fields
/// that decoded successfully before the error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct DecodeFailure {
    /// The failure that halted decoding.
    #[source]
    pub error: ParseError,
    /// Every field merged before the failure, preserved as context.
    pub partial: Record,
}

/// A failure while encoding a key/value structure, naming the offending key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// Null has no representation on the wire.
    #[error("key `{key}`: null cannot be represented")]
    NullValue {
        /// The key whose value was null.
        key: String,
    },

    /// NaN and infinities cannot be rendered as a digit run.
    #[error("key `{key}`: non-finite number {value} cannot be encoded")]
    NonFiniteNumber {
        /// The key whose value was non-finite.
        key: String,
        /// The offending number.
        value: f64,
    },

    /// The key contains bytes outside the field-name charset.
    #[error("key `{key}` is not a valid field name")]
    InvalidName {
        /// The rejected key.
        key: String,
    },
}

/// A failure while transforming a decoded field, naming the field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The field holds an integer, not blob data.
    #[error("field `{field}` does not hold blob data")]
    NotABlob {
        /// The field's name.
        field: String,
    },

    /// The blob payload is not valid UTF-8.
    #[error("field `{field}` is not valid UTF-8")]
    InvalidUtf8 {
        /// The field's name.
        field: String,
    },

    /// The blob payload does not decode as an embedded record.
    #[error("field `{field}` does not hold an embedded record: {source}")]
    NotARecord {
        /// The field's name.
        field: String,
        /// The decode failure for the embedded payload.
        #[source]
        source: ParseError,
    },
}

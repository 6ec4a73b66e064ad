//! The decoded unit of the wire format.

use core::fmt;

use bstr::BStr;

/// One named, typed unit of the wire format.
///
/// A field is either a non-negative decimal integer or an opaque,
/// length-prefixed byte blob. Fields are produced by the decoder and are
/// immutable once built; names are non-empty printable ASCII with space and
/// newline excluded.
///
/// # Examples
///
/// ```
/// use fieldmodem::decode_record;
///
/// let record = decode_record(b":i n 7\n").unwrap();
/// let field = record.get("n").unwrap().first();
/// assert_eq!(field.name(), "n");
/// assert_eq!(field.as_int(), Some(7));
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    /// A non-negative decimal integer field.
    Int {
        /// The field's name.
        name: String,
        /// The decoded value.
        value: u64,
    },
    /// A raw byte payload field.
    Blob {
        /// The field's name.
        name: String,
        /// The payload, verbatim; any byte value may appear.
        value: Vec<u8>,
    },
}

impl Field {
    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Int { name, .. } | Self::Blob { name, .. } => name,
        }
    }

    /// Returns `true` if the field is an [`Int`](Self::Int).
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int { .. })
    }

    /// Returns `true` if the field is a [`Blob`](Self::Blob).
    #[must_use]
    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Blob { .. })
    }

    /// The integer value, if this is an int field.
    #[must_use]
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int { value, .. } => Some(*value),
            Self::Blob { .. } => None,
        }
    }

    /// The raw payload, if this is a blob field.
    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob { value, .. } => Some(value),
            Self::Int { .. } => None,
        }
    }
}

// Hand-written so blob payloads print as byte strings, not integer lists.
impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { name, value } => f
                .debug_struct("Int")
                .field("name", name)
                .field("value", value)
                .finish(),
            Self::Blob { name, value } => f
                .debug_struct("Blob")
                .field("name", name)
                .field("value", &BStr::new(value))
                .finish(),
        }
    }
}

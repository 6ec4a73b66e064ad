//! The field grammar decoder.
//!
//! [`decode_field`] consumes exactly one field from the current cursor
//! position of a [`ScanBuffer`], or fails with a typed [`ParseError`]. The
//! cursor position is unspecified on failure; callers that rely on rollback
//! must bracket the attempt with [`ScanBuffer::save`] and
//! [`ScanBuffer::restore`].
//!
//! Grammar, byte-exact:
//!
//! ```text
//! field      := sep* ':' kind
//! kind       := 'i' ' ' int-body | 'b' ' ' blob-body
//! int-body   := name ' ' digits '\n'
//! blob-body  := name ' ' digits '\n' raw-bytes '\n'
//! name       := printable-ascii-byte{1,}
//! digits     := ascii-digit{1,}
//! sep        := '\n'
//! ```

use crate::{buffer::ScanBuffer, error::ParseError, field::Field};

/// Byte that opens every field (`0x3A`).
pub const FIELD_START: u8 = b':';
/// Kind byte for integer fields (`0x69`).
pub const KIND_INT: u8 = b'i';
/// Kind byte for blob fields (`0x62`).
pub const KIND_BLOB: u8 = b'b';
/// Separator between the pieces of a field (`0x20`).
pub const PIECE_SEP: u8 = b' ';
/// Record separator; also terminates digit runs (`0x0A`).
pub const RECORD_SEP: u8 = b'\n';

/// Decodes one field from the cursor position.
///
/// Digit runs accumulate into a `u64` with saturating arithmetic: an
/// arbitrarily long run decodes to `u64::MAX` rather than failing.
///
/// # Errors
///
/// [`ParseError::UnexpectedEof`] when the buffered bytes run out mid-field
/// (recoverable by appending more bytes and retrying from a save point);
/// any other variant is a fatal grammar violation.
///
/// # Examples
///
/// ```
/// use fieldmodem::{Field, ScanBuffer, decode_field};
///
/// let mut buf = ScanBuffer::from_bytes(b":i n 7\n");
/// let field = decode_field(&mut buf).unwrap();
/// assert_eq!(field, Field::Int { name: "n".into(), value: 7 });
/// ```
pub fn decode_field(buf: &mut ScanBuffer) -> Result<Field, ParseError> {
    while buf.current() == Some(RECORD_SEP) {
        buf.advance();
    }

    match buf.advance() {
        Some(FIELD_START) => {}
        Some(received) => {
            return Err(ParseError::UnexpectedByte {
                expected: FIELD_START,
                received,
            });
        }
        None => {
            return Err(ParseError::UnexpectedEof {
                expected: Some(FIELD_START),
            });
        }
    }

    let kind = buf
        .advance()
        .ok_or(ParseError::UnexpectedEof { expected: None })?;
    if kind != KIND_INT && kind != KIND_BLOB {
        return Err(ParseError::InvalidKind { received: kind });
    }

    match buf.advance() {
        Some(PIECE_SEP) => {}
        Some(received) => {
            return Err(ParseError::UnexpectedByte {
                expected: PIECE_SEP,
                received,
            });
        }
        None => {
            return Err(ParseError::UnexpectedEof {
                expected: Some(PIECE_SEP),
            });
        }
    }

    let name = read_name(buf)?;

    if kind == KIND_INT {
        let value = read_digits(buf)?;
        Ok(Field::Int { name, value })
    } else {
        let declared = read_digits(buf)?;
        let size = usize::try_from(declared).unwrap_or(usize::MAX);
        let payload = buf.take(size);
        if payload.len() < size {
            // Short read from the buffer is starvation, not a short blob.
            return Err(ParseError::UnexpectedEof { expected: None });
        }
        Ok(Field::Blob {
            name,
            value: payload.to_vec(),
        })
    }
}

/// Accumulates printable-ASCII name bytes up to the space terminator.
fn read_name(buf: &mut ScanBuffer) -> Result<String, ParseError> {
    let mut name = String::new();
    loop {
        match buf.current() {
            Some(PIECE_SEP) => {
                buf.advance();
                break;
            }
            Some(byte) if byte.is_ascii_graphic() => {
                buf.advance();
                name.push(char::from(byte));
            }
            Some(received) => {
                return Err(ParseError::UnexpectedByte {
                    expected: PIECE_SEP,
                    received,
                });
            }
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: Some(PIECE_SEP),
                });
            }
        }
    }
    if name.is_empty() {
        return Err(ParseError::MissingName);
    }
    Ok(name)
}

/// Accumulates a non-empty decimal digit run up to the newline terminator.
///
/// No sign byte is recognized; a leading `-` is rejected like any other
/// non-digit.
fn read_digits(buf: &mut ScanBuffer) -> Result<u64, ParseError> {
    let mut value: u64 = 0;
    let mut seen_digit = false;
    loop {
        match buf.current() {
            Some(byte) if byte.is_ascii_digit() => {
                buf.advance();
                seen_digit = true;
                value = value
                    .saturating_mul(10)
                    .saturating_add(u64::from(byte - b'0'));
            }
            Some(RECORD_SEP) if seen_digit => {
                buf.advance();
                return Ok(value);
            }
            Some(received) if seen_digit => {
                return Err(ParseError::UnexpectedByte {
                    expected: RECORD_SEP,
                    received,
                });
            }
            Some(received) => {
                // At least one digit is required before the terminator.
                return Err(ParseError::UnexpectedByte {
                    expected: b'0',
                    received,
                });
            }
            None => return Err(ParseError::UnexpectedEof { expected: None }),
        }
    }
}

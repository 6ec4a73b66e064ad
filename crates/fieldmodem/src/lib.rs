//! A streaming, incremental codec for a line-oriented field record format.
//!
//! The wire format is a flat sequence of named fields, each either a
//! decimal integer or a length-prefixed raw byte blob, separated by newline
//! bytes:
//!
//! ```text
//! :i width 640\n
//! :b body 5\nhello\n
//! ```
//!
//! Decoding is incremental: bytes may arrive in arbitrarily sized chunks,
//! and a field cut off at a chunk boundary is rolled back and retried once
//! more bytes arrive. [`StreamingDecoder`] is the push surface (feed
//! chunks, collect fields), [`StepDecoder`] the pull surface (explicit
//! suspend/resume with optional byte injection), and [`decode_record`] the
//! synchronous front end for fully-buffered input. [`encode_object`] is the
//! grammar's inverse, rendering a JSON-like [`Value`] tree to wire bytes.
//!
//! # Examples
//!
//! ```rust
//! use fieldmodem::StreamingDecoder;
//!
//! let mut decoder = StreamingDecoder::new();
//! decoder.feed(b":i width 640\n:b bo").unwrap();
//! decoder.feed(b"dy 5\nhello\n").unwrap();
//! let record = decoder.finish().unwrap();
//! assert_eq!(record.get("width").unwrap().first().as_int(), Some(640));
//! assert_eq!(
//!     record.get("body").unwrap().first().as_blob(),
//!     Some(b"hello".as_slice())
//! );
//! ```

mod buffer;
mod chunk_utils;
mod decoder;
mod encoder;
mod error;
mod field;
mod record;
mod step;
mod stream;
mod transform;
mod value;

#[cfg(test)]
mod tests;

pub use buffer::ScanBuffer;
pub use chunk_utils::{produce_chunks, produce_prefixes};
pub use decoder::{FIELD_START, KIND_BLOB, KIND_INT, PIECE_SEP, RECORD_SEP, decode_field};
pub use encoder::{encode_field, encode_object};
pub use error::{DecodeFailure, EncodeError, ParseError, TransformError};
pub use field::Field;
pub use record::{FieldSlot, Record};
pub use step::{Step, StepDecoder, decode_record};
pub use stream::{StreamingDecoder, decode_stream};
pub use transform::{blob_record, blob_text};
pub use value::{Map, Value};

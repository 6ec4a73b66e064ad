//! The pull-based incremental surface.
//!
//! [`StepDecoder`] exposes a cooperative suspension point after every
//! decoded field and after every starvation event. Each [`step`] call may
//! inject an additional chunk of bytes before decoding resumes, so callers
//! can mix synchronous and asynchronous feeding. [`decode_record`] is the
//! fully-synchronous drain over the same machine.
//!
//! [`step`]: StepDecoder::step

use crate::{
    buffer::ScanBuffer,
    decoder::{RECORD_SEP, decode_field},
    error::ParseError,
    field::Field,
    record::Record,
};

/// Outcome of one step of the pull surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// One field was decoded and merged into the record.
    Field(Field),
    /// The buffered bytes ran out mid-field; inject more on the next step.
    NeedData,
    /// Every buffered byte is consumed; the record is complete so far.
    Done,
}

/// A resumable, pull-based field decoder.
///
/// On starvation the cursor rolls back to the pre-attempt save point, so
/// bytes injected on the following step resume decoding from the same
/// logical position with nothing lost or duplicated. A starved decoder
/// stepped again without new bytes treats the starvation as terminal.
///
/// # Examples
///
/// ```
/// use fieldmodem::{Step, StepDecoder};
///
/// let mut decoder = StepDecoder::new();
/// assert_eq!(decoder.step(Some(b":i n 4".as_slice())).unwrap(), Step::NeedData);
/// assert!(matches!(decoder.step(Some(b"2\n".as_slice())).unwrap(), Step::Field(_)));
/// assert_eq!(decoder.step(None).unwrap(), Step::Done);
/// assert_eq!(decoder.record().get("n").unwrap().first().as_int(), Some(42));
/// ```
#[derive(Debug, Default)]
pub struct StepDecoder {
    buffer: ScanBuffer,
    record: Record,
    starved: bool,
    poisoned: Option<ParseError>,
}

impl StepDecoder {
    /// Creates a decoder with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder over already-buffered bytes.
    #[must_use]
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: ScanBuffer::from_bytes(bytes),
            ..Self::default()
        }
    }

    /// Attempts to decode the next field, optionally injecting a chunk
    /// first.
    ///
    /// # Errors
    ///
    /// A grammar violation is returned immediately and poisons the decoder;
    /// subsequent steps return the same error. Starvation becomes a
    /// terminal [`ParseError::UnexpectedEof`] only when the previous step
    /// already reported [`Step::NeedData`] and no new bytes were injected.
    pub fn step(&mut self, chunk: Option<&[u8]>) -> Result<Step, ParseError> {
        if let Some(error) = self.poisoned {
            return Err(error);
        }
        if let Some(chunk) = chunk {
            self.buffer.append(chunk);
            self.starved = false;
        }

        self.buffer.save();
        match decode_field(&mut self.buffer) {
            Ok(field) => {
                self.buffer.discard_save();
                self.buffer.evict();
                self.record.merge(field.clone());
                self.starved = false;
                Ok(Step::Field(field))
            }
            Err(error) if error.is_starvation() => {
                self.buffer.restore();
                if self.drained() {
                    Ok(Step::Done)
                } else if self.starved {
                    // Second starvation with nothing injected: the source
                    // is exhausted and the error is terminal.
                    self.poisoned = Some(error);
                    Err(error)
                } else {
                    self.starved = true;
                    Ok(Step::NeedData)
                }
            }
            Err(error) => {
                self.buffer.discard_save();
                self.poisoned = Some(error);
                Err(error)
            }
        }
    }

    /// The record built from the fields decoded so far.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Consumes the decoder, yielding the record built so far.
    #[must_use]
    pub fn into_record(self) -> Record {
        self.record
    }

    /// Whether only separator bytes (or nothing) remain unconsumed.
    fn drained(&self) -> bool {
        self.buffer.remaining().iter().all(|&byte| byte == RECORD_SEP)
    }
}

/// Decodes a complete record from fully-buffered bytes.
///
/// Drains the step surface without ever injecting additional bytes,
/// terminating with either the completed structure or the first fatal
/// error.
///
/// # Errors
///
/// The first [`ParseError`] encountered; an input that ends mid-field is
/// a terminal [`ParseError::UnexpectedEof`].
///
/// # Examples
///
/// ```
/// use fieldmodem::decode_record;
///
/// let record = decode_record(b":i width 640\n:b body 5\nhello\n").unwrap();
/// assert_eq!(record.len(), 2);
/// ```
pub fn decode_record(bytes: &[u8]) -> Result<Record, ParseError> {
    let mut decoder = StepDecoder::with_bytes(bytes);
    loop {
        match decoder.step(None)? {
            Step::Field(_) | Step::NeedData => {}
            Step::Done => return Ok(decoder.into_record()),
        }
    }
}

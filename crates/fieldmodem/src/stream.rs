//! The push-based incremental surface.
//!
//! [`StreamingDecoder`] consumes byte chunks as they arrive and decodes
//! greedily: every field completed by the current chunk is returned, and a
//! field cut off at the chunk boundary is rolled back and retried after the
//! next chunk. It is layered over [`StepDecoder`] so the push and pull
//! surfaces share one retry-on-starvation protocol and cannot diverge.

use crate::{
    error::{DecodeFailure, ParseError},
    field::Field,
    record::Record,
    step::{Step, StepDecoder},
};

/// A push-based streaming decoder.
///
/// # Examples
///
/// ```
/// use fieldmodem::StreamingDecoder;
///
/// let mut decoder = StreamingDecoder::new();
/// assert!(decoder.feed(b":i a 1\n:i b").unwrap().len() == 1);
/// assert!(decoder.feed(b" 2\n").unwrap().len() == 1);
/// let record = decoder.finish().unwrap();
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct StreamingDecoder {
    inner: StepDecoder,
}

impl StreamingDecoder {
    /// Creates a decoder awaiting its first chunk.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and decodes every field it completes.
    ///
    /// Starvation is not an error here: a field cut off at the chunk
    /// boundary is rolled back and retried after the next chunk. Returned
    /// fields are also merged into the record in decode order.
    ///
    /// # Errors
    ///
    /// The first grammar violation is returned and poisons the decoder;
    /// subsequent calls return the same error. Fields decoded earlier in
    /// the same chunk remain visible through [`partial`](Self::partial).
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Field>, ParseError> {
        let mut decoded = Vec::new();
        let mut inject = Some(chunk);
        loop {
            match self.inner.step(inject.take())? {
                Step::Field(field) => decoded.push(field),
                Step::NeedData | Step::Done => break,
            }
        }
        Ok(decoded)
    }

    /// Consumes the decoder, draining any remaining buffered bytes.
    ///
    /// Trailing record separators are a clean end; anything else must
    /// decode as complete fields. Starvation here is terminal, because the
    /// chunk source is exhausted.
    ///
    /// # Errors
    ///
    /// [`DecodeFailure`] pairs the terminal error with the record built
    /// from every field decoded before it.
    pub fn finish(mut self) -> Result<Record, DecodeFailure> {
        loop {
            match self.inner.step(None) {
                Ok(Step::Field(_) | Step::NeedData) => {}
                Ok(Step::Done) => return Ok(self.inner.into_record()),
                Err(error) => {
                    return Err(DecodeFailure {
                        error,
                        partial: self.inner.into_record(),
                    });
                }
            }
        }
    }

    /// The record built from the fields decoded so far.
    #[must_use]
    pub fn partial(&self) -> &Record {
        self.inner.record()
    }

    /// Consumes the decoder, yielding whatever record was built so far.
    #[must_use]
    pub fn into_partial(self) -> Record {
        self.inner.into_record()
    }
}

/// Drives the push surface from a source of byte chunks.
///
/// Any producer of sequential chunks works: an iterator over slices,
/// `Vec<u8>` frames from a socket loop, and so on.
///
/// # Errors
///
/// [`DecodeFailure`] on the first grammar violation or on input that ends
/// mid-field, with the partially built record attached.
///
/// # Examples
///
/// ```
/// use fieldmodem::decode_stream;
///
/// let chunks = [b":i a 1\n".as_slice(), b":b b 2\nhi\n".as_slice()];
/// let record = decode_stream(chunks).unwrap();
/// assert_eq!(record.len(), 2);
/// ```
pub fn decode_stream<I>(chunks: I) -> Result<Record, DecodeFailure>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut decoder = StreamingDecoder::new();
    for chunk in chunks {
        if let Err(error) = decoder.feed(chunk.as_ref()) {
            return Err(DecodeFailure {
                error,
                partial: decoder.into_partial(),
            });
        }
    }
    decoder.finish()
}

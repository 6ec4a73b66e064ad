//! Byte buffer with a read cursor and a LIFO stack of save points.
//!
//! `ScanBuffer` is the substrate for speculative parsing: the decoder pushes
//! a save point, consumes bytes optimistically, and the driver either
//! discards the save point on success or restores it when the buffered bytes
//! run out mid-field. Chunks arriving from a stream are appended at the back
//! without disturbing the cursor or any pending save points.

use tracing::warn;

/// A growable byte sequence owned by a single in-progress parse.
///
/// # Examples
///
/// ```
/// use fieldmodem::ScanBuffer;
///
/// let mut buf = ScanBuffer::from_bytes(b"ab");
/// buf.save();
/// assert_eq!(buf.advance(), Some(b'a'));
/// buf.restore();
/// assert_eq!(buf.current(), Some(b'a'));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScanBuffer {
    bytes: Vec<u8>,
    offset: usize,
    saves: Vec<usize>,
}

impl ScanBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer over an initial byte sequence.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            offset: 0,
            saves: Vec::new(),
        }
    }

    /// Returns the byte at the cursor without advancing, or `None` at EOF.
    #[must_use]
    pub fn current(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    /// Returns the byte at the cursor and steps past it.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.current();
        if byte.is_some() {
            self.offset += 1;
        }
        byte
    }

    /// Returns up to `n` bytes starting at the cursor without consuming them.
    ///
    /// The returned slice is shorter than `n` when the buffer runs out;
    /// callers must treat a short read as EOF, not as a complete read.
    #[must_use]
    pub fn peek(&self, n: usize) -> &[u8] {
        let start = self.offset.min(self.bytes.len());
        let end = self.offset.saturating_add(n).min(self.bytes.len());
        &self.bytes[start..end]
    }

    /// Returns up to `n` bytes starting at the cursor and consumes them.
    ///
    /// Short reads follow the same rule as [`peek`](Self::peek).
    pub fn take(&mut self, n: usize) -> &[u8] {
        let start = self.offset.min(self.bytes.len());
        let end = self.offset.saturating_add(n).min(self.bytes.len());
        self.offset = end;
        &self.bytes[start..end]
    }

    /// Appends a chunk at the end without disturbing the cursor or any
    /// pending save points.
    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Discards the consumed prefix, shifting the cursor and every save
    /// point left by the evicted count.
    pub fn evict(&mut self) {
        self.evict_to(self.offset);
    }

    /// Discards the prefix up to `upto`, clamped to the consumed region.
    ///
    /// Evicting past a live save point is a caller error: the request is
    /// logged and clamped to the oldest save point, so the buffer is never
    /// structurally corrupted.
    pub fn evict_to(&mut self, upto: usize) {
        let mut cut = upto.min(self.offset).min(self.bytes.len());
        if let Some(&floor) = self.saves.iter().min() {
            if floor < cut {
                warn!(
                    requested = cut,
                    save_point = floor,
                    "eviction would cross a live save point; clamping"
                );
                cut = floor;
            }
        }
        if cut == 0 {
            return;
        }
        self.bytes.drain(..cut);
        self.offset -= cut;
        for save in &mut self.saves {
            *save -= cut;
        }
    }

    /// Pushes the current cursor position onto the save stack.
    ///
    /// Save points nest arbitrarily with stack discipline.
    pub fn save(&mut self) {
        self.saves.push(self.offset);
    }

    /// Pops the most recent save point and rewinds the cursor to it.
    pub fn restore(&mut self) {
        debug_assert!(!self.saves.is_empty(), "restore without a matching save");
        if let Some(pos) = self.saves.pop() {
            self.offset = pos;
        }
    }

    /// Pops the most recent save point without rewinding.
    pub fn discard_save(&mut self) {
        debug_assert!(!self.saves.is_empty(), "discard without a matching save");
        self.saves.pop();
    }

    /// Whether the cursor has reached the end of the buffered bytes.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// The bytes from the cursor to the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.bytes[self.offset.min(self.bytes.len())..]
    }

    /// The cursor position, relative to the current front of the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Split `payload` into `parts` approximately equal-sized chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let end = core::cmp::min(start + chunk_size, len);
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Return a sequence of prefixes converging to `payload`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    let chunks = produce_chunks(payload, parts);
    let mut prefixes = Vec::with_capacity(chunks.len());
    let mut end = 0;
    for chunk in chunks {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}

//! Overlap computation between consecutive chunks.

/// Boundary the overlap tail is aligned to when one is present.
const SENTENCE_START_MARKER: &str = ". ";

/// Returns the tail of `text` carried into the next chunk.
///
/// Takes the trailing `overlap_chars` characters (or all of `text` when
/// shorter). If that slice contains `". "`, everything up to and
/// including the first occurrence is dropped so the overlap starts on a
/// sentence. Otherwise the raw slice is returned.
///
/// # Examples
///
/// ```
/// use studypack::chunking::overlap_tail;
///
/// assert_eq!(overlap_tail("First one. Second one. Third", 16), "Third");
/// assert_eq!(overlap_tail("no sentence marks here", 4), "here");
/// assert_eq!(overlap_tail("anything", 0), "");
/// ```
#[must_use]
pub fn overlap_tail(text: &str, overlap_chars: usize) -> &str {
    if overlap_chars == 0 {
        return "";
    }

    let tail = last_chars(text, overlap_chars);
    tail.find(SENTENCE_START_MARKER)
        .map_or(tail, |pos| &tail[pos + SENTENCE_START_MARKER.len()..])
}

/// Returns the last `n` characters of `text`.
fn last_chars(text: &str, n: usize) -> &str {
    // nth_back(n - 1) lands on the first char of the tail
    match text.char_indices().nth_back(n - 1) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}

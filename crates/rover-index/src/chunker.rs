//! Fixed-size overlap chunking for embedding-service input limits.

/// Split text into overlapping chunks of at most `chunk_size` characters.
///
/// Consecutive chunks share `overlap` characters so no meaning is lost at
/// a boundary. Splits are position-based only and may land mid-token.
/// Operates on `char` boundaries, so multibyte input never splits inside
/// a code point.
///
/// # Panics
///
/// Panics if `overlap >= chunk_size` (checked at config validation).
#[must_use]
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    assert!(overlap < chunk_size, "overlap must be smaller than chunk size");

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return vec![text.to_owned()];
    }

    let stride = chunk_size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = usize::min(start + chunk_size, chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += stride;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drop each chunk's leading overlap and concatenate; must equal the input.
    fn reconstruct(chunks: &[String], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(chunk);
            } else {
                out.extend(chunk.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn short_input_returns_single_chunk() {
        let chunks = chunk_text("short text", 8000, 200);
        assert_eq!(chunks, vec!["short text".to_owned()]);
    }

    #[test]
    fn input_at_exact_limit_returns_single_chunk() {
        let text = "x".repeat(100);
        let chunks = chunk_text(&text, 100, 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn chunk_count_matches_contract() {
        // count = ceil((L - O) / (C - O)) for L > C
        let cases = [(100usize, 30usize, 10usize), (257, 50, 10), (16000, 8000, 200)];
        for (len, chunk_size, overlap) in cases {
            let text: String = ('a'..='z').cycle().take(len).collect();
            let chunks = chunk_text(&text, chunk_size, overlap);
            let expected = (len - overlap).div_ceil(chunk_size - overlap);
            assert_eq!(chunks.len(), expected, "L={len} C={chunk_size} O={overlap}");
        }
    }

    #[test]
    fn no_chunk_exceeds_size() {
        let text: String = ('a'..='z').cycle().take(5000).collect();
        let chunks = chunk_text(&text, 300, 50);
        assert!(chunks.iter().all(|c| c.chars().count() <= 300));
    }

    #[test]
    fn chunks_start_at_stride_offsets() {
        let text: String = ('0'..='9').cycle().take(120).collect();
        let chunks = chunk_text(&text, 50, 10);
        let chars: Vec<char> = text.chars().collect();
        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * 40;
            let expected: String = chars[start..usize::min(start + 50, chars.len())]
                .iter()
                .collect();
            assert_eq!(chunk, &expected);
        }
    }

    #[test]
    fn reconstruction_reproduces_input_exactly() {
        let cases = [(100usize, 30usize, 10usize), (777, 120, 40), (5000, 300, 50)];
        for (len, chunk_size, overlap) in cases {
            let text: String = ('a'..='z').cycle().take(len).collect();
            let chunks = chunk_text(&text, chunk_size, overlap);
            assert_eq!(
                reconstruct(&chunks, overlap),
                text,
                "L={len} C={chunk_size} O={overlap}"
            );
        }
    }

    #[test]
    fn last_chunk_ends_at_input_end() {
        let text: String = ('a'..='z').cycle().take(1234).collect();
        let chunks = chunk_text(&text, 500, 100);
        let last = chunks.last().unwrap();
        assert!(text.ends_with(last.as_str()));
    }

    #[test]
    fn multibyte_input_splits_on_char_boundaries() {
        let text: String = "日本語のコード".chars().cycle().take(60).collect();
        let chunks = chunk_text(&text, 25, 5);
        assert!(chunks.iter().all(|c| c.chars().count() <= 25));
        assert_eq!(reconstruct(&chunks, 5), text);
    }

    #[test]
    #[should_panic(expected = "overlap must be smaller")]
    fn overlap_ge_chunk_size_panics() {
        let _ = chunk_text("abc", 10, 10);
    }
}

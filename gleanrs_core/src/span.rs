//! Character-offset bookkeeping for regex byte spans.

/// Maps between byte offsets (as reported by regex matches) and character
/// offsets (the unit entity and event spans are expressed in).
///
/// Built once per extraction call from the source text.
#[derive(Debug, Clone)]
pub struct CharMap {
    /// Byte offset where each character starts.
    starts: Vec<usize>,
    byte_len: usize,
}

impl CharMap {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(i, _)| i).collect(),
            byte_len: text.len(),
        }
    }

    /// Number of characters in the mapped text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.starts.len()
    }

    /// Character offset for a byte offset lying on a character boundary.
    #[must_use]
    pub fn char_of(&self, byte_offset: usize) -> usize {
        self.starts.partition_point(|&b| b < byte_offset)
    }

    /// Byte offset of a character offset. `char_len()` maps to the total
    /// byte length, so half-open char ranges convert directly.
    #[must_use]
    pub fn byte_of(&self, char_offset: usize) -> usize {
        self.starts
            .get(char_offset)
            .copied()
            .unwrap_or(self.byte_len)
    }

    /// Character window of `radius` around the span `[start, end)`,
    /// clamped to the text.
    #[must_use]
    pub fn window(&self, start: usize, end: usize, radius: usize) -> (usize, usize) {
        (
            start.saturating_sub(radius),
            end.saturating_add(radius).min(self.char_len()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_are_identity() {
        let map = CharMap::new("plain ascii");
        assert_eq!(map.char_len(), 11);
        assert_eq!(map.char_of(6), 6);
        assert_eq!(map.byte_of(6), 6);
        assert_eq!(map.byte_of(11), 11);
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'é' is two bytes, so "café " shifts everything after it.
        let text = "café au lait";
        let map = CharMap::new(text);
        assert_eq!(map.char_len(), 12);
        assert_eq!(text.len(), 13);
        let byte_of_au = text.find("au").unwrap_or(0);
        assert_eq!(map.char_of(byte_of_au), 5);
        assert_eq!(map.byte_of(5), byte_of_au);
        assert_eq!(map.byte_of(12), 13);
    }

    #[test]
    fn test_window_clamps_to_text() {
        let map = CharMap::new("0123456789");
        assert_eq!(map.window(2, 4, 50), (0, 10));
        assert_eq!(map.window(4, 6, 2), (2, 8));
        assert_eq!(map.window(0, 0, 3), (0, 3));
    }
}

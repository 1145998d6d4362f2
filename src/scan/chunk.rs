use std::ops::Range;

pub const MAX_CHUNK_SIZE: usize = 500_000;

/// Bytes shared by consecutive chunks so that short matches straddling a
/// cut are still seen whole by one of them.
pub const CHUNK_OVERLAP: usize = 4_096;

/// Byte windows over `text`, each at most `size` bytes and cut on char
/// boundaries. Consecutive windows overlap by up to `overlap` bytes.
pub fn windows(text: &str, size: usize, overlap: usize) -> Vec<Range<usize>> {
    let len = text.len();
    if len <= size {
        return vec![0..len];
    }
    let overlap = overlap.min(size / 2);

    let mut out = Vec::new();
    let mut start = 0;
    loop {
        let end = floor_boundary(text, (start + size).min(len));
        // A single char wider than the window; take it whole.
        let end = if end <= start { ceil_boundary(text, start + 1) } else { end };
        out.push(start..end);
        if end >= len {
            break;
        }
        let next = floor_boundary(text, end.saturating_sub(overlap));
        start = if next <= start { end } else { next };
    }
    out
}

fn floor_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_is_one_window() {
        assert_eq!(windows("hello", 10, 2), vec![0..5]);
        assert_eq!(windows("", 10, 2), vec![0..0]);
    }

    #[test]
    fn test_windows_cover_text_with_overlap() {
        let text = "a".repeat(25);
        let w = windows(&text, 10, 3);
        assert_eq!(w.first().unwrap().start, 0);
        assert_eq!(w.last().unwrap().end, 25);
        for pair in w.windows(2) {
            assert!(pair[1].start < pair[0].end);
            assert_eq!(pair[0].end - pair[1].start, 3);
        }
    }

    #[test]
    fn test_cuts_respect_char_boundaries() {
        let text = "联系电话".repeat(10);
        for range in windows(&text, 7, 2) {
            assert!(text.is_char_boundary(range.start));
            assert!(text.is_char_boundary(range.end));
            assert!(!text[range].is_empty());
        }
    }
}

//! Boyer-Moore-Horspool search
use crate::search_algorithms::SearchAlgorithmTrait;

/// Bad-character shift table keyed by byte value.
///
/// Every byte of `pattern[..m - 1]` maps to `m - 1 - last_index`; bytes that
/// do not occur in that prefix shift by the full pattern length.
#[derive(Debug, Clone)]
pub struct ShiftTable {
    shifts: [usize; 256],
}

impl ShiftTable {
    /// Build the table for a non-empty pattern.
    pub fn build(pattern: &[u8]) -> Self {
        let m = pattern.len();
        let mut shifts = [m; 256];

        // Left to right, so the last occurrence of a repeated byte wins.
        for (i, &byte) in pattern[..m.saturating_sub(1)].iter().enumerate() {
            shifts[byte as usize] = m - 1 - i;
        }

        Self { shifts }
    }

    #[inline]
    pub fn shift(&self, byte: u8) -> usize {
        self.shifts[byte as usize]
    }
}

/// Boyer-Moore-Horspool string search
///
/// Only the bad-character rule is used, always keyed on the text byte under
/// the last pattern position. The table lives on the stack and is rebuilt on
/// every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Horspool;

impl Horspool {
    pub fn find(text: &[u8], pattern: &[u8]) -> Option<usize> {
        let n = text.len();
        let m = pattern.len();

        if m == 0 {
            return Some(0);
        }
        if m > n {
            return None;
        }

        let table = ShiftTable::build(pattern);
        let last = m - 1;
        let mut i = 0;

        while i <= n - m {
            let mut j = last;
            while pattern[j] == text[i + j] {
                if j == 0 {
                    return Some(i);
                }
                j -= 1;
            }
            i += table.shift(text[i + last]);
        }

        None
    }
}

impl SearchAlgorithmTrait for Horspool {
    fn search(&self, text: &[u8], pattern: &[u8]) -> Option<usize> {
        Self::find(text, pattern)
    }

    fn name(&self) -> &'static str {
        "Boyer-Moore-Horspool"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_table_uses_last_occurrence_in_prefix() {
        let table = ShiftTable::build(b"abcab");

        // 'a' last appears at index 3 of the prefix "abca"
        assert_eq!(table.shift(b'a'), 1);
        assert_eq!(table.shift(b'b'), 3);
        assert_eq!(table.shift(b'c'), 2);
        // the final byte alone does not count
        assert_eq!(ShiftTable::build(b"xyz").shift(b'z'), 3);
        assert_eq!(table.shift(b'q'), 5);
    }

    #[test]
    fn single_byte_pattern_shifts_by_one() {
        let table = ShiftTable::build(b"a");
        assert_eq!(table.shift(b'a'), 1);
        assert_eq!(table.shift(b'b'), 1);
        assert_eq!(Horspool::find(b"bbba", b"a"), Some(3));
    }

    #[test]
    fn finds_leftmost_match() {
        assert_eq!(
            Horspool::find(b"abcxabcdabxabcdabcdabcy", b"abcdabcy"),
            Some(15)
        );
        assert_eq!(Horspool::find(b"aaaaaaaaaa", b"aaaa"), Some(0));
        assert_eq!(Horspool::find(b"hello world", b"world"), Some(6));
    }

    #[test]
    fn edge_cases() {
        assert_eq!(Horspool::find(b"anything", b""), Some(0));
        assert_eq!(Horspool::find(b"", b""), Some(0));
        assert_eq!(Horspool::find(b"", b"x"), None);
        assert_eq!(Horspool::find(b"hi", b"hello"), None);
        assert_eq!(Horspool::find(b"Hello", b"hello"), None);
    }
}

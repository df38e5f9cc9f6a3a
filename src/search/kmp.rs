//! Knuth-Morris-Pratt search
use crate::search_algorithms::SearchAlgorithmTrait;

/// Build the "longest proper prefix which is also suffix" (LPS) table.
///
/// `lps[i]` is the length of the longest proper prefix of `pattern[..=i]`
/// that is also a suffix of it.
pub fn build_lps(pattern: &[u8]) -> Vec<usize> {
    let m = pattern.len();
    let mut lps = vec![0; m];

    let mut len = 0;
    let mut i = 1;

    while i < m {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }

    lps
}

/// Knuth-Morris-Pratt string search
///
/// Never moves backwards in the text. The LPS table is the only per-call
/// allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kmp;

impl Kmp {
    pub fn find(text: &[u8], pattern: &[u8]) -> Option<usize> {
        let n = text.len();
        let m = pattern.len();

        if m == 0 {
            return Some(0);
        }
        if m > n {
            return None;
        }

        let lps = build_lps(pattern);

        let mut i = 0;
        let mut j = 0;

        while i < n {
            if text[i] == pattern[j] {
                i += 1;
                j += 1;

                if j == m {
                    return Some(i - m);
                }
            } else if j != 0 {
                j = lps[j - 1];
            } else {
                i += 1;
            }
        }

        None
    }
}

impl SearchAlgorithmTrait for Kmp {
    fn search(&self, text: &[u8], pattern: &[u8]) -> Option<usize> {
        Self::find(text, pattern)
    }

    fn name(&self) -> &'static str {
        "Knuth-Morris-Pratt"
    }
}

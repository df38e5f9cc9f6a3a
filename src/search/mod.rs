//! Exact single-pattern matchers
pub mod horspool;
pub mod kmp;
pub mod rabin_karp;

pub use horspool::{Horspool, ShiftTable};
pub use kmp::{build_lps, Kmp};
pub use rabin_karp::{RabinKarp, DEFAULT_BASE, DEFAULT_MODULUS};

/// Brute-force O(n*m) search, used as the reference in differential tests.
pub fn naive_find(text: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.len() > text.len() {
        return None;
    }
    (0..=text.len() - pattern.len()).find(|&i| &text[i..i + pattern.len()] == pattern)
}

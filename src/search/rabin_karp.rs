//! Rabin-Karp algorithm for rolling hash search
use crate::error::{MatchbenchError, Result};
use crate::search_algorithms::SearchAlgorithmTrait;

pub const DEFAULT_BASE: u64 = 256;
pub const DEFAULT_MODULUS: u64 = 1_000_000_007;

/// `(a * b) % modulus` without overflow for any 64-bit operands.
#[inline]
fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: usize, modulus: u64) -> u64 {
    let mut result = 1 % modulus;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    result
}

/// Polynomial hash of a window, rolled one byte at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RollingHash {
    value: u64,
    base: u64,
    modulus: u64,
    /// `base^(m-1) % modulus`, the weight of the outgoing byte.
    lead: u64,
}

impl RollingHash {
    fn new(window: &[u8], base: u64, modulus: u64) -> Self {
        let m = modulus as u128;
        let mut value = 0u64;
        for &byte in window {
            value = ((value as u128 * base as u128 + byte as u128) % m) as u64;
        }
        let lead = pow_mod(base, window.len().saturating_sub(1), modulus);

        Self {
            value,
            base,
            modulus,
            lead,
        }
    }

    #[inline]
    fn roll(&mut self, outgoing: u8, incoming: u8) {
        let m = self.modulus as u128;
        let out = mul_mod(outgoing as u64, self.lead, self.modulus) as u128;
        // Add the modulus before subtracting so the difference stays in [0, 2m).
        let without = (self.value as u128 + m - out) % m;
        self.value = ((without * self.base as u128 + incoming as u128) % m) as u64;
    }
}

/// Rabin-Karp string search with configurable base and modulus
///
/// A hash hit is always confirmed by a direct comparison of the window, so a
/// collision can never surface as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RabinKarp {
    base: u64,
    modulus: u64,
}

impl Default for RabinKarp {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
        }
    }
}

impl RabinKarp {
    pub fn new(base: u64, modulus: u64) -> Result<Self> {
        if modulus == 0 {
            return Err(MatchbenchError::Config(
                "Rabin-Karp modulus must be at least 1".to_string(),
            ));
        }
        if base == 0 {
            return Err(MatchbenchError::Config(
                "Rabin-Karp base must be at least 1".to_string(),
            ));
        }
        Ok(Self { base, modulus })
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn find(&self, text: &[u8], pattern: &[u8]) -> Option<usize> {
        let n = text.len();
        let m = pattern.len();

        if m == 0 {
            return Some(0);
        }
        if m > n {
            return None;
        }

        let base = self.base % self.modulus;
        let pattern_hash = RollingHash::new(pattern, base, self.modulus).value;
        let mut window = RollingHash::new(&text[..m], base, self.modulus);

        for i in 0..=n - m {
            if window.value == pattern_hash && &text[i..i + m] == pattern {
                return Some(i);
            }
            if i < n - m {
                window.roll(text[i], text[i + m]);
            }
        }

        None
    }
}

impl SearchAlgorithmTrait for RabinKarp {
    fn search(&self, text: &[u8], pattern: &[u8]) -> Option<usize> {
        self.find(text, pattern)
    }

    fn name(&self) -> &'static str {
        "Rabin-Karp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolled_hash_matches_fresh_hash() {
        let text = b"the quick brown fox jumps over the lazy dog";
        let m = 7;
        let mut rolling = RollingHash::new(&text[..m], DEFAULT_BASE, DEFAULT_MODULUS);

        for i in 1..=text.len() - m {
            rolling.roll(text[i - 1], text[i + m - 1]);
            let fresh = RollingHash::new(&text[i..i + m], DEFAULT_BASE, DEFAULT_MODULUS);
            assert_eq!(rolling.value, fresh.value, "window at {i}");
        }
    }

    #[test]
    fn subtraction_never_underflows() {
        // Small modulus makes `value < outgoing * lead` the common case.
        let text = b"\xff\x00\xff\x00\xfe\x01";
        let mut rolling = RollingHash::new(&text[..3], 256, 7);
        for i in 1..=text.len() - 3 {
            rolling.roll(text[i - 1], text[i + 2]);
            assert_eq!(rolling.value, RollingHash::new(&text[i..i + 3], 256, 7).value);
        }
    }

    #[test]
    fn pow_mod_values() {
        assert_eq!(pow_mod(256, 0, DEFAULT_MODULUS), 1);
        assert_eq!(pow_mod(2, 10, 1_000), 24);
        assert_eq!(pow_mod(5, 3, 1), 0);
    }

    #[test]
    fn collisions_are_rejected() {
        // With modulus 1 every window collides with the pattern.
        let rk = RabinKarp::new(256, 1).unwrap();
        assert_eq!(rk.find(b"abcdefgh", b"xyz"), None);
        assert_eq!(rk.find(b"abcdefgh", b"def"), Some(3));

        // "ab" and "ba" share a hash under base 1.
        let rk = RabinKarp::new(1, DEFAULT_MODULUS).unwrap();
        assert_eq!(rk.find(b"bab", b"ab"), Some(1));
        assert_eq!(rk.find(b"ba", b"ab"), None);
    }

    #[test]
    fn finds_leftmost_match() {
        let rk = RabinKarp::default();
        assert_eq!(rk.find(b"abcxabcdabxabcdabcdabcy", b"abcdabcy"), Some(15));
        assert_eq!(rk.find(b"aaaaaaaaaa", b"aaaa"), Some(0));
        assert_eq!(rk.find(b"match at end", b"end"), Some(9));
    }

    #[test]
    fn edge_cases() {
        let rk = RabinKarp::default();
        assert_eq!(rk.find(b"abc", b""), Some(0));
        assert_eq!(rk.find(b"", b"x"), None);
        assert_eq!(rk.find(b"ab", b"abc"), None);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(matches!(
            RabinKarp::new(256, 0),
            Err(MatchbenchError::Config(_))
        ));
        assert!(RabinKarp::new(0, 101).is_err());
        let rk = RabinKarp::new(31, u64::MAX).unwrap();
        assert_eq!(rk.find(b"needle in haystack", b"hay"), Some(10));
    }
}

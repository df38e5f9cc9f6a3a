use crate::search::{Horspool, Kmp, RabinKarp};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for exact single-pattern search algorithms
///
/// Implementations return the byte offset of the leftmost occurrence of
/// `pattern` in `text`. An empty pattern matches at offset 0.
pub trait SearchAlgorithmTrait {
    fn search(&self, text: &[u8], pattern: &[u8]) -> Option<usize>;

    fn name(&self) -> &'static str;

    fn search_str(&self, text: &str, pattern: &str) -> Option<usize> {
        self.search(text.as_bytes(), pattern.as_bytes())
    }
}

/// Search algorithm types
#[derive(
    ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    Horspool,
    Kmp,
    RabinKarp,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 3] = [
        SearchAlgorithm::Horspool,
        SearchAlgorithm::Kmp,
        SearchAlgorithm::RabinKarp,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SearchAlgorithm::Horspool => "Boyer-Moore-Horspool",
            SearchAlgorithm::Kmp => "Knuth-Morris-Pratt",
            SearchAlgorithm::RabinKarp => "Rabin-Karp",
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Search algorithm factory
pub struct SearchAlgorithmFactory;

impl SearchAlgorithmFactory {
    /// `rabin_karp` carries the hash parameters; the other matchers have none.
    pub fn create(
        algorithm: SearchAlgorithm,
        rabin_karp: RabinKarp,
    ) -> Box<dyn SearchAlgorithmTrait> {
        match algorithm {
            SearchAlgorithm::Horspool => Box::new(Horspool),
            SearchAlgorithm::Kmp => Box::new(Kmp),
            SearchAlgorithm::RabinKarp => Box::new(rabin_karp),
        }
    }

    pub fn create_all(
        algorithms: &[SearchAlgorithm],
        rabin_karp: RabinKarp,
    ) -> Vec<(SearchAlgorithm, Box<dyn SearchAlgorithmTrait>)> {
        algorithms
            .iter()
            .map(|&algorithm| (algorithm, Self::create(algorithm, rabin_karp)))
            .collect()
    }
}

/// Containment check independent of the matchers under test.
pub fn reference_contains(text: &str, pattern: &str) -> bool {
    memchr::memmem::find(text.as_bytes(), pattern.as_bytes()).is_some()
}

/// Location of a match within a text, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Byte offset of the match start.
    pub offset: usize,
    /// 1-based line number.
    pub line_number: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    pub line: String,
}

impl SearchMatch {
    /// Resolve a byte offset returned by a matcher into line and column.
    ///
    /// Returns `None` when the offset or match end do not fall on character
    /// boundaries, which can happen for byte-wise matches of non-UTF-8 data.
    pub fn locate(text: &str, offset: usize, len: usize) -> Option<Self> {
        let end = offset.checked_add(len)?;
        if !text.is_char_boundary(offset) || !text.is_char_boundary(end) || end > text.len() {
            return None;
        }

        let line_start = text[..offset].rfind('\n').map_or(0, |pos| pos + 1);
        let line_end = text[offset..]
            .find('\n')
            .map_or(text.len(), |pos| offset + pos);
        let line_number = text[..offset].matches('\n').count() + 1;
        let column = text[line_start..offset].chars().count() + 1;

        Some(Self {
            offset,
            line_number,
            column,
            line: text[line_start..line_end].trim_end_matches('\r').to_string(),
        })
    }
}

impl fmt::Display for SearchMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (byte {}): {}",
            self.line_number, self.column, self.offset, self.line
        )
    }
}

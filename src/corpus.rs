//! Benchmark corpora: decoded texts and the patterns measured against them
use crate::config::{CorpusConfig, InputConfig};
use crate::error::{MatchbenchError, Result};
use crate::search_algorithms::reference_contains;
use encoding_rs::Encoding;
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode raw bytes, trying each encoding in order.
///
/// Falls back to lossy UTF-8 when none of them decodes cleanly, so this never
/// fails. The returned label names the encoding that was used.
pub fn decode_text(bytes: &[u8], encodings: &[&'static Encoding]) -> (String, &'static str) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    for encoding in encodings {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return (text.into_owned(), encoding.name());
        }
    }

    (String::from_utf8_lossy(bytes).into_owned(), "lossy")
}

/// Resolve encoding labels such as `utf-8` or `cp1251`.
pub fn resolve_encodings(labels: &[String]) -> Result<Vec<&'static Encoding>> {
    labels
        .iter()
        .map(|label| {
            Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                MatchbenchError::Config(format!("Unknown text encoding: '{label}'"))
            })
        })
        .collect()
}

/// Read a file and decode it with the configured encoding fallback.
pub fn read_text_auto(path: &Path, encodings: &[&'static Encoding]) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, used) = decode_text(&bytes, encodings);

    if used == "lossy" {
        warn!(
            "{}: no configured encoding matched, decoded lossily",
            path.display()
        );
    } else {
        debug!("{}: decoded as {used} ({} bytes)", path.display(), bytes.len());
    }

    Ok(text)
}

/// Whether a pattern must or must not occur in its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    Present,
    Absent,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Present => write!(f, "present"),
            Expectation::Absent => write!(f, "absent"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatternCase {
    pub label: String,
    pub pattern: String,
    pub expectation: Expectation,
}

impl PatternCase {
    pub fn present(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
            expectation: Expectation::Present,
        }
    }

    pub fn absent(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
            expectation: Expectation::Absent,
        }
    }
}

/// A text held in memory together with its pattern cases
#[derive(Debug, Clone)]
pub struct Corpus {
    pub label: String,
    pub text: String,
    pub cases: Vec<PatternCase>,
}

impl Corpus {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            cases: Vec::new(),
        }
    }

    pub fn with_case(mut self, case: PatternCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Load a configured corpus. Relative paths resolve against `base_dir`.
    pub fn load(config: &CorpusConfig, input: &InputConfig, base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(&config.path);
        let encodings = resolve_encodings(&input.encodings)?;
        let text = read_text_auto(&path, &encodings).map_err(|e| match e {
            MatchbenchError::Io(source) => MatchbenchError::Config(format!(
                "Failed to read corpus '{}' from {}: {source}",
                config.label,
                path.display()
            )),
            other => other,
        })?;

        let cases = config
            .present
            .iter()
            .map(|p| PatternCase::present(&p.label, &p.pattern))
            .chain(
                config
                    .absent
                    .iter()
                    .map(|p| PatternCase::absent(&p.label, &p.pattern)),
            )
            .collect();

        Ok(Self {
            label: config.label.clone(),
            text,
            cases,
        })
    }

    /// Check every case against the reference containment check.
    pub fn verify(&self) -> Result<()> {
        for case in &self.cases {
            let found = reference_contains(&self.text, &case.pattern);
            let ok = match case.expectation {
                Expectation::Present => found,
                Expectation::Absent => !found,
            };
            if !ok {
                return Err(MatchbenchError::Preflight {
                    text: self.label.clone(),
                    pattern: case.pattern.clone(),
                    expected: case.expectation,
                });
            }
        }
        Ok(())
    }
}

/// Verify all corpora before any timing; the first violation aborts.
///
/// Labels must be unique: corpus labels overall, case labels within a corpus.
pub fn preflight(corpora: &[Corpus]) -> Result<usize> {
    if corpora.is_empty() {
        return Err(MatchbenchError::NoCorpora);
    }

    let mut corpus_labels = HashSet::new();
    for corpus in corpora {
        if !corpus_labels.insert(corpus.label.as_str()) {
            return Err(MatchbenchError::Config(format!(
                "duplicate corpus label '{}'",
                corpus.label
            )));
        }
        let mut case_labels = HashSet::new();
        for case in &corpus.cases {
            if !case_labels.insert(case.label.as_str()) {
                return Err(MatchbenchError::Config(format!(
                    "duplicate pattern label '{}' in corpus '{}'",
                    case.label, corpus.label
                )));
            }
        }
    }

    let mut verified = 0;
    for corpus in corpora {
        corpus.verify()?;
        verified += corpus.cases.len();
    }
    Ok(verified)
}

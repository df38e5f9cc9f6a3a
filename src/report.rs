//! Aggregation and ranking of benchmark results
use crate::benchmark::TimingPlan;
use crate::search_algorithms::SearchAlgorithm;
use serde::Serialize;
use std::fmt;

/// Best-of-trials per-call time for one (text, pattern, algorithm) cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub text: String,
    pub pattern: String,
    pub algorithm: SearchAlgorithm,
    pub seconds: f64,
}

/// Results sharing a text and a pattern, fastest first
#[derive(Debug)]
pub struct ResultGroup<'a> {
    pub text: &'a str,
    pub pattern: &'a str,
    pub entries: Vec<&'a BenchmarkResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlgorithmTotal {
    pub algorithm: SearchAlgorithm,
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryScope {
    Text(String),
    Overall,
}

impl fmt::Display for SummaryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryScope::Text(label) => write!(f, "{label}"),
            SummaryScope::Overall => write!(f, "overall"),
        }
    }
}

/// The fastest algorithm of a grouping, by summed time over its patterns
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub scope: SummaryScope,
    pub patterns: usize,
    pub fastest: AlgorithmTotal,
}

#[derive(Debug, Clone)]
pub struct Report {
    plan: TimingPlan,
    results: Vec<BenchmarkResult>,
}

impl Report {
    pub fn new(plan: TimingPlan, results: Vec<BenchmarkResult>) -> Self {
        Self { plan, results }
    }

    pub fn plan(&self) -> TimingPlan {
        self.plan
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Text labels in the order they were measured.
    pub fn text_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for result in &self.results {
            if !labels.contains(&result.text.as_str()) {
                labels.push(&result.text);
            }
        }
        labels
    }

    /// One group per (text, pattern) in measurement order, each sorted by
    /// ascending duration.
    pub fn groups(&self) -> Vec<ResultGroup<'_>> {
        let mut groups: Vec<ResultGroup<'_>> = Vec::new();
        for result in &self.results {
            match groups
                .iter_mut()
                .find(|g| g.text == result.text && g.pattern == result.pattern)
            {
                Some(group) => group.entries.push(result),
                None => groups.push(ResultGroup {
                    text: &result.text,
                    pattern: &result.pattern,
                    entries: vec![result],
                }),
            }
        }
        for group in &mut groups {
            group
                .entries
                .sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
        }
        groups
    }

    /// Per-algorithm time summed over the selected results, ascending.
    /// Equal totals keep first-measured order.
    pub fn totals_by<F>(&self, filter: F) -> Vec<AlgorithmTotal>
    where
        F: Fn(&BenchmarkResult) -> bool,
    {
        let mut totals: Vec<AlgorithmTotal> = Vec::new();
        for result in self.results.iter().filter(|r| filter(r)) {
            match totals.iter_mut().find(|t| t.algorithm == result.algorithm) {
                Some(total) => total.seconds += result.seconds,
                None => totals.push(AlgorithmTotal {
                    algorithm: result.algorithm,
                    seconds: result.seconds,
                }),
            }
        }
        totals.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
        totals
    }

    pub fn fastest_by<F>(&self, filter: F) -> Option<AlgorithmTotal>
    where
        F: Fn(&BenchmarkResult) -> bool,
    {
        self.totals_by(filter).into_iter().next()
    }

    pub fn fastest_for_text(&self, text: &str) -> Option<AlgorithmTotal> {
        self.fastest_by(|r| r.text == text)
    }

    pub fn fastest_overall(&self) -> Option<AlgorithmTotal> {
        self.fastest_by(|_| true)
    }

    fn pattern_count<F>(&self, filter: F) -> usize
    where
        F: Fn(&BenchmarkResult) -> bool,
    {
        let mut seen: Vec<(&str, &str)> = Vec::new();
        for result in self.results.iter().filter(|r| filter(r)) {
            let key = (result.text.as_str(), result.pattern.as_str());
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        seen.len()
    }

    /// Fastest algorithm per text, then across everything.
    pub fn summaries(&self) -> Vec<Summary> {
        let mut summaries: Vec<Summary> = self
            .text_labels()
            .into_iter()
            .filter_map(|text| {
                self.fastest_for_text(text).map(|fastest| Summary {
                    scope: SummaryScope::Text(text.to_string()),
                    patterns: self.pattern_count(|r| r.text == text),
                    fastest,
                })
            })
            .collect();

        if let Some(fastest) = self.fastest_overall() {
            summaries.push(Summary {
                scope: SummaryScope::Overall,
                patterns: self.pattern_count(|_| true),
                fastest,
            });
        }
        summaries
    }
}

//! Best-of-trials timing harness and the text x pattern x algorithm matrix
use crate::corpus::{preflight, Corpus};
use crate::error::Result;
use crate::metrics::Metrics;
use crate::progress::ProgressReporter;
use crate::report::{BenchmarkResult, Report};
use crate::search_algorithms::{SearchAlgorithm, SearchAlgorithmTrait};
use log::{debug, info};
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Smallest duration a group can report; below this the clock cannot resolve.
const TIMER_FLOOR: Duration = Duration::from_nanos(1);

/// How many calls make up one measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPlan {
    /// Back-to-back calls per timed group.
    pub repeats: NonZeroUsize,
    /// Timed groups; only the fastest counts.
    pub trials: NonZeroUsize,
}

impl TimingPlan {
    pub fn new(repeats: NonZeroUsize, trials: NonZeroUsize) -> Self {
        Self { repeats, trials }
    }

    /// Total matcher invocations per cell.
    pub fn calls(&self) -> usize {
        self.repeats.get().saturating_mul(self.trials.get())
    }
}

/// Time `trials` groups of `repeats` calls each and return the best group's
/// per-call duration in seconds.
///
/// The minimum, not the mean, is reported: noise only ever adds time. The
/// result of every call goes through `black_box` and is otherwise ignored,
/// so a miss costs the same as a hit.
pub fn measure(
    algorithm: &dyn SearchAlgorithmTrait,
    text: &[u8],
    pattern: &[u8],
    repeats: NonZeroUsize,
    trials: NonZeroUsize,
) -> f64 {
    let mut best = Duration::MAX;

    for _ in 0..trials.get() {
        let start = Instant::now();
        for _ in 0..repeats.get() {
            black_box(algorithm.search(black_box(text), black_box(pattern)));
        }
        best = best.min(start.elapsed());
    }

    best.max(TIMER_FLOOR).as_secs_f64() / repeats.get() as f64
}

/// Drives the harness across every corpus, pattern and algorithm
pub struct BenchmarkRunner<'a> {
    plan: TimingPlan,
    algorithms: Vec<(SearchAlgorithm, Box<dyn SearchAlgorithmTrait>)>,
    metrics: Option<&'a Metrics>,
    show_progress: bool,
}

impl<'a> BenchmarkRunner<'a> {
    pub fn new(
        plan: TimingPlan,
        algorithms: Vec<(SearchAlgorithm, Box<dyn SearchAlgorithmTrait>)>,
    ) -> Self {
        Self {
            plan,
            algorithms,
            metrics: None,
            show_progress: false,
        }
    }

    pub fn with_metrics(mut self, metrics: &'a Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Verify the corpora, then measure every cell in order.
    ///
    /// Nothing is timed if the pre-flight check fails.
    pub fn run(&self, corpora: &[Corpus]) -> Result<Report> {
        let verified = preflight(corpora)?;
        if let Some(metrics) = self.metrics {
            metrics.cases_verified.inc_by(verified as u64);
        }
        info!(
            "Pre-flight passed for {verified} pattern(s) across {} text(s)",
            corpora.len()
        );

        let cells: usize = corpora
            .iter()
            .map(|c| c.cases.len() * self.algorithms.len())
            .sum();
        let progress = self
            .show_progress
            .then(|| ProgressReporter::new(cells, self.plan.calls()));

        let mut results = Vec::with_capacity(cells);
        for corpus in corpora {
            for case in &corpus.cases {
                for (kind, algorithm) in &self.algorithms {
                    if let Some(progress) = &progress {
                        progress.start_cell(&corpus.label, &case.label, *kind);
                    }

                    let seconds = measure(
                        algorithm.as_ref(),
                        corpus.text.as_bytes(),
                        case.pattern.as_bytes(),
                        self.plan.repeats,
                        self.plan.trials,
                    );
                    debug!(
                        "{} / {} / {}: {:.3} us per call",
                        corpus.label,
                        case.label,
                        kind,
                        seconds * 1e6
                    );

                    if let Some(metrics) = self.metrics {
                        metrics.cells_measured.inc();
                        metrics.searches_timed.inc_by(self.plan.calls() as u64);
                    }
                    if let Some(progress) = &progress {
                        progress.finish_cell();
                    }

                    results.push(BenchmarkResult {
                        text: corpus.label.clone(),
                        pattern: case.label.clone(),
                        algorithm: *kind,
                        seconds,
                    });
                }
            }
        }

        if let Some(progress) = progress {
            progress.finish();
        }
        Ok(Report::new(self.plan, results))
    }
}

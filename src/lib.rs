//! Exact string matching benchmark.
//!
//! Boyer-Moore-Horspool, Knuth-Morris-Pratt and Rabin-Karp behind one
//! [`SearchAlgorithmTrait`], a best-of-trials timing harness, and a report
//! that ranks the algorithms per text and overall.
pub mod benchmark;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod output_formats;
mod progress;
pub mod report;
pub mod search;
pub mod search_algorithms;

pub use benchmark::{measure, BenchmarkRunner, TimingPlan};
pub use clap::Parser;
pub use cli::{Cli, Commands, RunArgs};
pub use config::Config;
pub use corpus::{preflight, read_text_auto, Corpus, Expectation, PatternCase};
pub use error::{MatchbenchError, Result};
pub use metrics::Metrics;
pub use output_formats::{OutputFormat, OutputFormatter, TimeUnit};
pub use report::{BenchmarkResult, Report};
pub use search::{Horspool, Kmp, RabinKarp};
pub use search_algorithms::{SearchAlgorithm, SearchAlgorithmFactory, SearchAlgorithmTrait, SearchMatch};

use log::info;
use std::path::PathBuf;

/// Configuration resolved from the config file and command line
pub struct AppConfig {
    pub config: Config,
    /// Corpus paths are relative to this directory.
    pub base_dir: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (config, base_dir) = Config::load(cli.config.as_deref())?;
        Ok(Self { config, base_dir })
    }

    /// Timing plan with command-line overrides applied.
    pub fn timing_plan(&self, args: &RunArgs) -> TimingPlan {
        TimingPlan::new(
            args.repeats.unwrap_or(self.config.benchmark.repeats),
            args.trials.unwrap_or(self.config.benchmark.trials),
        )
    }

    pub fn algorithms(&self, args: &RunArgs) -> Vec<SearchAlgorithm> {
        let mut algorithms = args
            .algorithms
            .clone()
            .unwrap_or_else(|| self.config.benchmark.algorithms.clone());
        let mut seen = Vec::with_capacity(algorithms.len());
        algorithms.retain(|a| {
            let first = !seen.contains(a);
            seen.push(*a);
            first
        });
        algorithms
    }

    pub fn load_corpora(&self) -> Result<Vec<Corpus>> {
        let corpora = self
            .config
            .corpora
            .iter()
            .map(|c| Corpus::load(c, &self.config.input, &self.base_dir))
            .collect::<Result<Vec<_>>>()?;
        if corpora.is_empty() {
            return Err(MatchbenchError::NoCorpora);
        }
        Ok(corpora)
    }
}

/// Load corpora, verify them and measure every configured algorithm.
pub fn run_benchmarks(
    app: &AppConfig,
    args: &RunArgs,
    metrics: &Metrics,
    show_progress: bool,
) -> Result<Report> {
    let plan = app.timing_plan(args);
    let algorithms = app.algorithms(args);
    let rabin_karp = app.config.rabin_karp.matcher()?;
    let corpora = app.load_corpora()?;

    info!(
        "Benchmarking {} algorithm(s) on {} text(s): best of {} x {} calls",
        algorithms.len(),
        corpora.len(),
        plan.trials,
        plan.repeats
    );

    BenchmarkRunner::new(plan, SearchAlgorithmFactory::create_all(&algorithms, rabin_karp))
        .with_metrics(metrics)
        .with_progress(show_progress)
        .run(&corpora)
}

/// Render a report according to the run arguments and display settings.
pub fn render_report(app: &AppConfig, args: &RunArgs, report: &Report) -> Result<String> {
    OutputFormatter::new(args.format)
        .with_unit(args.unit.unwrap_or(app.config.display.unit))
        .with_summary(app.config.display.show_summary)
        .format_report(report)
}

use crate::search_algorithms::SearchAlgorithm;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ProgressStats {
    pub cells_measured: usize,
    pub searches_timed: u64,
    start_time: Instant,
}

/// Progress over the benchmark matrix, drawn on stderr
pub struct ProgressReporter {
    bar: ProgressBar,
    stats: Mutex<ProgressStats>,
    calls_per_cell: usize,
}

impl ProgressReporter {
    pub fn new(total_cells: usize, calls_per_cell: usize) -> Self {
        let bar = ProgressBar::with_draw_target(
            Some(total_cells as u64),
            ProgressDrawTarget::stderr(),
        );
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} cells\n{msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            bar,
            stats: Mutex::new(ProgressStats {
                cells_measured: 0,
                searches_timed: 0,
                start_time: Instant::now(),
            }),
            calls_per_cell,
        }
    }

    pub fn start_cell(&self, text: &str, pattern: &str, algorithm: SearchAlgorithm) {
        self.bar
            .set_message(format!("{text} / {pattern} / {algorithm}"));
    }

    pub fn finish_cell(&self) {
        let mut stats = self.stats.lock();
        stats.cells_measured += 1;
        stats.searches_timed += self.calls_per_cell as u64;
        self.bar.inc(1);
    }

    pub fn finish(self) -> ProgressStats {
        let stats = self.stats.lock().clone();
        self.bar.finish_and_clear();
        log::info!(
            "Measured {} cells ({} timed searches) in {:.2}s",
            stats.cells_measured,
            stats.searches_timed,
            stats.start_time.elapsed().as_secs_f64()
        );
        stats
    }
}

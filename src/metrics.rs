use crate::error::{MatchbenchError, Result};
use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    pub searches_timed: IntCounter,
    pub cells_measured: IntCounter,
    pub cases_verified: IntCounter,
    registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn counter(name: &str, help: &str) -> IntCounter {
    IntCounter::with_opts(Opts::new(name, help).namespace("matchbench"))
        .expect("static metric options are valid")
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let searches_timed = counter(
            "searches_timed",
            "Number of matcher invocations inside timed groups",
        );
        let cells_measured = counter(
            "cells_measured",
            "Number of (text, pattern, algorithm) cells measured",
        );
        let cases_verified = counter(
            "cases_verified",
            "Number of pattern cases that passed the pre-flight check",
        );

        registry.register(Box::new(searches_timed.clone())).ok();
        registry.register(Box::new(cells_measured.clone())).ok();
        registry.register(Box::new(cases_verified.clone())).ok();

        Metrics {
            searches_timed,
            cells_measured,
            cases_verified,
            registry: Arc::new(registry),
        }
    }

    /// Render all counters in the Prometheus text exposition format.
    pub fn gather(&self) -> Result<String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MatchbenchError::Other(format!("Failed to encode metrics: {e}")))?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gathers_registered_counters() {
        let metrics = Metrics::new();
        metrics.cells_measured.inc_by(3);

        let text = metrics.gather().unwrap();
        assert!(text.contains("matchbench_cells_measured 3"));
        assert!(text.contains("matchbench_searches_timed 0"));
    }
}

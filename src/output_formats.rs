use crate::error::Result;
use crate::report::{Report, SummaryScope};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Write as _;

/// Output format types
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
    Markdown,
}

/// Unit used when printing durations
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    S,
    Ms,
    Us,
    Ns,
}

impl TimeUnit {
    pub fn scale(self, seconds: f64) -> f64 {
        match self {
            TimeUnit::S => seconds,
            TimeUnit::Ms => seconds * 1e3,
            TimeUnit::Us => seconds * 1e6,
            TimeUnit::Ns => seconds * 1e9,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::S => "s",
            TimeUnit::Ms => "ms",
            TimeUnit::Us => "us",
            TimeUnit::Ns => "ns",
        }
    }

    fn format(self, seconds: f64) -> String {
        format!("{:.3} {}", self.scale(seconds), self.suffix())
    }
}

/// Output formatter for benchmark reports
pub struct OutputFormatter {
    format: OutputFormat,
    unit: TimeUnit,
    show_summary: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            unit: TimeUnit::Ms,
            show_summary: true,
        }
    }

    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_summary(mut self, include: bool) -> Self {
        self.show_summary = include;
        self
    }

    pub fn format_report(&self, report: &Report) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.format_text(report)),
            OutputFormat::Json => self.format_json(report),
            OutputFormat::Csv => Ok(self.format_csv(report)),
            OutputFormat::Markdown => Ok(self.format_markdown(report)),
        }
    }

    /// Format as a ranked, human-readable listing
    fn format_text(&self, report: &Report) -> String {
        let plan = report.plan();
        let mut output = String::new();

        let _ = writeln!(
            output,
            "{} ({}), best of {} x {} calls",
            "Time per search".bold(),
            self.unit.suffix(),
            plan.trials,
            plan.repeats
        );

        for group in report.groups() {
            let _ = writeln!(
                output,
                "\n{} / pattern: {}",
                group.text.green().bold(),
                group.pattern.cyan()
            );
            for (rank, result) in group.entries.iter().enumerate() {
                let time = self.unit.format(result.seconds);
                let time = if rank == 0 {
                    time.yellow().bold().to_string()
                } else {
                    time
                };
                let _ = writeln!(output, "  {:24}: {time}", result.algorithm.display_name());
            }
        }

        if self.show_summary {
            output.push('\n');
            for summary in report.summaries() {
                let heading = match &summary.scope {
                    SummaryScope::Text(text) => format!("Fastest for {text}"),
                    SummaryScope::Overall => "Fastest overall".to_string(),
                };
                let _ = writeln!(
                    output,
                    "{} (sum of {} patterns): {} ({})",
                    heading.bold(),
                    summary.patterns,
                    summary.fastest.algorithm.display_name().green().bold(),
                    self.unit.format(summary.fastest.seconds)
                );
            }
        }

        output
    }

    /// Format as JSON; times are always in seconds
    fn format_json(&self, report: &Report) -> Result<String> {
        let plan = report.plan();
        let summaries: Vec<Value> = report
            .summaries()
            .into_iter()
            .map(|summary| {
                let text = match &summary.scope {
                    SummaryScope::Text(text) => Value::from(text.as_str()),
                    SummaryScope::Overall => Value::Null,
                };
                json!({
                    "scope": summary.scope.to_string(),
                    "text": text,
                    "patterns": summary.patterns,
                    "fastest": summary.fastest.algorithm,
                    "seconds": summary.fastest.seconds,
                })
            })
            .collect();

        let mut result = json!({
            "repeats": plan.repeats.get(),
            "trials": plan.trials.get(),
            "results": report.results(),
        });
        if self.show_summary {
            result["summary"] = Value::Array(summaries);
        }

        Ok(serde_json::to_string_pretty(&result)?)
    }

    /// Format as CSV; times are always in seconds
    fn format_csv(&self, report: &Report) -> String {
        let mut output = String::from("text,pattern,algorithm,seconds\n");
        for result in report.results() {
            let _ = writeln!(
                output,
                "{},{},{},{:e}",
                csv_field(&result.text),
                csv_field(&result.pattern),
                csv_field(result.algorithm.display_name()),
                result.seconds
            );
        }
        output
    }

    /// Format as Markdown tables
    fn format_markdown(&self, report: &Report) -> String {
        let mut output = String::from("# String matching benchmark\n\n");
        let plan = report.plan();
        let _ = writeln!(
            output,
            "Best of {} trials x {} calls, time per search in {}.\n",
            plan.trials,
            plan.repeats,
            self.unit.suffix()
        );

        output.push_str("| Text | Pattern | Algorithm | Time |\n");
        output.push_str("|------|---------|-----------|------|\n");
        for group in report.groups() {
            for result in &group.entries {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {:.3} |",
                    escape_markdown(group.text),
                    escape_markdown(group.pattern),
                    result.algorithm.display_name(),
                    self.unit.scale(result.seconds)
                );
            }
        }

        if self.show_summary {
            output.push_str("\n## Fastest\n\n");
            output.push_str("| Scope | Patterns | Algorithm | Total |\n");
            output.push_str("|-------|----------|-----------|-------|\n");
            for summary in report.summaries() {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {:.3} |",
                    escape_markdown(&summary.scope.to_string()),
                    summary.patterns,
                    summary.fastest.algorithm.display_name(),
                    self.unit.scale(summary.fastest.seconds)
                );
            }
        }

        output
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|")
}

use crate::corpus::resolve_encodings;
use crate::output_formats::TimeUnit;
use crate::search::{RabinKarp, DEFAULT_BASE, DEFAULT_MODULUS};
use crate::search_algorithms::SearchAlgorithm;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub benchmark: BenchmarkConfig,

    pub rabin_karp: RabinKarpConfig,

    pub input: InputConfig,

    pub display: DisplayConfig,

    #[serde(rename = "corpus", skip_serializing_if = "Vec::is_empty")]
    pub corpora: Vec<CorpusConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Back-to-back calls per timed group.
    pub repeats: NonZeroUsize,
    /// Number of timed groups; the fastest one wins.
    pub trials: NonZeroUsize,
    pub algorithms: Vec<SearchAlgorithm>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            repeats: default_repeats(),
            trials: default_trials(),
            algorithms: SearchAlgorithm::ALL.to_vec(),
        }
    }
}

fn default_repeats() -> NonZeroUsize {
    NonZeroUsize::new(300).unwrap_or(NonZeroUsize::MIN)
}
fn default_trials() -> NonZeroUsize {
    NonZeroUsize::new(7).unwrap_or(NonZeroUsize::MIN)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RabinKarpConfig {
    pub base: u64,
    pub modulus: u64,
}

impl Default for RabinKarpConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
        }
    }
}

impl RabinKarpConfig {
    pub fn matcher(&self) -> crate::error::Result<RabinKarp> {
        RabinKarp::new(self.base, self.modulus)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Tried in order; lossy UTF-8 is the last resort.
    pub encodings: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            encodings: vec!["utf-8".to_string(), "windows-1251".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_summary: bool,
    pub unit: TimeUnit,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_summary: true,
            unit: TimeUnit::Ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub label: String,
    pub path: PathBuf,
    #[serde(default)]
    pub present: Vec<PatternConfig>,
    #[serde(default)]
    pub absent: Vec<PatternConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub label: String,
    pub pattern: String,
}

impl Config {
    /// Load from `explicit`, or from the first config file found on the
    /// search path. Returns the config and the directory corpus paths are
    /// relative to.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let config_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_path(),
        };

        if let Some(path) = config_path {
            let config = Self::load_from(&path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            Ok((config, base_dir))
        } else {
            Ok((Self::default(), PathBuf::from(".")))
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("matchbench/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".matchbench.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        let current_path = Path::new(".matchbench.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        None
    }

    pub fn validate(&self) -> Result<()> {
        if self.benchmark.algorithms.is_empty() {
            bail!("benchmark.algorithms must name at least one algorithm");
        }
        self.rabin_karp.matcher()?;
        resolve_encodings(&self.input.encodings)?;

        let mut corpus_labels = HashSet::new();
        for corpus in &self.corpora {
            if !corpus_labels.insert(corpus.label.as_str()) {
                bail!("duplicate corpus label '{}'", corpus.label);
            }
            if corpus.present.is_empty() && corpus.absent.is_empty() {
                bail!("corpus '{}' has no patterns", corpus.label);
            }

            // Results are grouped by label, so each must name one pattern.
            let mut pattern_labels = HashSet::new();
            for pattern in corpus.present.iter().chain(&corpus.absent) {
                if !pattern_labels.insert(pattern.label.as_str()) {
                    bail!(
                        "duplicate pattern label '{}' in corpus '{}'",
                        pattern.label,
                        corpus.label
                    );
                }
            }
        }
        Ok(())
    }

    /// A starting configuration with one sample corpus entry.
    pub fn example() -> Self {
        Self {
            corpora: vec![CorpusConfig {
                label: "Article 1".to_string(),
                path: PathBuf::from("article1.txt"),
                present: vec![PatternConfig {
                    label: "exists".to_string(),
                    pattern: "binary search".to_string(),
                }],
                absent: vec![PatternConfig {
                    label: "made up".to_string(),
                    pattern: "parallel photonic compiler".to_string(),
                }],
            }],
            ..Self::default()
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_timeit_settings() {
        let config = Config::default();
        assert_eq!(config.benchmark.repeats.get(), 300);
        assert_eq!(config.benchmark.trials.get(), 7);
        assert_eq!(config.benchmark.algorithms, SearchAlgorithm::ALL);
        assert_eq!(config.rabin_karp.base, 256);
        assert_eq!(config.rabin_karp.modulus, 1_000_000_007);
        assert!(config.corpora.is_empty());
    }

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [benchmark]
            trials = 3
            algorithms = ["kmp", "rabin-karp"]

            [[corpus]]
            label = "Article 2"
            path = "texts/article2.txt"
            present = [{ label = "exists", pattern = "unrolled linked list" }]
            absent = [{ label = "made up", pattern = "photonic compiler" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.benchmark.repeats.get(), 300);
        assert_eq!(config.benchmark.trials.get(), 3);
        assert_eq!(
            config.benchmark.algorithms,
            [SearchAlgorithm::Kmp, SearchAlgorithm::RabinKarp]
        );
        assert_eq!(config.corpora.len(), 1);
        assert_eq!(config.corpora[0].present[0].pattern, "unrolled linked list");
        config.validate().unwrap();
    }

    #[test]
    fn zero_repeats_is_rejected() {
        let parsed: std::result::Result<Config, _> = toml::from_str("[benchmark]\nrepeats = 0\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.rabin_karp.modulus = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.input.encodings = vec!["no-such-encoding".to_string()];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.benchmark.algorithms.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_labels() {
        let corpus = |label: &str, present: &[&str], absent: &[&str]| {
            let patterns = |labels: &[&str]| {
                labels
                    .iter()
                    .map(|l| PatternConfig {
                        label: l.to_string(),
                        pattern: format!("pattern {l}"),
                    })
                    .collect()
            };
            CorpusConfig {
                label: label.to_string(),
                path: PathBuf::from("article.txt"),
                present: patterns(present),
                absent: patterns(absent),
            }
        };

        let mut config = Config::default();
        config.corpora = vec![corpus("Article 1", &["exists", "exists"], &[])];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate pattern label 'exists'"));

        config.corpora = vec![corpus("Article 1", &["exists"], &["exists"])];
        assert!(config.validate().is_err());

        config.corpora = vec![
            corpus("Article 1", &["exists"], &["made up"]),
            corpus("Article 1", &["other"], &[]),
        ];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate corpus label 'Article 1'"));

        // The same pattern label in different corpora is fine.
        config.corpora = vec![
            corpus("Article 1", &["exists"], &["made up"]),
            corpus("Article 2", &["exists"], &["made up"]),
        ];
        config.validate().unwrap();
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/matchbench.toml");

        Config::example().save(&path).unwrap();
        let (loaded, base_dir) = Config::load(Some(&path)).unwrap();

        assert_eq!(base_dir, dir.path().join("nested"));
        assert_eq!(loaded.corpora.len(), 1);
        assert_eq!(loaded.corpora[0].label, "Article 1");
        assert_eq!(loaded.display.unit, TimeUnit::Ms);
    }
}

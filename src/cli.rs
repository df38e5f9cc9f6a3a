use crate::output_formats::{OutputFormat, TimeUnit};
use crate::search_algorithms::SearchAlgorithm;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; defaults to the first one found on the search path
    #[clap(long, value_parser, global = true)]
    pub config: Option<PathBuf>,

    #[clap(long, value_parser, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[clap(long, value_parser, global = true)]
    pub log: Option<PathBuf>,

    /// Defaults to `run`
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the corpora and benchmark every algorithm against them
    Run(RunArgs),

    /// Run a single search and print where the first match is
    Search {
        #[clap(value_enum)]
        algorithm: SearchAlgorithm,

        pattern: String,

        file: PathBuf,
    },

    /// Write a starting configuration file
    InitConfig {
        #[clap(default_value = ".matchbench.toml")]
        path: PathBuf,

        #[clap(long, value_parser, default_value_t = false)]
        force: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Calls per timed group
    #[clap(long, value_parser)]
    pub repeats: Option<NonZeroUsize>,

    /// Timed groups per cell; the fastest is kept
    #[clap(long, value_parser)]
    pub trials: Option<NonZeroUsize>,

    #[clap(long, value_enum, value_delimiter = ',')]
    pub algorithms: Option<Vec<SearchAlgorithm>>,

    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[clap(long, value_enum)]
    pub unit: Option<TimeUnit>,

    /// Write the report to this file instead of stdout
    #[clap(long, value_parser)]
    pub output: Option<PathBuf>,

    /// Print Prometheus counters after the report
    #[clap(long, value_parser, default_value_t = false)]
    pub metrics: bool,

    #[clap(long, value_parser, default_value_t = false)]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::parse_from(["matchbench", "--config", "bench.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("bench.toml")));
    }

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::parse_from([
            "matchbench",
            "run",
            "--repeats",
            "10",
            "--trials",
            "3",
            "--algorithms",
            "kmp,rabin-karp",
            "--format",
            "json",
        ]);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.repeats.map(NonZeroUsize::get), Some(10));
        assert_eq!(args.trials.map(NonZeroUsize::get), Some(3));
        assert_eq!(
            args.algorithms,
            Some(vec![SearchAlgorithm::Kmp, SearchAlgorithm::RabinKarp])
        );
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn zero_repeats_is_rejected() {
        assert!(Cli::try_parse_from(["matchbench", "run", "--repeats", "0"]).is_err());
    }
}

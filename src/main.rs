use colored::*;
use env_logger::{Builder, Env, Target};
use log::{error, info};
use matchbench::corpus::{read_text_auto, resolve_encodings};
use matchbench::error::{MatchbenchError, Result as MatchbenchResult};
use matchbench::{
    render_report, run_benchmarks, AppConfig, Cli, Commands, Config, Metrics, Parser, RunArgs,
    SearchAlgorithm, SearchAlgorithmFactory, SearchMatch,
};
use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logging(&cli) {
        eprintln!("{}", format!("Failed to initialise logging: {e}").red());
        return ExitCode::FAILURE;
    }

    let start_time = Instant::now();
    info!("Application started with command: {:?}", cli.command);

    let result = match &cli.command {
        None => run(&cli, &RunArgs::default()),
        Some(Commands::Run(args)) => run(&cli, args),
        Some(Commands::Search {
            algorithm,
            pattern,
            file,
        }) => search(&cli, *algorithm, pattern, file),
        Some(Commands::InitConfig { path, force }) => init_config(path, *force),
    };

    info!(
        "Application finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", format!("Error: {e}").red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, args: &RunArgs) -> MatchbenchResult<ExitCode> {
    let app = AppConfig::from_cli(cli)?;
    let metrics = Metrics::new();
    let show_progress = !args.no_progress && std::io::stderr().is_terminal();

    let report = run_benchmarks(&app, args, &metrics, show_progress)?;
    for summary in report.summaries() {
        info!(
            "Fastest {}: {} ({:.6}s over {} patterns)",
            summary.scope,
            summary.fastest.algorithm,
            summary.fastest.seconds,
            summary.patterns
        );
    }

    let output = render_report(&app, args, &report)?;
    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            println!("{} {}", "Report written to".green(), path.display());
        }
        None => print!("{output}"),
    }

    if args.metrics {
        println!("\n{}", metrics.gather()?);
    }
    Ok(ExitCode::SUCCESS)
}

fn search(
    cli: &Cli,
    algorithm: SearchAlgorithm,
    pattern: &str,
    file: &Path,
) -> MatchbenchResult<ExitCode> {
    let app = AppConfig::from_cli(cli)?;
    let encodings = resolve_encodings(&app.config.input.encodings)?;
    let text = read_text_auto(file, &encodings)?;
    let matcher = SearchAlgorithmFactory::create(algorithm, app.config.rabin_karp.matcher()?);

    let start = Instant::now();
    let found = matcher.search_str(&text, pattern);
    let elapsed = start.elapsed();

    match found {
        Some(offset) => {
            match SearchMatch::locate(&text, offset, pattern.len()) {
                Some(m) => println!(
                    "{} {}:{m}",
                    matcher.name().green().bold(),
                    file.display()
                ),
                None => println!(
                    "{} {}: byte {offset}",
                    matcher.name().green().bold(),
                    file.display()
                ),
            }
            info!("Found at byte {offset} in {elapsed:.2?}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{} {}", matcher.name().green().bold(), "No match found".yellow());
            info!("No match in {elapsed:.2?}");
            Ok(ExitCode::from(1))
        }
    }
}

fn init_config(path: &Path, force: bool) -> MatchbenchResult<ExitCode> {
    if path.exists() && !force {
        return Err(MatchbenchError::Config(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    Config::example().save(path)?;
    println!("{} {}", "Wrote configuration to".green(), path.display());
    Ok(ExitCode::SUCCESS)
}

fn setup_logging(cli: &Cli) -> MatchbenchResult<()> {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| MatchbenchError::Other(e.to_string()))?;
    Ok(())
}

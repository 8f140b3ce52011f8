use clap::Parser;
use megam_join::{Input, JoinConfig, JoinError, Joiner};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "megam_join", version)]
#[command(about = "Combine MegaM files that contain features for the same files", long_about = None)]
struct Cli {
    /// MegaM input file(s). Each feature line must be preceded by a comment
    /// with the filename/ID that the features should be joined on. Use - for
    /// standard input.
    #[arg(required = true, value_name = "MEGAM_FILE")]
    megam_files: Vec<String>,

    /// Write the joined file here instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Only output documents that have features in every input
    #[arg(short, long)]
    common: bool,

    /// Forget the current document at the start of each input
    #[arg(long)]
    isolate_inputs: bool,

    /// Write a JSON summary of the run
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter used with `--quiet`: warnings still get through
const QUIET_LOG_FILTER: &str = "warn";

/// Filter directive for the log subscriber. `--quiet` beats `RUST_LOG`.
fn log_filter(quiet: bool, env: Option<&str>) -> String {
    match (quiet, env) {
        (true, _) => QUIET_LOG_FILTER.to_string(),
        (false, Some(directives)) if !directives.trim().is_empty() => directives.to_string(),
        (false, _) => DEFAULT_LOG_FILTER.to_string(),
    }
}

fn init_logging(quiet: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = log_filter(quiet, env.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), JoinError> {
    let inputs: Vec<Input> = cli.megam_files.iter().map(|arg| Input::from_arg(arg)).collect();
    let config = JoinConfig::default()
        .isolate_inputs(cli.isolate_inputs)
        .common_only(cli.common);

    let mut joiner = Joiner::new(config);
    for input in &inputs {
        joiner.load_input(input)?;
    }
    let joined = joiner.finish();

    // Output is only opened once every input has been read
    match &cli.output {
        Some(path) => {
            let name = path.display().to_string();
            let file = File::create(path).map_err(|e| JoinError::Output(name.clone(), e))?;
            joined.write_megam(BufWriter::new(file)).map_err(|e| match e {
                JoinError::Io(e) => JoinError::Output(name, e),
                other => other,
            })?;
        }
        None => {
            let stdout = io::stdout();
            joined.write_megam(BufWriter::new(stdout.lock()))?;
        }
    }

    let summary = joined.into_summary();
    info!(
        "Joined {} documents from {} inputs ({} written, {} warnings)",
        summary.documents_joined,
        summary.inputs.len(),
        summary.documents_written,
        summary.warnings.len()
    );

    if let Some(path) = &cli.summary {
        summary.write_json(path)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Not through tracing: RUST_LOG must not be able to hide a fatal error
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

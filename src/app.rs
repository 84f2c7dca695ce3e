//! Command-line entry points.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::config::DriftConfig;
use crate::constants::report::DEFAULT_REPORT_FILENAME;
use crate::constants::store::DEFAULT_STORE_FILENAME;
use crate::errors::DriftError;
use crate::history::FileHistoryStore;
use crate::pipeline::{record_comparison, run_batch};
use crate::record::ComparisonRecord;
use crate::report::{summarize, ReportRenderer, TextReportRenderer};
use crate::source::{read_description_file, FolderSource};

/// Exit status for a duplicate rejection: expected, recoverable, distinct
/// from hard failures so wrapping scripts can branch on it.
const DUPLICATE_EXIT_CODE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "reqdrift",
    disable_help_subcommand = true,
    about = "Track wording drift between requirement and test-case descriptions",
    long_about = "Compare requirement descriptions against the descriptions attached to their \
                  automated tests, classify the magnitude of change, and keep a deduplicated \
                  history of every recorded comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare one description pair and record the result.
    Compare(CompareArgs),
    /// Scan two folders and record every matched description pair.
    Batch(BatchArgs),
    /// Rebuild the report from the recorded history only.
    Report(ReportArgs),
}

#[derive(Debug, Args)]
struct StoreArgs {
    #[arg(
        long = "store",
        value_name = "PATH",
        default_value = DEFAULT_STORE_FILENAME,
        help = "History file path (created on first comparison)"
    )]
    store_path: PathBuf,
    #[arg(
        long = "report",
        value_name = "PATH",
        default_value = DEFAULT_REPORT_FILENAME,
        help = "Report output path"
    )]
    report_path: PathBuf,
}

#[derive(Debug, Args)]
struct CompareArgs {
    #[arg(
        value_name = "SOURCE_FILE",
        help = "Requirement description file; the first line may carry an 'ID: title' header"
    )]
    source_file: PathBuf,
    #[arg(value_name = "TARGET_FILE", help = "Test-case description file")]
    target_file: PathBuf,
    #[arg(long, help = "Explicit record id, overriding the source file header")]
    id: Option<String>,
    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Debug, Args)]
struct BatchArgs {
    #[arg(value_name = "SOURCE_DIR", help = "Folder of requirement artifacts")]
    source_root: PathBuf,
    #[arg(value_name = "TARGET_DIR", help = "Folder of test-case artifacts")]
    target_root: PathBuf,
    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Debug, Args)]
struct ReportArgs {
    #[command(flatten)]
    store: StoreArgs,
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Batch(args) => run_batch_command(args),
        Command::Report(args) => run_report(args),
    }
}

fn run_compare(args: CompareArgs) -> ExitCode {
    match compare_once(&args) {
        Ok(record) => {
            println!(
                "recorded '{}' ({}, {:.2}%)",
                record.id, record.severity, record.change_ratio_percent
            );
            ExitCode::SUCCESS
        }
        Err(DriftError::DuplicateRecord { id }) => {
            eprintln!("id '{id}' already exists, entry rejected");
            ExitCode::from(DUPLICATE_EXIT_CODE)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn compare_once(args: &CompareArgs) -> Result<ComparisonRecord, DriftError> {
    let source_entry = read_description_file(&args.source_file)?;
    let target_raw = std::fs::read_to_string(&args.target_file).map_err(|err| {
        DriftError::MalformedInput(format!(
            "could not read '{}': {err}",
            args.target_file.display()
        ))
    })?;

    let id = args.id.clone().unwrap_or(source_entry.id);
    let record = ComparisonRecord::compare(id, source_entry.description, target_raw.trim())?;

    let config = config_for(&args.store);
    let store = FileHistoryStore::open(&config.store_path);
    let history = record_comparison(&store, record.clone())?;
    TextReportRenderer::new(&config.report_path).render(&history, &summarize(&history))?;
    Ok(record)
}

fn run_batch_command(args: BatchArgs) -> ExitCode {
    let config = config_for(&args.store)
        .with_source_root(&args.source_root)
        .with_target_root(&args.target_root);
    let store = FileHistoryStore::open(&config.store_path);
    let source = FolderSource::new("requirements", &args.source_root);
    let target = FolderSource::new("testcases", &args.target_root);

    match run_batch(&store, &source, &target) {
        Ok((history, outcome)) => {
            let rendered =
                TextReportRenderer::new(&config.report_path).render(&history, &summarize(&history));
            if let Err(err) = rendered {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
            println!(
                "batch done: {} recorded, {} duplicates, {} malformed, {} total in history",
                outcome.accepted,
                outcome.duplicates,
                outcome.malformed,
                history.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_report(args: ReportArgs) -> ExitCode {
    let config = config_for(&args.store);
    let store = FileHistoryStore::open(&config.store_path);
    let result = store.load().and_then(|history| {
        TextReportRenderer::new(&config.report_path).render(&history, &summarize(&history))
    });
    match result {
        Ok(()) => {
            println!("report written to '{}'", config.report_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn config_for(store: &StoreArgs) -> DriftConfig {
    DriftConfig::default()
        .with_store_path(&store.store_path)
        .with_report_path(&store.report_path)
}

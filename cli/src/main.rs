//! pdfstruct CLI - PDF structure extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfstruct::{extract_file, run_batch, BatchOptions, BatchSummary};

/// Exit codes: 0 = all inputs succeeded, 1 = some inputs failed,
/// 2 = no inputs found, 3 = usage or environment error.
const EXIT_SOME_FAILED: i32 = 1;
const EXIT_NO_INPUTS: i32 = 2;
const EXIT_USAGE: i32 = 3;

#[derive(Parser)]
#[command(name = "pdfstruct")]
#[command(version)]
#[command(about = "Extract PDF document structure to JSON", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDF files
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory for JSON artifacts
    #[arg(value_name = "OUTPUT", default_value = "output")]
    output: PathBuf,

    /// Worker count (default: min(4, available cores))
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Per-document timeout in seconds
    #[arg(long, value_name = "SECS", default_value = "300")]
    timeout: u64,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    if !cli.input.exists() {
        eprintln!(
            "{}: input path {} does not exist",
            "Error".red().bold(),
            cli.input.display()
        );
        return EXIT_USAGE;
    }

    let mut options = BatchOptions::new().with_task_timeout(Duration::from_secs(cli.timeout));
    if let Some(workers) = cli.workers {
        options = options.with_max_workers(workers);
    }

    if cli.input.is_file() {
        process_file(&cli.input, &cli.output)
    } else {
        process_directory(&cli.input, &cli.output, &options)
    }
}

fn process_file(input: &Path, output_dir: &Path) -> i32 {
    if let Err(e) = fs::create_dir_all(output_dir) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        return EXIT_USAGE;
    }

    let pb = spinner(format!("Processing {}...", input.display()));
    let result = extract_file(input);

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let artifact = output_dir.join(format!("{}.json", stem));

    let written = result
        .to_json()
        .map_err(|e| e.to_string())
        .and_then(|json| fs::write(&artifact, json).map_err(|e| e.to_string()));
    pb.finish_and_clear();

    match written {
        Ok(()) => {
            if let Some(error) = &result.processing_info.error {
                println!("{} {}", "Extraction failed:".yellow(), error);
            } else {
                println!(
                    "{} {} elements, {} outline entries",
                    "Extracted".green(),
                    result.element_count(),
                    result.structure.outline.len()
                );
            }
            println!("{} {}", "Saved to".green(), artifact.display());
            0
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            EXIT_SOME_FAILED
        }
    }
}

fn process_directory(input_dir: &Path, output_dir: &Path, options: &BatchOptions) -> i32 {
    let pb = spinner(format!("Processing {}...", input_dir.display()));
    let summary = run_batch(input_dir, output_dir, options);
    pb.finish_and_clear();

    match summary {
        Ok(BatchSummary { total: 0, .. }) => {
            println!(
                "{} no PDF files found in {}",
                "Warning:".yellow().bold(),
                input_dir.display()
            );
            EXIT_NO_INPUTS
        }
        Ok(summary) => {
            report(&summary, output_dir);
            if summary.all_succeeded() {
                0
            } else {
                EXIT_SOME_FAILED
            }
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            EXIT_USAGE
        }
    }
}

fn report(summary: &BatchSummary, output_dir: &Path) {
    if summary.all_succeeded() {
        println!(
            "{} {}/{} files processed",
            "Done!".green().bold(),
            summary.succeeded,
            summary.total
        );
    } else {
        println!(
            "{} {}/{} files processed, {} failed",
            "Done with errors:".yellow().bold(),
            summary.succeeded,
            summary.total,
            summary.failed()
        );
    }
    println!("{} {}", "Output in".green(), output_dir.display());
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

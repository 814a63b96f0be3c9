use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use polygon2bbox::utils::{default_output_dir, default_output_file};
use polygon2bbox::{batch_convert, convert_single_file, write_summary_json, Args};

fn main() -> ExitCode {
    // Initialize the logger; the run summary goes to stdout
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = Args::parse();

    let input = PathBuf::from(&args.input);
    if !input.exists() {
        error!("Input path does not exist: {}", args.input);
        return ExitCode::FAILURE;
    }

    let succeeded = if args.batch {
        run_batch(&args, &input)
    } else {
        run_single(&args, &input)
    };

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_single(args: &Args, input: &Path) -> bool {
    if input.is_dir() {
        error!(
            "{} is a directory; use --batch to convert every label file in it",
            input.display()
        );
        return false;
    }

    let output = args
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_file(input));

    match convert_single_file(input, &output, &args.conversion_options()) {
        Ok(stats) => save_summary(args, &stats),
        Err(e) => {
            error!("Error: {}", e);
            false
        }
    }
}

fn run_batch(args: &Args, input: &Path) -> bool {
    let output_dir = args
        .batch_output_dir()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_dir(input));

    info!("Starting batch conversion of {}...", input.display());
    match batch_convert(input, &output_dir, &args.conversion_options(), args.parallel) {
        Ok(summary) => {
            summary.print_summary();
            if summary.files_converted == 0 {
                error!("No files were converted");
                return false;
            }
            info!("Output saved to: {}", output_dir.display());
            save_summary(args, &summary)
        }
        Err(e) => {
            error!("Batch conversion failed: {}", e);
            false
        }
    }
}

fn save_summary<T: serde::Serialize>(args: &Args, summary: &T) -> bool {
    let Some(path) = &args.summary_json else {
        return true;
    };
    match write_summary_json(Path::new(path), summary) {
        Ok(()) => {
            info!("Summary written to {}", path);
            true
        }
        Err(e) => {
            error!("Failed to write summary: {}", e);
            false
        }
    }
}

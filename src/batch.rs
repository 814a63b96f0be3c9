use glob::Pattern;
use log::{error, info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConversionOptions;
use crate::error::ConvertError;
use crate::io::convert_file;
use crate::types::{BatchSummary, FileStats, LABEL_EXTENSION};
use crate::utils::{
    create_progress_bar, default_output_file, ensure_output_directory, is_converted_output,
    same_directory,
};

/// List the label files directly inside `dir`, sorted, skipping earlier outputs
pub fn collect_label_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    // Match file names only, so the directory path itself never goes through the pattern
    let pattern = Pattern::new(&format!("*.{}", LABEL_EXTENSION))?;
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Failed to read directory entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name))
        })
        .filter(|path| path.is_file() && !is_converted_output(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Convert every label file in `input_dir` into `output_dir`.
///
/// A file that fails is recorded in the summary and the batch moves on; only
/// problems with the directories themselves abort the run.
pub fn batch_convert(
    input_dir: &Path,
    output_dir: &Path,
    options: &ConversionOptions,
    parallel: bool,
) -> Result<BatchSummary, ConvertError> {
    if !input_dir.exists() {
        return Err(ConvertError::InputNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(ConvertError::NotADirectory(input_dir.to_path_buf()));
    }

    let output_dir = ensure_output_directory(output_dir)?;
    let in_place = same_directory(input_dir, &output_dir);

    let files = collect_label_files(input_dir)?;
    let mut summary = BatchSummary {
        files_found: files.len(),
        ..BatchSummary::default()
    };

    if files.is_empty() {
        warn!("No .{} files found in {}", LABEL_EXTENSION, input_dir.display());
        return Ok(summary);
    }
    info!("Found {} .{} files to convert...", files.len(), LABEL_EXTENSION);

    let convert_one = |input: &PathBuf| -> (PathBuf, Result<FileStats, ConvertError>) {
        let output = batch_output_path(input, &output_dir, in_place);
        let result = convert_file(input, &output, options);
        match &result {
            Ok(_) => info!("{} -> {}", input.display(), output.display()),
            Err(e) => error!("Error processing {}: {}", input.display(), e),
        }
        (input.clone(), result)
    };

    let results: Vec<_> = if parallel {
        let pb = create_progress_bar(files.len() as u64, "Batch");
        let results: Vec<_> = files
            .par_iter()
            .map(|input| {
                let result = convert_one(input);
                pb.inc(1);
                result
            })
            .collect();
        pb.finish_with_message("Batch processing complete");
        results
    } else {
        files.iter().map(convert_one).collect()
    };

    for (input, result) in results {
        match result {
            Ok(stats) => summary.record_success(&stats),
            Err(e @ ConvertError::NoValidLines { .. }) => {
                summary.record_skipped(input, e.to_string())
            }
            Err(e) => summary.record_failure(input, e.to_string()),
        }
    }

    Ok(summary)
}

// Keep the input's file name unless that would overwrite the input itself
fn batch_output_path(input: &Path, output_dir: &Path, in_place: bool) -> PathBuf {
    if in_place {
        default_output_file(input)
    } else {
        match input.file_name() {
            Some(name) => output_dir.join(name),
            None => default_output_file(input),
        }
    }
}

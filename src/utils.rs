use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::types::BBOX_SUFFIX;

/// Name of the directory batch mode writes into when no output is given
pub const DEFAULT_BATCH_DIR: &str = "bbox_converted";

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create the output directory if needed; existing content is left alone
pub fn ensure_output_directory(path: &Path) -> Result<PathBuf, ConvertError> {
    if path.is_dir() {
        debug!("Output directory {:?} already exists", path);
    } else {
        fs::create_dir_all(path).map_err(|source| ConvertError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(path.to_path_buf())
}

/// `labels.txt` -> `labels.bbox.txt`, next to the input
pub fn default_output_file(input: &Path) -> PathBuf {
    input.with_extension(BBOX_SUFFIX)
}

/// `<input_dir>/bbox_converted`
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join(DEFAULT_BATCH_DIR)
}

/// Whether a file looks like the output of a previous single-file conversion
pub fn is_converted_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(&format!(".{}", BBOX_SUFFIX)))
}

/// Compare two directories by their canonical location
pub fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_file() {
        assert_eq!(
            default_output_file(Path::new("data/labels.txt")),
            PathBuf::from("data/labels.bbox.txt")
        );
        assert_eq!(
            default_output_file(Path::new("img.001.txt")),
            PathBuf::from("img.001.bbox.txt")
        );
        assert_eq!(
            default_output_file(Path::new("labels")),
            PathBuf::from("labels.bbox.txt")
        );
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("data")),
            PathBuf::from("data/bbox_converted")
        );
    }

    #[test]
    fn test_is_converted_output() {
        assert!(is_converted_output(Path::new("dir/a.bbox.txt")));
        assert!(!is_converted_output(Path::new("dir/a.txt")));
        assert!(!is_converted_output(Path::new("dir/bbox.txt")));
    }

    #[test]
    fn test_ensure_output_directory_keeps_existing_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("out");
        ensure_output_directory(&out).unwrap();
        fs::write(out.join("keep.txt"), "x").unwrap();

        ensure_output_directory(&out).unwrap();
        assert!(out.join("keep.txt").exists());
    }

    #[test]
    fn test_same_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a");
        fs::create_dir(&nested).unwrap();

        assert!(same_directory(&nested, &temp_dir.path().join("a/../a")));
        assert!(!same_directory(&nested, temp_dir.path()));
    }
}

use log::{info, warn};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::ConversionOptions;
use crate::conversion::polygon_to_bbox;
use crate::error::ConvertError;
use crate::parser::parse_polygon_line;
use crate::types::FileStats;

/// Convert one polygon label file into a bbox label file.
///
/// Malformed lines are logged and skipped. A file with no label lines at all
/// gets an empty output file; a file whose every label line is malformed is
/// rejected with `NoValidLines` and nothing is written.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConversionOptions,
) -> Result<FileStats, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }

    let content = fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let mut stats = FileStats::default();
    let mut bbox_data = String::with_capacity(content.len() / 2);

    for (line_idx, line) in content.lines().enumerate() {
        let line_num = line_idx + 1;
        stats.lines_processed += 1;

        match parse_polygon_line(line, options.range_policy) {
            Ok(Some(parsed)) => {
                if parsed.clamped {
                    stats.lines_clamped += 1;
                    warn!(
                        "{}:{}: coordinates clamped into [0, 1]",
                        input.display(),
                        line_num
                    );
                }
                let bbox = polygon_to_bbox(&parsed.polygon);
                bbox_data.push_str(&bbox.to_label_line(options.precision));
                bbox_data.push('\n');
                stats.objects_converted += 1;
            }
            Ok(None) => stats.empty_lines += 1,
            Err(e) => {
                stats.lines_skipped += 1;
                warn!(
                    "{}:{}: skipping invalid line ({}): {}",
                    input.display(),
                    line_num,
                    e,
                    line.trim()
                );
            }
        }
    }

    if stats.objects_converted == 0 && stats.lines_skipped > 0 {
        return Err(ConvertError::NoValidLines {
            path: input.to_path_buf(),
            skipped: stats.lines_skipped,
        });
    }

    if stats.is_empty_input() {
        info!(
            "{} contains no label lines; writing an empty output file",
            input.display()
        );
    }

    write_output(output, bbox_data.as_bytes())?;
    Ok(stats)
}

/// Convert one file in single-file mode and log its statistics
pub fn convert_single_file(
    input: &Path,
    output: &Path,
    options: &ConversionOptions,
) -> Result<FileStats, ConvertError> {
    info!("Processing {}...", input.display());
    let stats = convert_file(input, output, options)?;
    stats.print_summary(output);
    Ok(stats)
}

/// Write a run summary as pretty-printed JSON
pub fn write_summary_json<T: Serialize>(path: &Path, summary: &T) -> Result<(), ConvertError> {
    let json = serde_json::to_string_pretty(summary)?;
    write_output(path, json.as_bytes())
}

fn write_output(path: &Path, data: &[u8]) -> Result<(), ConvertError> {
    let to_write_error = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(to_write_error)?);
    writer.write_all(data).map_err(to_write_error)?;
    writer.flush().map_err(to_write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RangePolicy;

    #[test]
    fn test_convert_file_counts_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("labels.txt");
        let output = temp_dir.path().join("labels.bbox.txt");
        fs::write(
            &input,
            "2 0.1 0.1 0.5 0.9 0.9 0.1\n\
             \n\
             0 0.1 0.1 0.2 0.2 0.3 0.3 0.4\n\
             1 0.1 0.1 1.5 0.2 0.3 0.3\n\
             1 0.3 0.3 0.3 0.3 0.3 0.3\n",
        )
        .unwrap();

        let stats = convert_file(&input, &output, &ConversionOptions::default()).unwrap();

        assert_eq!(
            stats,
            FileStats {
                lines_processed: 5,
                empty_lines: 1,
                lines_skipped: 2,
                lines_clamped: 0,
                objects_converted: 2,
            }
        );
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "2 0.500000 0.500000 0.800000 0.800000\n\
             1 0.300000 0.300000 0.000000 0.000000\n"
        );
    }

    #[test]
    fn test_convert_file_clamp_policy() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("labels.txt");
        let output = temp_dir.path().join("out.txt");
        fs::write(&input, "1 0.2 0.2 1.5 0.2 0.6 0.6\n").unwrap();

        let options = ConversionOptions {
            range_policy: RangePolicy::Clamp,
            ..ConversionOptions::default()
        };
        let stats = convert_file(&input, &output, &options).unwrap();

        assert_eq!(stats.lines_clamped, 1);
        assert_eq!(stats.objects_converted, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "1 0.600000 0.400000 0.800000 0.400000\n"
        );
    }

    #[test]
    fn test_convert_file_empty_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("empty.txt");
        let output = temp_dir.path().join("empty.bbox.txt");
        fs::write(&input, "").unwrap();

        let stats = convert_file(&input, &output, &ConversionOptions::default()).unwrap();

        assert!(stats.is_empty_input());
        assert_eq!(stats.objects_converted, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_convert_file_rejects_all_malformed_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("bad.txt");
        let output = temp_dir.path().join("bad.bbox.txt");
        fs::write(
            &input,
            "garbage line\n\n1 0.1 1.5 0.2 0.2 0.3 0.3\n0 0.1 0.2\n",
        )
        .unwrap();

        let result = convert_file(&input, &output, &ConversionOptions::default());

        assert!(matches!(
            result,
            Err(ConvertError::NoValidLines { skipped: 3, .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_file_missing_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = convert_file(
            &temp_dir.path().join("missing.txt"),
            &temp_dir.path().join("out.txt"),
            &ConversionOptions::default(),
        );
        assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
    }

    #[test]
    fn test_convert_file_unwritable_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("labels.txt");
        fs::write(&input, "2 0.1 0.1 0.5 0.9 0.9 0.1\n").unwrap();
        let output = temp_dir.path().join("no_such_dir").join("out.txt");

        let result = convert_file(&input, &output, &ConversionOptions::default());
        assert!(matches!(result, Err(ConvertError::Write { .. })));
    }

    #[test]
    fn test_write_summary_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("summary.json");
        let stats = FileStats {
            objects_converted: 4,
            ..FileStats::default()
        };

        write_summary_json(&path, &stats).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["objects_converted"], 4);
        assert_eq!(json["lines_skipped"], 0);
    }
}

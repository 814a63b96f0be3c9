use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::LineError;

/// Minimum number of vertices in a polygon label
pub const MIN_VERTICES: usize = 3;

/// Suffix given to converted files written next to their input
pub const BBOX_SUFFIX: &str = "bbox.txt";

// Label file extension picked up in batch mode
pub const LABEL_EXTENSION: &str = "txt";

/// Class id token of a label line, kept exactly as written in the input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassId(String);

impl ClassId {
    /// Accepts a non-empty run of ASCII digits
    pub fn parse(token: &str) -> Result<Self, LineError> {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(token.to_string()))
        } else {
            Err(LineError::InvalidClassId(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// A polygon label: class id plus its normalized outline
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    class_id: ClassId,
    vertices: Vec<(f64, f64)>,
}

impl Polygon {
    pub fn new(class_id: ClassId, vertices: Vec<(f64, f64)>) -> Result<Self, LineError> {
        if vertices.len() < MIN_VERTICES {
            return Err(LineError::TooFewVertices(vertices.len()));
        }
        Ok(Self { class_id, vertices })
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }
}

/// A successfully parsed polygon line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub polygon: Polygon,
    /// At least one coordinate was clamped into [0, 1]
    pub clamped: bool,
}

/// YOLO bounding box (xywhn), all values normalized to the image size
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub class_id: ClassId,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Format as a YOLO detection label line (without the trailing newline)
    pub fn to_label_line(&self, precision: usize) -> String {
        format!(
            "{} {:.p$} {:.p$} {:.p$} {:.p$}",
            self.class_id,
            self.x_center,
            self.y_center,
            self.width,
            self.height,
            p = precision
        )
    }
}

// Per-file conversion statistics
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub lines_processed: usize,
    pub empty_lines: usize,
    pub lines_skipped: usize,
    pub lines_clamped: usize,
    pub objects_converted: usize,
}

impl FileStats {
    /// True when the file held no label lines at all
    pub fn is_empty_input(&self) -> bool {
        self.lines_processed == self.empty_lines
    }

    pub fn print_summary(&self, output: &std::path::Path) {
        log::info!("Conversion complete!");
        log::info!("Statistics:");
        log::info!("   - Input lines processed: {}", self.lines_processed);
        log::info!("   - Objects converted: {}", self.objects_converted);
        log::info!("   - Lines skipped: {}", self.lines_skipped);
        if self.empty_lines > 0 {
            log::info!("   - Empty lines: {}", self.empty_lines);
        }
        if self.lines_clamped > 0 {
            log::warn!("   - Lines with clamped coordinates: {}", self.lines_clamped);
        }
        log::info!("   - Output saved to: {}", output.display());
    }
}

// A file that could not be converted in batch mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

// Aggregated statistics of a batch run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub files_found: usize,
    pub files_converted: usize,
    pub files_empty: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub lines_processed: usize,
    pub lines_skipped: usize,
    pub objects_converted: usize,
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    pub fn record_success(&mut self, stats: &FileStats) {
        self.files_converted += 1;
        if stats.is_empty_input() {
            self.files_empty += 1;
        }
        self.lines_processed += stats.lines_processed;
        self.lines_skipped += stats.lines_skipped;
        self.objects_converted += stats.objects_converted;
    }

    pub fn record_failure(&mut self, path: PathBuf, reason: String) {
        self.files_failed += 1;
        self.failures.push(FileFailure { path, reason });
    }

    /// A readable file whose every label line was malformed
    pub fn record_skipped(&mut self, path: PathBuf, reason: String) {
        self.files_skipped += 1;
        self.failures.push(FileFailure { path, reason });
    }

    pub fn print_summary(&self) {
        log::info!("=== Batch Summary ===");
        log::info!("Files found: {}", self.files_found);
        log::info!("Files converted: {}", self.files_converted);
        if self.files_empty > 0 {
            log::info!("Empty files (no objects): {}", self.files_empty);
        }
        log::info!("Files skipped (no valid lines): {}", self.files_skipped);
        log::info!("Files failed: {}", self.files_failed);
        log::info!("Lines processed: {}", self.lines_processed);
        log::info!("Lines skipped: {}", self.lines_skipped);
        log::info!("Objects converted: {}", self.objects_converted);

        for failure in &self.failures {
            log::warn!("Not converted: {} ({})", failure.path.display(), failure.reason);
        }
    }
}

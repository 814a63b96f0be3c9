//! YOLO polygon to bounding-box label converter
//!
//! This library converts YOLO segmentation labels (a class id followed by
//! normalized polygon vertices) into YOLO detection labels
//! (`class_id x_center y_center width height`), one file at a time or for a
//! whole directory.

pub mod batch;
pub mod config;
pub mod conversion;
pub mod error;
pub mod io;
pub mod parser;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use batch::{batch_convert, collect_label_files};
pub use config::{Args, ConversionOptions, RangePolicy};
pub use conversion::{convert_line, polygon_to_bbox};
pub use error::{ConvertError, LineError};
pub use io::{convert_file, convert_single_file, write_summary_json};
pub use parser::parse_polygon_line;
pub use types::{BatchSummary, BoundingBox, ClassId, FileStats, ParsedLine, Polygon};

use clap::{Parser, ValueEnum};
use std::str::FromStr;

/// Default number of decimal digits written for each bbox value
pub const DEFAULT_PRECISION: usize = 6;

const MAX_PRECISION: usize = 12;

/// Command-line arguments for converting YOLO polygon labels to bounding boxes.
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Convert YOLO polygon segmentation labels to bounding-box labels",
    long_about = None,
    after_help = "Examples:\n  \
        polygon2bbox labels.txt\n  \
        polygon2bbox labels.txt output_bbox.txt\n  \
        polygon2bbox --batch input_folder/\n  \
        polygon2bbox --batch input_folder/ --output output_folder/"
)]
pub struct Args {
    /// Input label file, or directory with --batch
    pub input: String,

    /// Output label file (or directory with --batch)
    pub output: Option<String>,

    /// Convert every .txt label file in the input directory
    #[arg(long = "batch")]
    pub batch: bool,

    /// Output directory for batch mode
    #[arg(short = 'o', long = "output", requires = "batch", conflicts_with = "output")]
    pub output_dir: Option<String>,

    /// What to do with coordinates outside [0, 1]: 'skip' the line or 'clamp' it
    #[arg(long = "range_policy", value_enum, default_value = "skip")]
    pub range_policy: RangePolicy,

    /// Decimal digits written for each bbox value
    #[arg(long = "precision", default_value_t = DEFAULT_PRECISION, value_parser = validate_precision)]
    pub precision: usize,

    /// Convert batch files in parallel
    #[arg(long = "parallel", requires = "batch")]
    pub parallel: bool,

    /// Also write the run summary as JSON to this path
    #[arg(long = "summary_json")]
    pub summary_json: Option<String>,
}

impl Args {
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            range_policy: self.range_policy,
            precision: self.precision,
        }
    }

    /// Output directory for batch mode, from either the positional or the flag form
    pub fn batch_output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref().or(self.output.as_deref())
    }
}

// Policy for coordinates outside the normalized range
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum RangePolicy {
    /// Skip the whole line
    #[default]
    Skip,
    /// Clamp the coordinate into [0, 1] and keep the line
    Clamp,
}

/// Options shared by the line, file and batch converters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    pub range_policy: RangePolicy,
    pub precision: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            range_policy: RangePolicy::Skip,
            precision: DEFAULT_PRECISION,
        }
    }
}

// Validate that the precision is between 1 and MAX_PRECISION digits
fn validate_precision(s: &str) -> Result<usize, String> {
    match usize::from_str(s) {
        Ok(val) if (1..=MAX_PRECISION).contains(&val) => Ok(val),
        _ => Err(format!("PRECISION must be between 1 and {}", MAX_PRECISION)),
    }
}

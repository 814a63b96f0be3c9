//! Parsing and validation of YOLO polygon label lines.
//!
//! A valid line is `<class_id> <x1> <y1> <x2> <y2> ... <xn> <yn>` with at
//! least three vertices and every coordinate normalized to [0, 1].

use crate::config::RangePolicy;
use crate::error::LineError;
use crate::types::{ClassId, ParsedLine, Polygon, MIN_VERTICES};

/// Class id plus three vertex pairs
const MIN_TOKENS: usize = 1 + MIN_VERTICES * 2;

/// Parse one label line.
///
/// Returns `Ok(None)` for blank lines, `Err` with the skip reason for
/// malformed ones.
pub fn parse_polygon_line(
    line: &str,
    policy: RangePolicy,
) -> Result<Option<ParsedLine>, LineError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }

    if tokens.len() < MIN_TOKENS {
        return Err(LineError::TooFewTokens {
            found: tokens.len(),
        });
    }

    let class_id = ClassId::parse(tokens[0])?;

    let coord_tokens = &tokens[1..];
    if coord_tokens.len() % 2 != 0 {
        return Err(LineError::OddCoordinateCount(coord_tokens.len()));
    }

    let mut clamped = false;
    let mut coords = Vec::with_capacity(coord_tokens.len());
    for token in coord_tokens {
        let value = parse_coordinate(token)?;
        if (0.0..=1.0).contains(&value) {
            coords.push(value);
            continue;
        }
        match policy {
            RangePolicy::Skip => return Err(LineError::OutOfRange(value)),
            RangePolicy::Clamp => {
                clamped = true;
                coords.push(value.clamp(0.0, 1.0));
            }
        }
    }

    let vertices = coords.chunks_exact(2).map(|xy| (xy[0], xy[1])).collect();
    let polygon = Polygon::new(class_id, vertices)?;

    Ok(Some(ParsedLine { polygon, clamped }))
}

// Rust accepts "nan" and "inf" as floats; neither is a coordinate.
// Adding 0.0 turns -0.0 into 0.0 so no sign reaches the output.
fn parse_coordinate(token: &str) -> Result<f64, LineError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value + 0.0),
        _ => Err(LineError::NonNumeric(token.to_string())),
    }
}

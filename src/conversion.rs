use crate::config::ConversionOptions;
use crate::error::LineError;
use crate::parser::parse_polygon_line;
use crate::types::{BoundingBox, Polygon};

/// Reduce a polygon to the axis-aligned box enclosing all of its vertices
pub fn polygon_to_bbox(polygon: &Polygon) -> BoundingBox {
    let (x_min, y_min, x_max, y_max) = polygon.vertices().iter().fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(x_min, y_min, x_max, y_max), &(x, y)| {
            (x_min.min(x), y_min.min(y), x_max.max(x), y_max.max(y))
        },
    );

    BoundingBox {
        class_id: polygon.class_id().clone(),
        x_center: (x_min + x_max) / 2.0,
        y_center: (y_min + y_max) / 2.0,
        width: x_max - x_min,
        height: y_max - y_min,
    }
}

/// Convert a single polygon label string into a bbox label string.
///
/// Blank input yields `Ok(None)`.
pub fn convert_line(line: &str, options: &ConversionOptions) -> Result<Option<String>, LineError> {
    let parsed = match parse_polygon_line(line, options.range_policy)? {
        Some(parsed) => parsed,
        None => return Ok(None),
    };
    let bbox = polygon_to_bbox(&parsed.polygon);
    Ok(Some(bbox.to_label_line(options.precision)))
}

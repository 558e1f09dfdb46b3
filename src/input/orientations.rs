//! Orientation table reader
//!
//! One row per orientation: `id x y z`. Any violation rejects the whole
//! table, before a single orientation is processed.

use std::collections::HashMap;

use crate::consts::{ANGLE_LIMIT, MAX_ORIENTATION_ID, MAX_ORIENTATIONS};
use crate::error::{DropError, Result};
use crate::sim::OrientationRequest;

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with("**") || line.starts_with('#')
}

fn parse_row(line_no: usize, line: &str) -> Result<OrientationRequest> {
    let cleaned = line.replace(',', " ");
    let fields: Vec<&str> = cleaned.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(DropError::format(
            line_no,
            format!("expected 4 fields (id x y z), found {}", fields.len()),
        ));
    }

    let mut values = [0.0f64; 4];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field
            .parse()
            .map_err(|_| DropError::format(line_no, format!("non-numeric field '{field}'")))?;
    }

    let [id, x, y, z] = values;
    if !(0.0..=MAX_ORIENTATION_ID as f64).contains(&id) || id.fract() != 0.0 {
        return Err(DropError::format(
            line_no,
            format!("orientation id {id} must be an integer in [0, {MAX_ORIENTATION_ID}]"),
        ));
    }
    for (axis, angle) in [("x", x), ("y", y), ("z", z)] {
        if !(-ANGLE_LIMIT..=ANGLE_LIMIT).contains(&angle) {
            return Err(DropError::format(
                line_no,
                format!("angle {axis}={angle} outside [-{ANGLE_LIMIT}, {ANGLE_LIMIT}]"),
            ));
        }
    }

    Ok(OrientationRequest::new(id as u32, x, y, z))
}

/// Parse and validate an orientation table, keeping input order
pub fn parse_orientations(text: &str) -> Result<Vec<OrientationRequest>> {
    let mut requests = Vec::new();
    let mut first_seen: HashMap<u32, usize> = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if is_skippable(line) {
            continue;
        }
        let line_no = idx + 1;

        if requests.len() == MAX_ORIENTATIONS {
            return Err(DropError::format(
                line_no,
                format!("too many orientations, at most {MAX_ORIENTATIONS} per run"),
            ));
        }

        let request = parse_row(line_no, line)?;
        if let Some(first) = first_seen.insert(request.id, line_no) {
            return Err(DropError::format(
                line_no,
                format!(
                    "duplicate orientation id {} (first used on line {first})",
                    request.id
                ),
            ));
        }
        requests.push(request);
    }

    if requests.is_empty() {
        return Err(DropError::MissingInput(
            "drop orientations input is empty".to_string(),
        ));
    }
    Ok(requests)
}

//! Body model reader
//!
//! Nodes are read from `*node` blocks. `**` lines are comments; any other
//! `*` keyword line ends the block. Rows look like `id, x, y, z` (commas or
//! spaces). Malformed rows are skipped and reported, never fatal.

use std::fmt;
use std::path::Path;

use crate::error::{DropError, Result};
use crate::sim::{Node, PointCloud};

/// Why a node row was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Not exactly four fields
    FieldCount(usize),
    NonNumeric,
    /// Characters other than digits, `.`, `,`, `-` and whitespace
    UnexpectedCharacters,
    /// Node id is not a non-negative integer
    InvalidId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCount(n) => write!(f, "wrong number of values ({n}, expected 4)"),
            SkipReason::NonNumeric => write!(f, "non-numeric"),
            SkipReason::UnexpectedCharacters => write!(f, "unexpected characters"),
            SkipReason::InvalidId => write!(f, "node id is not a non-negative integer"),
        }
    }
}

/// A skipped model row
#[derive(Debug, Clone, PartialEq)]
pub struct RowWarning {
    /// 1-based line number
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Parsed nodes plus the rows that were skipped
#[derive(Debug, Clone, Default)]
pub struct ModelParse {
    pub cloud: PointCloud,
    pub warnings: Vec<RowWarning>,
}

fn is_node_marker(line: &str) -> bool {
    line.get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case("*node"))
}

fn allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '-') || c.is_whitespace()
}

fn parse_row(line: &str) -> std::result::Result<Node, SkipReason> {
    let cleaned = line.replace(',', " ");
    let fields: Vec<&str> = cleaned.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(SkipReason::FieldCount(fields.len()));
    }

    let mut values = [0.0f64; 4];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| SkipReason::NonNumeric)?;
    }
    if !line.chars().all(allowed_char) {
        return Err(SkipReason::UnexpectedCharacters);
    }

    let [id, x, y, z] = values;
    if id < 0.0 || id.fract() != 0.0 || id > u64::MAX as f64 {
        return Err(SkipReason::InvalidId);
    }
    Ok(Node::new(id as u64, x, y, z))
}

/// Parse every `*node` block in `text`
pub fn parse_model(text: &str) -> ModelParse {
    let mut nodes = Vec::new();
    let mut warnings = Vec::new();
    let mut in_block = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if !in_block {
            in_block = is_node_marker(line);
            continue;
        }
        if line.starts_with("**") {
            continue;
        }
        if line.starts_with('*') {
            in_block = is_node_marker(line);
            continue;
        }
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        match parse_row(line) {
            Ok(node) => nodes.push(node),
            Err(reason) => {
                log::warn!("Skipping invalid line {} ({}): {}", idx + 1, reason, line);
                warnings.push(RowWarning {
                    line: idx + 1,
                    text: line.to_string(),
                    reason,
                });
            }
        }
    }

    ModelParse {
        cloud: PointCloud::new(nodes),
        warnings,
    }
}

/// Read and parse a model file. An empty node set is fatal.
pub fn read_model(path: &Path) -> Result<ModelParse> {
    let text = super::read_required(path, "System model")?;
    let parsed = parse_model(&text);
    if parsed.cloud.is_empty() {
        return Err(DropError::MissingInput(format!(
            "no valid node data found in system model file {}",
            path.display()
        )));
    }
    Ok(parsed)
}

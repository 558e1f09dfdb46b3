//! Drop height discovery in the initial-conditions file
//!
//! Any line mentioning `drop_height` (any case) is read as `key = value`.
//! Each valid value is offered to the caller's policy in file order until
//! one is accepted; otherwise the policy's fallback is used.

use crate::config::ConfirmDropHeight;
use crate::error::{DropError, Result};

/// A syntactically valid `drop_height` line
#[derive(Debug, Clone, PartialEq)]
pub struct HeightCandidate {
    /// 1-based line number
    pub line: usize,
    pub text: String,
    /// Height in mm
    pub value: f64,
}

fn parse_height(line: &str) -> Option<f64> {
    let value: f64 = line.split('=').nth(1)?.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// All valid `drop_height` values in file order
pub fn drop_height_candidates(content: &str) -> Vec<HeightCandidate> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains("drop_height"))
        .filter_map(|(idx, line)| match parse_height(line) {
            Some(value) => Some(HeightCandidate {
                line: idx + 1,
                text: line.trim().to_string(),
                value,
            }),
            None => {
                log::warn!("Invalid drop_height format in line {}: {}", idx + 1, line.trim());
                None
            }
        })
        .collect()
}

/// Settle on a drop height using `policy`
pub fn resolve_drop_height(content: &str, policy: &mut dyn ConfirmDropHeight) -> Result<f64> {
    for candidate in drop_height_candidates(content) {
        log::info!(
            "Found drop_height = {} mm (line {})",
            candidate.value,
            candidate.line
        );
        if policy.confirm(candidate.value, &candidate.text) {
            return Ok(candidate.value);
        }
        log::info!("drop_height = {} mm rejected", candidate.value);
    }

    match policy.fallback() {
        Some(value) if value.is_finite() && value >= 0.0 => {
            log::info!("Using supplied drop_height = {} mm", value);
            Ok(value)
        }
        Some(value) => Err(DropError::ConfigurationAmbiguity(format!(
            "supplied drop_height {value} mm must be a finite, non-negative number"
        ))),
        None => Err(DropError::ConfigurationAmbiguity(
            "no confirmed drop_height in the initial conditions and no fallback value supplied"
                .to_string(),
        )),
    }
}

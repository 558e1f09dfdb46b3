//! Run configuration
//!
//! Everything a run needs is fixed up front in a [`RunConfig`]; nothing is
//! read from global state. Loadable from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, NODE_ID_BASE, SUPPORT_MARGIN};
use crate::error::{DropError, Result};

/// Decides on drop heights found in the initial-conditions file
pub trait ConfirmDropHeight {
    /// Accept or reject `value`, discovered on `line`
    fn confirm(&mut self, value: f64, line: &str) -> bool;

    /// Height to use when no discovered value was accepted
    fn fallback(&mut self) -> Option<f64>;
}

/// Non-interactive drop-height policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropHeightPolicy {
    /// Accept the first valid value in the conditions file
    pub accept_found: bool,
    /// Height (mm) used when nothing is accepted
    pub fallback: Option<f64>,
}

impl Default for DropHeightPolicy {
    fn default() -> Self {
        Self {
            accept_found: true,
            fallback: None,
        }
    }
}

impl ConfirmDropHeight for DropHeightPolicy {
    fn confirm(&mut self, _value: f64, _line: &str) -> bool {
        self.accept_found
    }

    fn fallback(&mut self) -> Option<f64> {
        self.fallback
    }
}

/// Where the orientation table comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationSource {
    File(PathBuf),
    /// Rows typed directly, same format as the file
    Inline(String),
}

impl OrientationSource {
    /// Table text, whatever the source
    pub fn load(&self) -> Result<String> {
        match self {
            OrientationSource::File(path) => crate::input::read_required(path, "Drop orientations"),
            OrientationSource::Inline(text) if text.trim().is_empty() => Err(
                DropError::MissingInput("manual drop orientations input is empty".to_string()),
            ),
            OrientationSource::Inline(text) => Ok(text.clone()),
        }
    }
}

fn default_gravity() -> f64 {
    GRAVITY
}

fn default_support_margin() -> f64 {
    SUPPORT_MARGIN
}

fn default_node_id_base() -> u64 {
    NODE_ID_BASE
}

/// Immutable description of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Body model with `*node` blocks
    pub model: PathBuf,
    /// Initial conditions; also names the output decks
    pub conditions: PathBuf,
    pub orientations: OrientationSource,
    #[serde(default)]
    pub drop_height: DropHeightPolicy,
    /// mm/ms²
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// mm
    #[serde(default = "default_support_margin")]
    pub support_margin: f64,
    #[serde(default = "default_node_id_base")]
    pub node_id_base: u64,
}

impl RunConfig {
    pub fn new(
        model: impl Into<PathBuf>,
        conditions: impl Into<PathBuf>,
        orientations: OrientationSource,
    ) -> Self {
        Self {
            model: model.into(),
            conditions: conditions.into(),
            orientations,
            drop_height: DropHeightPolicy::default(),
            gravity: GRAVITY,
            support_margin: SUPPORT_MARGIN,
            node_id_base: NODE_ID_BASE,
        }
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| DropError::io(path, e))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| DropError::Config(format!("{}: {e}", path.display())))?;
        log::info!("Loaded run configuration from {}", path.display());
        Ok(config)
    }
}

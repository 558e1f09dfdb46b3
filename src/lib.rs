//! Dropdeck - drop-impact initial conditions for structural simulation
//!
//! Core modules:
//! - `sim`: Rotation, support distance and the sequential orientation fold
//! - `input`: Model, initial-conditions and orientation-table readers
//! - `deck`: Per-orientation input deck formatting and writing
//! - `config`: Immutable run configuration and drop-height confirmation
//! - `pipeline`: Batch driver tying the above together

pub mod config;
pub mod deck;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod sim;
pub mod summary;

pub use config::{ConfirmDropHeight, DropHeightPolicy, OrientationSource, RunConfig};
pub use error::{DropError, Result};
pub use pipeline::{RunOutput, run, run_with};
pub use summary::RunSummary;

/// Physical and format constants (units: mm, ms, g)
pub mod consts {
    /// Gravitational acceleration in mm/ms²
    pub const GRAVITY: f64 = 9.8e-3;
    /// Clearance added to the support distance so the plane never touches the body
    pub const SUPPORT_MARGIN: f64 = 0.0001;
    /// Reference node ids are this base plus the orientation id
    pub const NODE_ID_BASE: u64 = 90_000_000;

    /// Maximum number of orientations per run
    pub const MAX_ORIENTATIONS: usize = 25;
    /// Largest accepted orientation id
    pub const MAX_ORIENTATION_ID: u32 = 25;
    /// Angle components must lie in [-ANGLE_LIMIT, ANGLE_LIMIT]
    pub const ANGLE_LIMIT: f64 = 1.0;
}

/// Impact speed reached after a free fall from `drop_height` (v = sqrt(2gh))
#[inline]
pub fn impact_speed(drop_height: f64, gravity: f64) -> f64 {
    (2.0 * drop_height * gravity).sqrt()
}

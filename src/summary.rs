//! Run summary
//!
//! Serializable record of what a run computed and where the decks went.
//! Ground planes are included so external viewers can draw them.

use std::path::PathBuf;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::sim::{DropResult, GroundPlane};

/// Points sampled around each ground rim
pub const RIM_SEGMENTS: usize = 32;

/// One processed orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropSummary {
    pub id: u32,
    pub angles: DVec3,
    pub normal: DVec3,
    pub support_distance: f64,
    pub new_center: DVec3,
    pub velocity: DVec3,
    pub ground: GroundPlane,
    /// Polyline around the ground disc, `RIM_SEGMENTS` points
    pub rim: Vec<DVec3>,
    pub deck: PathBuf,
}

impl DropSummary {
    pub fn new(result: &DropResult, ground_radius: f64, deck: PathBuf) -> Self {
        let ground = GroundPlane::for_drop(result, ground_radius);
        Self {
            id: result.orientation.id,
            angles: result.orientation.angles,
            normal: result.normal,
            support_distance: result.support_distance,
            new_center: result.new_center,
            velocity: result.velocity,
            ground,
            rim: ground.circle_points(RIM_SEGMENTS),
            deck,
        }
    }
}

/// Whole-run record, drops in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub node_count: usize,
    pub skipped_rows: usize,
    /// Bounding box extents L, W, H (mm)
    pub dimensions: DVec3,
    pub initial_center: DVec3,
    pub ground_radius: f64,
    /// mm
    pub drop_height: f64,
    /// mm/ms
    pub initial_velocity: f64,
    pub drops: Vec<DropSummary>,
}

impl RunSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

//! Circular ground plane descriptor

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::state::DropResult;

/// Ground disc tangent to the body for one orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    pub center: DVec3,
    pub normal: DVec3,
    /// Shared by every orientation of a run
    pub radius: f64,
    /// In-plane unit axis
    pub u: DVec3,
    /// In-plane unit axis, normal × u
    pub v: DVec3,
}

impl GroundPlane {
    pub fn new(center: DVec3, normal: DVec3, radius: f64) -> Self {
        // Cross with X unless the normal is (anti)parallel to it
        let reference = if normal.cross(DVec3::X).length_squared() > 1e-12 {
            DVec3::X
        } else {
            DVec3::Y
        };
        let u = normal.cross(reference).normalize_or_zero();
        let v = normal.cross(u).normalize_or_zero();
        Self {
            center,
            normal,
            radius,
            u,
            v,
        }
    }

    /// Plane through the new center of a drop result
    pub fn for_drop(result: &DropResult, radius: f64) -> Self {
        Self::new(result.new_center, result.normal, radius)
    }

    /// `segments` points evenly spaced around the rim
    pub fn circle_points(&self, segments: usize) -> Vec<DVec3> {
        (0..segments)
            .map(|i| {
                let theta = TAU * i as f64 / segments as f64;
                self.center + self.radius * (theta.cos() * self.u + theta.sin() * self.v)
            })
            .collect()
    }
}

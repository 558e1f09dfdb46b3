//! Support distance: how far a tangent plane sits from the center along a direction

use glam::DVec3;

use super::state::PointCloud;

/// Tangent placement along one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    /// Largest positive projection, 0 when no point projects positively
    pub distance: f64,
    /// (distance + margin) · direction
    pub displacement: DVec3,
}

impl Support {
    /// No point lies on the positive side of the direction
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.distance == 0.0
    }
}

/// Maximum of `dot(p - center, direction)` over points with a positive projection
pub fn support_distance(points: &PointCloud, center: DVec3, direction: DVec3) -> f64 {
    points
        .positions()
        .map(|p| (p - center).dot(direction))
        .filter(|&proj| proj > 0.0)
        .fold(0.0, f64::max)
}

/// Offset from `center` that puts a plane with normal `direction` just outside the body
pub fn tangent_offset(points: &PointCloud, center: DVec3, direction: DVec3, margin: f64) -> Support {
    let distance = support_distance(points, center, direction);
    Support {
        distance,
        displacement: (distance + margin) * direction,
    }
}

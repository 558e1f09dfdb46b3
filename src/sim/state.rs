//! Body model and per-run simulation state
//!
//! Everything the sequencer reads or produces lives here.

use glam::DVec3;

/// A labeled mesh node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: u64,
    pub pos: DVec3,
}

impl Node {
    pub fn new(id: u64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            pos: DVec3::new(x, y, z),
        }
    }
}

/// Axis-aligned bounding box of a point cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds {
    /// Length, width and height along X, Y, Z
    #[inline]
    pub fn extents(&self) -> DVec3 {
        self.max - self.min
    }

    /// Largest of the three extents (used as the ground radius)
    #[inline]
    pub fn max_extent(&self) -> f64 {
        self.extents().max_element()
    }
}

/// Ordered node set. Translation keeps the order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    nodes: Vec<Node>,
}

impl PointCloud {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.nodes.iter().map(|n| n.pos)
    }

    /// Mean of all node positions
    pub fn centroid(&self) -> Option<DVec3> {
        if self.nodes.is_empty() {
            return None;
        }
        let sum: DVec3 = self.positions().sum();
        Some(sum / self.nodes.len() as f64)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self.positions();
        let first = positions.next()?;
        let (min, max) = positions.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Bounds { min, max })
    }

    /// Shift every node by `delta`
    pub fn translate(&mut self, delta: DVec3) {
        for node in &mut self.nodes {
            node.pos += delta;
        }
    }
}

/// A requested impact attitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationRequest {
    /// Orientation id in [0, 25]
    pub id: u32,
    /// Angle triple, each component in [-1, 1]
    pub angles: DVec3,
}

impl OrientationRequest {
    pub fn new(id: u32, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            angles: DVec3::new(x, y, z),
        }
    }
}

/// Running state threaded through the orientation fold
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Current reference center (starts at the body centroid)
    pub center: DVec3,
    /// Working copy of the body, displaced after every step
    pub points: PointCloud,
}

impl SimulationState {
    /// Start state: center at the centroid of `points`. `None` for an empty cloud.
    pub fn from_cloud(points: PointCloud) -> Option<Self> {
        let center = points.centroid()?;
        Some(Self { center, points })
    }
}

/// Outcome of placing the ground for one orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropResult {
    pub orientation: OrientationRequest,
    /// Rotated canonical axis used for placement
    pub normal: DVec3,
    /// Maximum positive projection of the body onto `normal` (0 when none is positive)
    pub support_distance: f64,
    pub displacement: DVec3,
    pub new_center: DVec3,
    /// Impact velocity (initial speed times the raw angle triple)
    pub velocity: DVec3,
}

//! Drop placement engine
//!
//! Pure geometry, no I/O. Orientations are processed strictly in input order:
//! every step works on the body as displaced by the previous step.

pub mod ground;
pub mod rotation;
pub mod sequence;
pub mod state;
pub mod support;

pub use ground::GroundPlane;
pub use rotation::{impact_normal, rotation_matrix};
pub use sequence::{SequenceOutcome, StepParams, advance, run_sequence};
pub use state::{Bounds, DropResult, Node, OrientationRequest, PointCloud, SimulationState};
pub use support::{Support, support_distance, tangent_offset};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::state::{Node, PointCloud};

    /// Axis-aligned cube of the given side, centered at the origin
    pub fn cube(side: f64) -> PointCloud {
        let h = side / 2.0;
        let mut nodes = Vec::with_capacity(8);
        let mut id = 1;
        for x in [-h, h] {
            for y in [-h, h] {
                for z in [-h, h] {
                    nodes.push(Node::new(id, x, y, z));
                    id += 1;
                }
            }
        }
        PointCloud::new(nodes)
    }
}

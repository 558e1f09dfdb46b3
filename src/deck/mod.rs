//! Input deck emission
//!
//! One deck per orientation: the original conditions verbatim, followed by
//! the velocity parameters, the reference node, the local orientation frame
//! and the rigid analytical ground. Field order and precision are fixed by
//! the downstream solver's input grammar.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{DropError, Result};
use crate::sim::DropResult;

/// Run-level values shared by every deck
#[derive(Debug, Clone, Copy)]
pub struct DeckContext<'a> {
    /// Initial-conditions file content, copied verbatim
    pub conditions: &'a str,
    /// Ground radius (mm), constant for the run
    pub ground_radius: f64,
    pub node_id_base: u64,
}

/// A formatted deck for one drop result
#[derive(Debug, Clone, Copy)]
pub struct Deck<'a> {
    pub result: &'a DropResult,
    pub context: &'a DeckContext<'a>,
}

impl<'a> Deck<'a> {
    pub fn new(result: &'a DropResult, context: &'a DeckContext<'a>) -> Self {
        Self { result, context }
    }

    /// Id of the ground's reference node
    pub fn reference_node(&self) -> u64 {
        self.context.node_id_base + u64::from(self.result.orientation.id)
    }
}

impl fmt::Display for Deck<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.result.orientation.id;
        let node = self.reference_node();
        let c = self.result.new_center;
        let a = self.result.orientation.angles;
        let v = self.result.velocity;

        f.write_str(self.context.conditions)?;
        write!(
            f,
            "\n*parameters\nVx={:.2};\nVy={:.2};\nVz={:.2}",
            v.x, v.y, v.z
        )?;
        write!(f, "\n*node\n{node}, {:.6}, {:.6}, {:.6}", c.x, c.y, c.z)?;
        write!(
            f,
            "\n*orientations, name=local_coord_ori_{id}\n{:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}",
            c.x, c.y, c.z, -a.x, -a.y, -a.z
        )?;
        write!(
            f,
            "\n*SURFACE, TYPE=analytical_surface_type, NAME=ground_{id}, FILLET RADIUS={:.2}",
            self.context.ground_radius
        )?;
        write!(
            f,
            "\n*RIGID BODY, NAME=ground_{id}, REFERENCE NODE={node}, SURFACE=ground_{id}"
        )
    }
}

/// Deck path next to the conditions file: `<stem>_ori_<id>_<x>_<y>_<z>.txt`
pub fn deck_path(conditions: &Path, result: &DropResult) -> PathBuf {
    let stem = conditions
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "conditions".to_string());
    let a = result.orientation.angles;
    let name = format!(
        "{stem}_ori_{}_{:.2}_{:.2}_{:.2}.txt",
        result.orientation.id, a.x, a.y, a.z
    );
    conditions.with_file_name(name)
}

/// Write one deck. Earlier decks of the run are left in place on failure.
pub fn write_deck(path: &Path, deck: &Deck<'_>) -> Result<()> {
    std::fs::write(path, deck.to_string()).map_err(|e| DropError::io(path, e))?;
    log::info!(
        "Wrote orientation {} deck to {}",
        deck.result.orientation.id,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NODE_ID_BASE;
    use crate::sim::OrientationRequest;
    use glam::DVec3;

    fn sample_result() -> DropResult {
        DropResult {
            orientation: OrientationRequest::new(1, 0.0, 0.0, 1.0),
            normal: DVec3::Z,
            support_distance: 5.0,
            displacement: DVec3::new(0.0, 0.0, 5.0001),
            new_center: DVec3::new(0.0, 0.0, 5.0001),
            velocity: DVec3::new(0.0, 0.0, 4.427188724),
        }
    }

    #[test]
    fn test_exact_deck_text() {
        let result = sample_result();
        let context = DeckContext {
            conditions: "*heading\nbox drop\n",
            ground_radius: 10.0,
            node_id_base: NODE_ID_BASE,
        };
        let text = Deck::new(&result, &context).to_string();
        let expected = "*heading\nbox drop\n\
\n*parameters\nVx=0.00;\nVy=0.00;\nVz=4.43\
\n*node\n90000001, 0.000000, 0.000000, 5.000100\
\n*orientations, name=local_coord_ori_1\n0.000000, 0.000000, 5.000100, -0.000000, -0.000000, -1.000000\
\n*SURFACE, TYPE=analytical_surface_type, NAME=ground_1, FILLET RADIUS=10.00\
\n*RIGID BODY, NAME=ground_1, REFERENCE NODE=90000001, SURFACE=ground_1";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_precision_with_mixed_signs() {
        let result = DropResult {
            orientation: OrientationRequest::new(12, -0.5, 0.25, -1.0),
            normal: DVec3::Z,
            support_distance: 1.0,
            displacement: DVec3::ZERO,
            new_center: DVec3::new(-12.3456789, 100.0, 0.1234567),
            velocity: DVec3::new(-2.346, 1.0, -4.0),
        };
        let context = DeckContext {
            conditions: "",
            ground_radius: 123.456,
            node_id_base: NODE_ID_BASE,
        };
        let text = Deck::new(&result, &context).to_string();
        assert!(text.starts_with("\n*parameters\nVx=-2.35;\nVy=1.00;\nVz=-4.00\n"));
        assert!(text.contains("\n90000012, -12.345679, 100.000000, 0.123457\n"));
        assert!(text.contains(", 0.500000, -0.250000, 1.000000\n"));
        assert!(text.contains("FILLET RADIUS=123.46\n"));
        assert!(text.ends_with("REFERENCE NODE=90000012, SURFACE=ground_12"));
    }

    #[test]
    fn test_deck_path() {
        let result = sample_result();
        let path = deck_path(Path::new("/runs/box/init_conditions.txt"), &result);
        assert_eq!(
            path,
            PathBuf::from("/runs/box/init_conditions_ori_1_0.00_0.00_1.00.txt")
        );

        let mut negative = result;
        negative.orientation = OrientationRequest::new(4, -0.5, 1.0, -0.25);
        let path = deck_path(Path::new("cond"), &negative);
        assert_eq!(path, PathBuf::from("cond_ori_4_-0.50_1.00_-0.25.txt"));
    }
}

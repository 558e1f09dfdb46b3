//! Batch driver
//!
//! Reads and validates every input before any deck is written, runs the
//! orientation fold, then writes one deck per result in input order. A write
//! failure stops the run; decks already written stay on disk.

use crate::config::{ConfirmDropHeight, RunConfig};
use crate::deck::{Deck, DeckContext, deck_path, write_deck};
use crate::error::{DropError, Result};
use crate::impact_speed;
use crate::input::{parse_orientations, read_model, read_required, resolve_drop_height};
use crate::sim::{SequenceOutcome, SimulationState, StepParams, run_sequence};
use crate::summary::{DropSummary, RunSummary};

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub outcome: SequenceOutcome,
    pub summary: RunSummary,
}

/// Run with the configuration's own drop-height policy
pub fn run(config: &RunConfig) -> Result<RunOutput> {
    let mut policy = config.drop_height;
    run_with(config, &mut policy)
}

/// Run with a caller-supplied drop-height policy
pub fn run_with(config: &RunConfig, policy: &mut dyn ConfirmDropHeight) -> Result<RunOutput> {
    // Body model
    let model = read_model(&config.model)?;
    let node_count = model.cloud.len();
    log::info!(
        "System model read from {} (coordinates in mm): {} nodes, {} rows skipped",
        config.model.display(),
        node_count,
        model.warnings.len()
    );
    for node in model.cloud.nodes().iter().take(5) {
        log::debug!("  node {}: {:?}", node.id, node.pos);
    }

    let bounds = model.cloud.bounds().ok_or_else(|| {
        DropError::MissingInput("system model contains no nodes".to_string())
    })?;
    let dimensions = bounds.extents();
    log::info!(
        "Object spatial dimensions: L={:.2} mm, W={:.2} mm, H={:.2} mm",
        dimensions.x,
        dimensions.y,
        dimensions.z
    );

    let skipped_rows = model.warnings.len();
    let state = SimulationState::from_cloud(model.cloud).ok_or_else(|| {
        DropError::MissingInput("system model contains no nodes".to_string())
    })?;
    let initial_center = state.center;
    log::info!(
        "Center point o: ({:.2}, {:.2}, {:.2}) mm",
        initial_center.x,
        initial_center.y,
        initial_center.z
    );

    let ground_radius = bounds.max_extent();
    log::info!("Circular ground size: {:.2} mm", ground_radius);

    // Orientation table, validated as a whole before anything else is asked
    let requests = parse_orientations(&config.orientations.load()?)?;
    log::info!("Valid drop orientations ({}):", requests.len());
    for r in &requests {
        log::info!(
            "  {:>2}: ({:.3}, {:.3}, {:.3})",
            r.id,
            r.angles.x,
            r.angles.y,
            r.angles.z
        );
    }

    // Initial conditions and impact speed
    let conditions = read_required(&config.conditions, "System initial conditions")?;
    let drop_height = resolve_drop_height(&conditions, policy)?;
    let initial_velocity = impact_speed(drop_height, config.gravity);
    log::info!(
        "Calculated initial_velocity = {:.2} mm/ms based on drop_height = {} mm and gravity = {} mm/ms^2",
        initial_velocity,
        drop_height,
        config.gravity
    );

    let params = StepParams::new(initial_velocity, config.support_margin);
    let outcome = run_sequence(state, &requests, &params);

    let context = DeckContext {
        conditions: &conditions,
        ground_radius,
        node_id_base: config.node_id_base,
    };
    let mut drops = Vec::with_capacity(outcome.results.len());
    for result in &outcome.results {
        let path = deck_path(&config.conditions, result);
        write_deck(&path, &Deck::new(result, &context))?;
        drops.push(DropSummary::new(result, ground_radius, path));
    }
    log::info!(
        "Generated {} drop orientation files based on {}",
        drops.len(),
        config.conditions.display()
    );

    let summary = RunSummary {
        node_count,
        skipped_rows,
        dimensions,
        initial_center,
        ground_radius,
        drop_height,
        initial_velocity,
        drops,
    };
    Ok(RunOutput { outcome, summary })
}

//! Ordered fold over the orientation list
//!
//! Each step places the ground relative to the body as left by the previous
//! step, then shifts the body by the same displacement. Reordering the input
//! changes the result, so requests are never sorted.

use glam::DVec3;

use super::rotation::impact_normal;
use super::state::{DropResult, OrientationRequest, SimulationState};
use super::support::tangent_offset;

/// Run-level inputs shared by every step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Impact speed scaling the angle triple (mm/ms)
    pub initial_velocity: f64,
    /// Clearance added beyond the support distance (mm)
    pub margin: f64,
}

impl StepParams {
    pub fn new(initial_velocity: f64, margin: f64) -> Self {
        Self {
            initial_velocity,
            margin,
        }
    }
}

/// All results in input order plus the state after the last step
#[derive(Debug, Clone)]
pub struct SequenceOutcome {
    pub results: Vec<DropResult>,
    pub final_state: SimulationState,
}

/// Process one orientation, returning the displaced state and the result
pub fn advance(
    mut state: SimulationState,
    request: &OrientationRequest,
    params: &StepParams,
) -> (SimulationState, DropResult) {
    let normal = impact_normal(request.angles);
    let support = tangent_offset(&state.points, state.center, normal, params.margin);
    if support.is_degenerate() {
        log::warn!(
            "Orientation {}: no node projects onto normal {:?}, ground placed at the current center",
            request.id,
            normal
        );
    }

    let new_center = state.center + support.displacement;
    // Raw angle triple, deliberately not normalized
    let velocity: DVec3 = params.initial_velocity * request.angles;

    let result = DropResult {
        orientation: *request,
        normal,
        support_distance: support.distance,
        displacement: support.displacement,
        new_center,
        velocity,
    };

    state.center = new_center;
    state.points.translate(support.displacement);

    (state, result)
}

/// Fold `advance` over `requests` in order
pub fn run_sequence(
    initial: SimulationState,
    requests: &[OrientationRequest],
    params: &StepParams,
) -> SequenceOutcome {
    let (final_state, results) = requests.iter().fold(
        (initial, Vec::with_capacity(requests.len())),
        |(state, mut results), request| {
            let (next, result) = advance(state, request, params);
            results.push(result);
            (next, results)
        },
    );

    SequenceOutcome {
        results,
        final_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SUPPORT_MARGIN;
    use crate::sim::fixtures::cube;
    use proptest::prelude::*;

    fn cube_state() -> SimulationState {
        SimulationState::from_cloud(cube(10.0)).unwrap()
    }

    fn params(initial_velocity: f64) -> StepParams {
        StepParams::new(initial_velocity, SUPPORT_MARGIN)
    }

    #[test]
    fn test_cube_single_orientation() {
        let request = OrientationRequest::new(1, 0.0, 0.0, 1.0);
        let outcome = run_sequence(cube_state(), &[request], &params(4.0));

        assert_eq!(outcome.results.len(), 1);
        let r = &outcome.results[0];
        assert_eq!(r.orientation.id, 1);
        assert!((r.support_distance - 5.0).abs() < 1e-9);
        assert!(r.new_center.abs_diff_eq(DVec3::new(0.0, 0.0, 5.0001), 1e-9));
        assert!(r.velocity.abs_diff_eq(DVec3::new(0.0, 0.0, 4.0), 1e-12));

        assert_eq!(outcome.final_state.center, r.new_center);
        let shifted = outcome.final_state.points.centroid().unwrap();
        assert!(shifted.abs_diff_eq(r.new_center, 1e-9));
    }

    #[test]
    fn test_state_carries_between_steps() {
        // Same attitude twice: the second step is measured from the shifted body
        let request = OrientationRequest::new(0, 0.0, 0.0, 0.0);
        let outcome = run_sequence(cube_state(), &[request, request], &params(1.0));

        let first = outcome.results[0].new_center;
        let second = outcome.results[1].new_center;
        assert!(first.abs_diff_eq(DVec3::new(0.0, 0.0, 5.0001), 1e-12));
        assert!(second.abs_diff_eq(DVec3::new(0.0, 0.0, 10.0002), 1e-12));
        assert!((outcome.results[1].support_distance - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_results_keep_input_order() {
        let requests = [
            OrientationRequest::new(7, 0.0, 0.0, 0.5),
            OrientationRequest::new(2, 1.0, 0.0, 0.0),
            OrientationRequest::new(5, 0.0, -1.0, 0.0),
        ];
        let outcome = run_sequence(cube_state(), &requests, &params(1.0));
        let ids: Vec<u32> = outcome.results.iter().map(|r| r.orientation.id).collect();
        assert_eq!(ids, vec![7, 2, 5]);
    }

    #[test]
    fn test_order_sensitivity() {
        let a = OrientationRequest::new(1, 0.0, 0.0, 1.0);
        let b = OrientationRequest::new(2, 1.0, -1.0, 0.0);
        let step = params(1.0);

        let forward = run_sequence(cube_state(), &[a, b], &step);
        let reverse = run_sequence(cube_state(), &[b, a], &step);

        // Ground center for orientation 1 depends on whether 2 ran first
        let a_forward = forward.results[0].new_center;
        let a_reverse = reverse.results[1].new_center;
        assert_eq!(reverse.results[1].orientation.id, 1);
        assert!(!a_forward.abs_diff_eq(a_reverse, 1e-6));

        // Both orders end at the same place since displacements add up
        assert!(
            forward
                .final_state
                .center
                .abs_diff_eq(reverse.final_state.center, 1e-9)
        );
    }

    proptest! {
        #[test]
        fn prop_velocity_is_componentwise_scale(
            v in 0.0f64..20.0,
            x in -1.0f64..=1.0,
            y in -1.0f64..=1.0,
            z in -1.0f64..=1.0,
        ) {
            let request = OrientationRequest::new(3, x, y, z);
            let (_, result) = advance(cube_state(), &request, &params(v));
            prop_assert_eq!(result.velocity, DVec3::new(v * x, v * y, v * z));
        }

        #[test]
        fn prop_sequence_length_matches_input(n in 0usize..=25) {
            let requests: Vec<OrientationRequest> = (0..n)
                .map(|i| OrientationRequest::new(i as u32, 0.0, 0.0, (i as f64) / 25.0))
                .collect();
            let outcome = run_sequence(cube_state(), &requests, &params(1.0));
            prop_assert_eq!(outcome.results.len(), n);
            for r in &outcome.results {
                prop_assert!(r.support_distance >= 0.0);
            }
        }
    }
}

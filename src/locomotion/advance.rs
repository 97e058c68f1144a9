use crate::arena::Arena;
use crate::components::{InputFrame, LocomotionState};
use crate::config::PhysicsConfig;

use super::collision::resolve_with;
use super::direction::{resolve_direction, ViewOrientation};
use super::ground::ground_height;

/// Grounded/airborne transitions that fired during one advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub jumped: bool,
    /// Ground fell away beneath a grounded entity.
    pub left_ground: bool,
    pub landed: bool,
    /// A collider pushed the entity laterally.
    pub blocked: bool,
}

/// Advance one entity by `dt` seconds.
///
/// Order: heading and horizontal integration, ground query, jump, vertical
/// integration or snap, lateral collision with the updated feet height, a second
/// ground query at the corrected XZ, then eye sync. `dt` is clamped into
/// `[0, config.max_dt]` first.
pub fn advance(
    state: &mut LocomotionState,
    input: &InputFrame,
    view: Option<ViewOrientation>,
    arena: &Arena,
    config: &PhysicsConfig,
    dt: f32,
) -> StepReport {
    let dt = config.sanitize_dt(dt);
    let mut report = StepReport::default();

    let direction = resolve_direction(input, view);
    state.position += direction * state.speed(input.sprint) * dt;

    let ground = ground_height(
        state.position,
        arena.solids(),
        state.feet_y,
        state.grounded,
        config,
    );

    if input.jump && state.grounded {
        state.vertical_velocity = state
            .jump_velocity_override
            .unwrap_or(config.jump_velocity);
        state.grounded = false;
        report.jumped = true;
    }

    if !state.grounded {
        state.vertical_velocity += config.gravity * dt;
        state.feet_y += state.vertical_velocity * dt;
        // Only a descending body lands. A jump off the tick's step-up keeps rising.
        if state.vertical_velocity <= 0.0 && state.feet_y <= ground {
            state.feet_y = ground;
            state.vertical_velocity = 0.0;
            state.grounded = true;
            report.landed = true;
        }
    } else {
        settle_grounded(state, ground, config, &mut report);
    }

    report.blocked = resolve_with(
        &mut state.position,
        state.radius,
        arena.colliders(),
        state.feet_y,
        config,
    );

    // Push-out can carry the entity off a ledge or onto a ramp edge.
    if state.grounded {
        let ground = ground_height(state.position, arena.solids(), state.feet_y, true, config);
        settle_grounded(state, ground, config, &mut report);
    }

    state.position.y = state.feet_y + config.eye_height;
    report
}

fn settle_grounded(
    state: &mut LocomotionState,
    ground: f32,
    config: &PhysicsConfig,
    report: &mut StepReport,
) {
    if ground < state.feet_y - config.max_step_height {
        state.grounded = false;
        state.vertical_velocity = 0.0;
        report.left_ground = true;
    } else {
        state.feet_y = ground;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn flat_arena() -> Arena {
        Arena::builder().floor(0.0).build().unwrap()
    }

    #[test]
    fn idle_on_flat_ground_is_idempotent() {
        let config = PhysicsConfig::default();
        let arena = flat_arena();
        let mut state = LocomotionState::spawn(Vec3::new(1.0, 0.0, 2.0), 0.0, &config);
        let before = state.clone();
        for _ in 0..120 {
            let report = advance(&mut state, &InputFrame::default(), None, &arena, &config, 1.0 / 60.0);
            assert_eq!(report, StepReport::default());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn single_jump_tick_matches_reference_values() {
        let config = PhysicsConfig::default();
        let arena = flat_arena();
        let mut state = LocomotionState::spawn(Vec3::ZERO, 0.0, &config);
        let input = InputFrame {
            jump: true,
            ..InputFrame::default()
        };
        let report = advance(&mut state, &input, None, &arena, &config, 1.0 / 60.0);

        assert!(report.jumped);
        assert!(!state.grounded);
        assert_relative_eq!(state.vertical_velocity, 8.5 - 20.0 / 60.0, epsilon = 1e-4);
        assert_relative_eq!(state.feet_y, 0.1361, epsilon = 1e-3);
        assert_relative_eq!(state.position.y, state.feet_y + 2.0);
    }

    #[test]
    fn jump_override_beats_config_default() {
        let config = PhysicsConfig::default();
        let arena = flat_arena();
        let mut state = LocomotionState::spawn(Vec3::ZERO, 0.0, &config).with_jump_velocity(12.0);
        let input = InputFrame {
            jump: true,
            ..InputFrame::default()
        };
        advance(&mut state, &input, None, &arena, &config, 1.0 / 60.0);
        assert_relative_eq!(state.vertical_velocity, 12.0 - 20.0 / 60.0, epsilon = 1e-4);
    }

    #[test]
    fn negative_dt_is_treated_as_zero() {
        let config = PhysicsConfig::default();
        let arena = flat_arena();
        let mut state = LocomotionState::spawn(Vec3::ZERO, 0.0, &config);
        let input = InputFrame::toward(Vec3::X);
        advance(&mut state, &input, None, &arena, &config, -1.0);
        assert_eq!(state.position.x, 0.0);
    }

    #[test]
    fn empty_arena_falls_back_to_baseline_ground() {
        let config = PhysicsConfig {
            ground_y: 1.0,
            ..PhysicsConfig::default()
        };
        let arena = Arena::default();
        let mut state = LocomotionState::spawn(Vec3::ZERO, 1.0, &config);
        advance(&mut state, &InputFrame::toward(Vec3::Z), None, &arena, &config, 0.1);
        assert!(state.grounded);
        assert_eq!(state.feet_y, 1.0);
        assert_relative_eq!(state.position.z, 0.6, epsilon = 1e-5);
    }
}

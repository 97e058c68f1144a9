use hecs::World;

use crate::components::{InputFrame, LastStep, LocomotionState, MoveFsm, MoveState};
use crate::locomotion::{resolve_direction, StepReport};

/// Touch-down recovery before returning to ground locomotion.
const LANDING_DURATION: f32 = 0.1;

// ---------------------------------------------------------------------------
// MoveState transition logic
// ---------------------------------------------------------------------------

/// Context passed to [`MoveState::next`] each tick.
pub struct MoveCtx<'a> {
    pub state: &'a LocomotionState,
    pub input: &'a InputFrame,
    pub report: StepReport,
}

impl MoveCtx<'_> {
    fn ground_state(&self) -> MoveState {
        let moving = resolve_direction(self.input, None) != glam::Vec3::ZERO;
        let sprinting = self.input.sprint && self.state.sprint_speed.is_some();
        match (moving, sprinting) {
            (false, _) => MoveState::Idle,
            (true, false) => MoveState::Walking,
            (true, true) => MoveState::Running,
        }
    }
}

impl MoveState {
    /// Advance timers carried inside state variants.
    pub fn tick_timers(&mut self, dt: f32) {
        if let Self::Landing { timer } = self {
            *timer += dt;
        }
    }

    /// Next state if a transition should fire, or `None` to stay.
    ///
    /// Jumps and airborne/landing edges from the step report take priority over
    /// the per-state rules.
    pub fn next(&self, ctx: &MoveCtx) -> Option<MoveState> {
        if ctx.report.jumped {
            return Some(Self::Jumping);
        }
        if ctx.report.landed {
            return Some(Self::Landing { timer: 0.0 });
        }
        if !ctx.state.grounded {
            let rising = ctx.state.vertical_velocity > 0.0;
            return match self {
                Self::Jumping if rising => None,
                Self::Falling => None,
                _ => Some(Self::Falling),
            };
        }

        match self {
            Self::Landing { timer } if *timer < LANDING_DURATION => None,
            // Grounded without a landing edge: snapped back after a step-down.
            state if state.is_airborne() => Some(Self::Landing { timer: 0.0 }),
            _ => {
                let ground = ctx.ground_state();
                (ground != *self).then_some(ground)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Derive each entity's observable movement state. Runs after locomotion.
///
/// `fsm.tick(dt)` runs first so `just_entered` stays true for the whole tick a
/// transition fires.
pub fn movement_state_system(world: &mut World, dt: f32) {
    for (entity, (fsm, state, input, last)) in
        world.query_mut::<(&mut MoveFsm, &LocomotionState, &InputFrame, &LastStep)>()
    {
        fsm.tick(dt);
        fsm.state.tick_timers(dt);

        let ctx = MoveCtx {
            state,
            input,
            report: last.0,
        };
        if let Some(next) = fsm.state.next(&ctx) {
            fsm.go(next);
        }

        if fsm.just_entered() {
            log::debug!(
                "{entity:?} movement {} -> {}",
                fsm.previous.label(),
                fsm.state.label()
            );
        }
    }
}

use hecs::World;

use crate::arena::Arena;
use crate::components::{InputFrame, LastStep, LocomotionState, Player};
use crate::config::PhysicsConfig;
use crate::locomotion::{advance, ViewOrientation};

/// Advance every entity that carries locomotion state by one tick.
///
/// Players move relative to `view`; every other controller is expected to
/// supply a world-space heading.
pub fn locomotion_system(
    world: &mut World,
    arena: &Arena,
    config: &PhysicsConfig,
    view: ViewOrientation,
    dt: f32,
) {
    for (entity, (state, input, player, last)) in world.query_mut::<(
        &mut LocomotionState,
        &InputFrame,
        Option<&Player>,
        Option<&mut LastStep>,
    )>() {
        let entity_view = player.map(|_| view);
        let report = advance(state, input, entity_view, arena, config, dt);

        if report.jumped {
            log::debug!("{entity:?} jumped from feet_y={:.2}", state.feet_y);
        }
        if report.left_ground {
            log::debug!("{entity:?} lost ground at feet_y={:.2}", state.feet_y);
        }
        if report.landed {
            log::debug!("{entity:?} landed at feet_y={:.2}", state.feet_y);
        }

        if let Some(last) = last {
            last.0 = report;
        }
    }
}

use glam::Vec3;
use hecs::{Entity, World};

use crate::arena::Arena;
use crate::components::{Bot, InputFrame, LocomotionState, PatrolRoute, Player};
use crate::config::PhysicsConfig;
use crate::engine::input::InputState;
use crate::locomotion::is_blocked;

/// Horizontal range inside which a bot jumps toward a target standing on a ledge.
const BOT_JUMP_RANGE: f32 = 3.0;

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Copy held keys into every `Player`'s input frame.
pub fn player_input_system(world: &mut World, input: &InputState) {
    let frame = input.frame();
    for (_entity, (_player, current)) in world.query_mut::<(&Player, &mut InputFrame)>() {
        *current = frame;
    }
}

/// Steer waypoint followers toward their current waypoint, cycling on arrival.
pub fn patrol_system(world: &mut World) {
    for (_entity, (route, state, frame)) in
        world.query_mut::<(&mut PatrolRoute, &LocomotionState, &mut InputFrame)>()
    {
        let Some(mut target) = route.target() else {
            *frame = InputFrame::default();
            continue;
        };
        let to_target = horizontal(target - state.position);
        if to_target.length() <= route.arrive_radius {
            route.advance();
            target = route.target().unwrap_or(target);
        }
        *frame = InputFrame::toward(horizontal(target - state.position));
    }
}

struct Pursuit {
    bot: Entity,
    frame: InputFrame,
}

/// Chase visible targets. A bot with no target, a despawned target, or a target
/// hidden behind solids stands still.
pub fn bot_steering_system(world: &mut World, arena: &Arena, config: &PhysicsConfig) {
    let mut pursuits = Vec::new();

    for (bot_entity, (bot, state)) in world.query::<(&Bot, &LocomotionState)>().iter() {
        let target = bot
            .target
            .and_then(|t| world.get::<&LocomotionState>(t).ok().map(|s| (*s).clone()));

        let frame = match target {
            Some(target) => pursue(bot, state, &target, arena, config),
            None => InputFrame::default(),
        };
        pursuits.push(Pursuit {
            bot: bot_entity,
            frame,
        });
    }

    for pursuit in pursuits {
        if let Ok(mut frame) = world.get::<&mut InputFrame>(pursuit.bot) {
            *frame = pursuit.frame;
        }
    }
}

fn pursue(
    bot: &Bot,
    state: &LocomotionState,
    target: &LocomotionState,
    arena: &Arena,
    config: &PhysicsConfig,
) -> InputFrame {
    if is_blocked(state.eye_position(), target.eye_position(), arena.solids()) {
        return InputFrame::default();
    }
    let offset = horizontal(target.position - state.position);
    let distance = offset.length();
    if distance <= bot.stop_distance {
        return InputFrame::default();
    }

    let climb = target.feet_y - state.feet_y > config.max_step_height;
    InputFrame {
        world_move_direction: Some(offset),
        jump: climb && distance < BOT_JUMP_RANGE,
        sprint: distance > bot.stop_distance * 4.0,
        ..InputFrame::default()
    }
}

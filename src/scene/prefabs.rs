use glam::Vec3;
use hecs::{Entity, World};

use crate::arena::{Arena, SpawnPoint};
use crate::components::*;
use crate::config::PhysicsConfig;
use crate::locomotion::ground_height;

// ---------------------------------------------------------------------------
// Controller tuning
// ---------------------------------------------------------------------------

const BOT_WALK_SPEED: f32 = 4.5;
const BOT_SPRINT_SPEED: f32 = 7.0;
const BOT_STOP_DISTANCE: f32 = 2.0;

const PATROL_WALK_SPEED: f32 = 3.0;
const PATROL_ARRIVE_RADIUS: f32 = 0.5;
/// Training dummies hop lower than players.
const PATROL_JUMP_VELOCITY: f32 = 6.0;

/// Fresh locomotion state with feet snapped to the ground under `position`.
///
/// `position.y` is a hint: surfaces up to one step above it are accepted, so a
/// spawn marker sitting on a crate snaps onto the crate rather than the floor.
pub fn snapped_state(arena: &Arena, config: &PhysicsConfig, position: Vec3) -> LocomotionState {
    let ground = ground_height(
        position,
        arena.solids(),
        position.y + config.max_step_height,
        false,
        config,
    );
    LocomotionState::spawn(position, ground, config)
}

/// Reset `state` at `spawn`, keeping its per-entity speeds, radius and jump override.
pub fn respawn_state(
    state: &LocomotionState,
    arena: &Arena,
    config: &PhysicsConfig,
    spawn: &SpawnPoint,
) -> LocomotionState {
    let fresh = snapped_state(arena, config, spawn.position);
    LocomotionState {
        walk_speed: state.walk_speed,
        sprint_speed: state.sprint_speed,
        radius: state.radius,
        jump_velocity_override: state.jump_velocity_override,
        ..fresh
    }
}

fn locomotion_bundle(
    state: LocomotionState,
    spawn: &SpawnPoint,
) -> (LocomotionState, InputFrame, LastStep, MoveFsm, SpawnTag) {
    (
        state,
        InputFrame::default(),
        LastStep::default(),
        MoveFsm::new(MoveState::Idle),
        SpawnTag(spawn.name.clone()),
    )
}

// ---------------------------------------------------------------------------
// Spawners
// ---------------------------------------------------------------------------

pub fn spawn_player(
    world: &mut World,
    arena: &Arena,
    config: &PhysicsConfig,
    spawn: &SpawnPoint,
) -> Entity {
    let (state, input, last, fsm, tag) =
        locomotion_bundle(snapped_state(arena, config, spawn.position), spawn);
    world.spawn((Player, state, input, last, fsm, tag))
}

pub fn spawn_bot(
    world: &mut World,
    arena: &Arena,
    config: &PhysicsConfig,
    spawn: &SpawnPoint,
    target: Option<Entity>,
) -> Entity {
    let state = snapped_state(arena, config, spawn.position)
        .with_speeds(BOT_WALK_SPEED, Some(BOT_SPRINT_SPEED));
    let (state, input, last, fsm, tag) = locomotion_bundle(state, spawn);
    let bot = Bot {
        target,
        stop_distance: BOT_STOP_DISTANCE,
    };
    world.spawn((bot, state, input, last, fsm, tag))
}

pub fn spawn_patrol_bot(
    world: &mut World,
    arena: &Arena,
    config: &PhysicsConfig,
    spawn: &SpawnPoint,
    waypoints: Vec<Vec3>,
) -> Entity {
    let state = snapped_state(arena, config, spawn.position)
        .with_speeds(PATROL_WALK_SPEED, None)
        .with_jump_velocity(PATROL_JUMP_VELOCITY);
    let (state, input, last, fsm, tag) = locomotion_bundle(state, spawn);
    let route = PatrolRoute::new(waypoints, PATROL_ARRIVE_RADIUS);
    world.spawn((route, state, input, last, fsm, tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Aabb;

    fn arena_with_crate() -> Arena {
        Arena::builder()
            .floor(0.0)
            .block(Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0)))
            .spawn("floor", Vec3::new(5.0, 0.0, 0.0))
            .spawn("crate", Vec3::new(0.0, 1.0, 0.0))
            .build()
            .unwrap()
    }

    #[test]
    fn spawn_markers_snap_to_their_surface() {
        let arena = arena_with_crate();
        let config = PhysicsConfig::default();
        let on_floor = snapped_state(&arena, &config, arena.spawn_points()[0].position);
        let on_crate = snapped_state(&arena, &config, arena.spawn_points()[1].position);
        assert_eq!(on_floor.feet_y, 0.0);
        assert_eq!(on_crate.feet_y, 1.0);
        assert!(on_crate.grounded);
    }

    #[test]
    fn respawn_keeps_entity_tuning() {
        let arena = arena_with_crate();
        let config = PhysicsConfig::default();
        let mut state = snapped_state(&arena, &config, Vec3::new(5.0, 0.0, 0.0))
            .with_speeds(2.0, None)
            .with_jump_velocity(3.0);
        state.vertical_velocity = -7.0;
        state.grounded = false;

        let reset = respawn_state(&state, &arena, &config, &arena.spawn_points()[1]);
        assert_eq!(reset.walk_speed, 2.0);
        assert_eq!(reset.sprint_speed, None);
        assert_eq!(reset.jump_velocity_override, Some(3.0));
        assert_eq!(reset.vertical_velocity, 0.0);
        assert!(reset.grounded);
        assert_eq!(reset.feet_y, 1.0);
    }

    #[test]
    fn prefabs_attach_controller_components() {
        let arena = arena_with_crate();
        let config = PhysicsConfig::default();
        let mut world = World::new();
        let spawn = &arena.spawn_points()[0];

        let player = spawn_player(&mut world, &arena, &config, spawn);
        let bot = spawn_bot(&mut world, &arena, &config, spawn, Some(player));
        let patrol = spawn_patrol_bot(&mut world, &arena, &config, spawn, vec![Vec3::ZERO]);

        assert!(world.get::<&Player>(player).is_ok());
        assert_eq!(world.get::<&Bot>(bot).unwrap().target, Some(player));
        assert!(world.get::<&PatrolRoute>(patrol).is_ok());
        assert_eq!(world.get::<&SpawnTag>(patrol).unwrap().0, "floor");
        assert_eq!(
            world.get::<&LocomotionState>(patrol).unwrap().sprint_speed,
            None
        );
    }
}

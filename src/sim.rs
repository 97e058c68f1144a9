use glam::Vec3;
use hecs::{Entity, World};
use log::{info, warn};
use thiserror::Error;

use crate::arena::{Arena, ArenaError, SpawnPoint};
use crate::camera::Camera;
use crate::components::{InputFrame, LastStep, LocomotionState, MoveFsm, MoveState, SpawnTag};
use crate::config::PhysicsConfig;
use crate::engine::input::{InputEvent, InputState};
use crate::engine::time::FixedStep;
use crate::locomotion::is_blocked;
use crate::scene::prefabs::{respawn_state, spawn_bot, spawn_patrol_bot, spawn_player};
use crate::scene::test_arena::build_test_arena;
use crate::systems::{
    bot_steering_system, locomotion_system, movement_state_system, patrol_system,
    player_input_system,
};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("arena has no spawn point named `{0}`")]
    UnknownSpawn(String),
    #[error("arena has no spawn points to place entities at")]
    NoSpawnPoints,
    #[error("entity {0:?} does not exist or has no locomotion state")]
    NoSuchEntity(Entity),
    #[error(transparent)]
    Arena(#[from] ArenaError),
}

/// One running match: the ECS world, the loaded arena and the fixed-step clock.
pub struct Simulation {
    world: World,
    arena: Arena,
    config: PhysicsConfig,
    camera: Camera,
    input: InputState,
    clock: FixedStep,
    player: Option<Entity>,
    /// Player eye before the latest tick, for interpolating the camera.
    previous_eye: Vec3,
    ticks: u64,
}

impl Simulation {
    pub fn new(arena: Arena, config: PhysicsConfig) -> Self {
        Self {
            world: World::new(),
            arena,
            config,
            camera: Camera::new(),
            input: InputState::new(),
            clock: FixedStep::default(),
            player: None,
            previous_eye: Vec3::ZERO,
            ticks: 0,
        }
    }

    pub fn with_test_arena(config: PhysicsConfig) -> Result<Self, SimError> {
        Ok(Self::new(build_test_arena()?, config))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Fixed ticks simulated since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self, entity: Entity) -> Option<LocomotionState> {
        self.world
            .get::<&LocomotionState>(entity)
            .ok()
            .map(|s| (*s).clone())
    }

    pub fn move_state(&self, entity: Entity) -> Option<MoveState> {
        self.world
            .get::<&MoveFsm>(entity)
            .ok()
            .map(|fsm| fsm.state.clone())
    }

    fn spawn_point(&self, name: &str) -> Result<SpawnPoint, SimError> {
        self.arena
            .spawn_point(name)
            .cloned()
            .ok_or_else(|| SimError::UnknownSpawn(name.to_string()))
    }

    // -----------------------------------------------------------------------
    // Spawning
    // -----------------------------------------------------------------------

    pub fn spawn_player(&mut self, spawn: &str) -> Result<Entity, SimError> {
        let point = self.spawn_point(spawn)?;
        let entity = spawn_player(&mut self.world, &self.arena, &self.config, &point);
        self.player = Some(entity);
        self.sync_camera();
        info!("player spawned at `{spawn}`");
        Ok(entity)
    }

    pub fn spawn_bot(&mut self, spawn: &str, target: Option<Entity>) -> Result<Entity, SimError> {
        let point = self.spawn_point(spawn)?;
        let entity = spawn_bot(&mut self.world, &self.arena, &self.config, &point, target);
        info!("bot {entity:?} spawned at `{spawn}`");
        Ok(entity)
    }

    pub fn spawn_patrol_bot(
        &mut self,
        spawn: &str,
        waypoints: Vec<Vec3>,
    ) -> Result<Entity, SimError> {
        let point = self.spawn_point(spawn)?;
        let entity = spawn_patrol_bot(&mut self.world, &self.arena, &self.config, &point, waypoints);
        info!("patrol bot {entity:?} spawned at `{spawn}`");
        Ok(entity)
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    /// Feed one rendered frame: apply input, run every whole fixed tick the
    /// elapsed time allows, then place the camera. Returns the ticks run.
    pub fn frame(
        &mut self,
        frame_dt: f32,
        events: impl IntoIterator<Item = InputEvent>,
    ) -> usize {
        self.input.update(events);
        self.camera.look(self.input.mouse_dx, self.input.mouse_dy);

        let ticks = self.clock.accumulate(frame_dt);
        for _ in 0..ticks {
            if let Some(eye) = self.player_eye() {
                self.previous_eye = eye;
            }
            self.tick();
        }

        if let Some(eye) = self.player_eye() {
            let alpha = self.clock.alpha();
            self.camera.follow_eye(self.previous_eye.lerp(eye, alpha));
        }
        ticks
    }

    /// One fixed step: controllers write intent, locomotion consumes it, then
    /// movement states are derived from the results.
    pub fn tick(&mut self) {
        let dt = self.clock.step;
        player_input_system(&mut self.world, &self.input);
        patrol_system(&mut self.world);
        bot_steering_system(&mut self.world, &self.arena, &self.config);
        locomotion_system(
            &mut self.world,
            &self.arena,
            &self.config,
            self.camera.orientation(),
            dt,
        );
        movement_state_system(&mut self.world, dt);
        self.ticks += 1;
    }

    fn player_eye(&self) -> Option<Vec3> {
        let player = self.player?;
        self.world
            .get::<&LocomotionState>(player)
            .ok()
            .map(|s| s.eye_position())
    }

    fn sync_camera(&mut self) {
        if let Some(eye) = self.player_eye() {
            self.previous_eye = eye;
            self.camera.follow_eye(eye);
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Put `entity` back on its spawn point with fresh locomotion state.
    pub fn respawn(&mut self, entity: Entity) -> Result<(), SimError> {
        let tag = self
            .world
            .get::<&SpawnTag>(entity)
            .map_err(|_| SimError::NoSuchEntity(entity))?
            .0
            .clone();
        let point = self.spawn_point(&tag)?;
        let state = {
            let current = self
                .world
                .get::<&LocomotionState>(entity)
                .map_err(|_| SimError::NoSuchEntity(entity))?;
            respawn_state(&current, &self.arena, &self.config, &point)
        };
        self.place(entity, tag, state)
    }

    /// Swap in a new arena and respawn every tagged entity against it.
    ///
    /// Entities whose spawn point no longer exists move to the arena's first
    /// spawn point. Every placement is worked out against the new arena before
    /// anything changes, so on error the world and the previous arena are
    /// left untouched.
    pub fn load_arena(&mut self, arena: Arena) -> Result<(), SimError> {
        let mut placements = Vec::new();
        for (entity, (tag, state)) in self
            .world
            .query::<(&SpawnTag, &LocomotionState)>()
            .iter()
        {
            let point = match arena.spawn_point(&tag.0) {
                Some(point) => point,
                None => {
                    let fallback = arena
                        .spawn_points()
                        .first()
                        .ok_or(SimError::NoSpawnPoints)?;
                    warn!(
                        "spawn `{}` missing from new arena, moving {entity:?} to `{}`",
                        tag.0, fallback.name
                    );
                    fallback
                }
            };
            let fresh = respawn_state(state, &arena, &self.config, point);
            placements.push((entity, point.name.clone(), fresh));
        }

        self.arena = arena;
        self.clock = FixedStep::new(self.clock.step);
        for (entity, spawn, state) in placements {
            self.place(entity, spawn, state)?;
        }

        info!(
            "arena loaded: {} colliders, {} solids, {} spawn points",
            self.arena.colliders().len(),
            self.arena.solids().len(),
            self.arena.spawn_points().len()
        );
        Ok(())
    }

    fn place(
        &mut self,
        entity: Entity,
        spawn: String,
        state: LocomotionState,
    ) -> Result<(), SimError> {
        self.world
            .insert(
                entity,
                (
                    state,
                    SpawnTag(spawn),
                    InputFrame::default(),
                    LastStep::default(),
                    MoveFsm::new(MoveState::Idle),
                ),
            )
            .map_err(|_| SimError::NoSuchEntity(entity))?;
        if self.player == Some(entity) {
            self.sync_camera();
        }
        Ok(())
    }

    /// Eye-to-eye visibility between two entities.
    pub fn has_line_of_sight(&self, from: Entity, to: Entity) -> Result<bool, SimError> {
        let eye = |entity| {
            self.world
                .get::<&LocomotionState>(entity)
                .map(|s| s.eye_position())
                .map_err(|_| SimError::NoSuchEntity(entity))
        };
        Ok(!is_blocked(eye(from)?, eye(to)?, self.arena.solids()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::engine::time::PHYSICS_DT;

    fn flat_arena() -> Arena {
        Arena::builder()
            .floor(0.0)
            .spawn("a", Vec3::new(0.0, 0.0, 0.0))
            .spawn("b", Vec3::new(10.0, 0.0, 0.0))
            .build()
            .unwrap()
    }

    #[test]
    fn frame_runs_whole_ticks_only() {
        let mut sim = Simulation::new(flat_arena(), PhysicsConfig::default());
        assert_eq!(sim.frame(PHYSICS_DT * 0.5, []), 0);
        assert_eq!(sim.frame(PHYSICS_DT * 2.0, []), 2);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn held_forward_walks_along_camera_front() {
        let mut sim = Simulation::new(flat_arena(), PhysicsConfig::default());
        let player = sim.spawn_player("a").unwrap();

        let ticks = sim.frame(0.105, [InputEvent::Pressed(Action::Forward)]);
        assert_eq!(ticks, 6);

        // Default camera yaw of -90 looks down -Z.
        let state = sim.state(player).unwrap();
        assert!(state.position.z < -0.5);
        assert!(state.position.x.abs() < 1e-4);
        assert_eq!(sim.move_state(player), Some(MoveState::Walking));
        assert!(sim.camera().position.z <= 0.0);
    }

    #[test]
    fn unknown_spawn_is_an_error() {
        let mut sim = Simulation::new(flat_arena(), PhysicsConfig::default());
        let err = sim.spawn_player("nowhere").unwrap_err();
        assert!(matches!(err, SimError::UnknownSpawn(name) if name == "nowhere"));
    }

    #[test]
    fn respawn_of_despawned_entity_fails() {
        let mut sim = Simulation::new(flat_arena(), PhysicsConfig::default());
        let bot = sim.spawn_bot("b", None).unwrap();
        sim.world_mut().despawn(bot).unwrap();
        assert!(matches!(sim.respawn(bot), Err(SimError::NoSuchEntity(e)) if e == bot));
    }

    #[test]
    fn empty_replacement_arena_is_rejected() {
        let mut sim = Simulation::new(flat_arena(), PhysicsConfig::default());
        let player = sim.spawn_player("a").unwrap();
        sim.frame(PHYSICS_DT * 3.5, [InputEvent::Pressed(Action::Forward)]);
        let before = sim.state(player).unwrap();
        let camera = sim.camera().position;

        let err = sim.load_arena(Arena::default()).unwrap_err();
        assert!(matches!(err, SimError::NoSpawnPoints));
        assert_eq!(sim.arena().spawn_points().len(), 2);
        assert_eq!(sim.state(player).unwrap(), before);
        assert_eq!(sim.move_state(player), Some(MoveState::Walking));
        assert_eq!(sim.camera().position, camera);
    }

    #[test]
    fn failed_map_change_moves_nobody() {
        let mut sim = Simulation::new(flat_arena(), PhysicsConfig::default());
        let bot = sim.spawn_bot("b", None).unwrap();
        sim.world_mut().get::<&mut LocomotionState>(bot).unwrap().position.z = 4.0;
        let before = sim.state(bot).unwrap();

        // "b" is gone and nothing is left to fall back to.
        let err = sim.load_arena(Arena::default()).unwrap_err();
        assert!(matches!(err, SimError::NoSpawnPoints));
        assert_eq!(sim.state(bot).unwrap(), before);
        assert_eq!(sim.world().get::<&SpawnTag>(bot).unwrap().0, "b");
    }

    #[test]
    fn tag_without_locomotion_is_left_alone_on_map_change() {
        let mut sim = Simulation::new(flat_arena(), PhysicsConfig::default());
        let player = sim.spawn_player("a").unwrap();
        let marker = sim.world_mut().spawn((SpawnTag("b".to_string()),));

        let next = Arena::builder()
            .floor(1.0)
            .spawn("a", Vec3::new(2.0, 1.0, 0.0))
            .build()
            .unwrap();
        sim.load_arena(next).unwrap();

        assert_eq!(sim.state(player).unwrap().feet_y, 1.0);
        assert_eq!(sim.world().get::<&SpawnTag>(marker).unwrap().0, "b");
    }
}

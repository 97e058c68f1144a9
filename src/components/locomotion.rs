use glam::Vec3;

use crate::config::PhysicsConfig;

/// Per-entity movement state, owned and mutated by exactly one controller.
///
/// `feet_y` is the source of truth for vertical placement. `position.y` is the
/// derived eye height and is rewritten at the end of every advance.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    pub position: Vec3,
    pub feet_y: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub walk_speed: f32,
    pub sprint_speed: Option<f32>,
    pub radius: f32,
    pub jump_velocity_override: Option<f32>,
}

impl LocomotionState {
    /// Fresh state standing at `ground_y` below the XZ of `at`.
    pub fn spawn(at: Vec3, ground_y: f32, config: &PhysicsConfig) -> Self {
        Self {
            position: Vec3::new(at.x, ground_y + config.eye_height, at.z),
            feet_y: ground_y,
            vertical_velocity: 0.0,
            grounded: true,
            walk_speed: config.walk_speed,
            sprint_speed: Some(config.sprint_speed),
            radius: config.radius,
            jump_velocity_override: None,
        }
    }

    pub fn with_speeds(mut self, walk: f32, sprint: Option<f32>) -> Self {
        self.walk_speed = walk;
        self.sprint_speed = sprint;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_jump_velocity(mut self, jump: f32) -> Self {
        self.jump_velocity_override = Some(jump);
        self
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position
    }

    pub fn feet_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.feet_y, self.position.z)
    }

    /// Centre of the body hitbox, halfway between feet and eye.
    pub fn hitbox_center(&self, config: &PhysicsConfig) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.feet_y + config.eye_height * 0.5,
            self.position.z,
        )
    }

    /// Speed for this tick: sprint when requested and available, otherwise walk.
    pub fn speed(&self, sprint: bool) -> f32 {
        match self.sprint_speed {
            Some(speed) if sprint => speed,
            _ => self.walk_speed,
        }
    }
}

/// Movement intent for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// View-relative forward intent in roughly [-1, 1].
    pub move_forward: f32,
    /// View-relative strafe intent in roughly [-1, 1], positive is right.
    pub move_strafe: f32,
    /// Precomputed world-space heading for AI and scripted controllers.
    pub world_move_direction: Option<Vec3>,
    pub sprint: bool,
    pub jump: bool,
}

impl InputFrame {
    pub fn toward(direction: Vec3) -> Self {
        Self {
            world_move_direction: Some(direction),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_places_eye_above_feet() {
        let config = PhysicsConfig::default();
        let state = LocomotionState::spawn(Vec3::new(3.0, 9.0, -2.0), 1.5, &config);
        assert_eq!(state.feet_y, 1.5);
        assert_eq!(state.position, Vec3::new(3.0, 3.5, -2.0));
        assert!(state.grounded);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn sprint_falls_back_to_walk_when_unavailable() {
        let config = PhysicsConfig::default();
        let state = LocomotionState::spawn(Vec3::ZERO, 0.0, &config).with_speeds(4.0, None);
        assert_eq!(state.speed(true), 4.0);
        let state = state.with_speeds(4.0, Some(7.0));
        assert_eq!(state.speed(true), 7.0);
        assert_eq!(state.speed(false), 4.0);
    }

    #[test]
    fn derived_offsets_follow_feet() {
        let config = PhysicsConfig::default();
        let state = LocomotionState::spawn(Vec3::new(1.0, 0.0, 1.0), 0.5, &config).with_radius(0.6);
        assert_eq!(state.radius, 0.6);
        assert_eq!(state.feet_position(), Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(state.hitbox_center(&config), Vec3::new(1.0, 1.5, 1.0));
        assert_eq!(state.eye_position(), Vec3::new(1.0, 2.5, 1.0));
    }
}

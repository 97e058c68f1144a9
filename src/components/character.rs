use glam::Vec3;
use hecs::Entity;

use crate::fsm::StateMachine;
use crate::locomotion::StepReport;

/// Marker: the locally controlled human player. Reads keyboard intent and the
/// camera's view orientation.
pub struct Player;

/// AI combatant that chases `target` while it is in sight.
pub struct Bot {
    pub target: Option<Entity>,
    /// Horizontal distance at which the bot stops closing in.
    pub stop_distance: f32,
}

/// Looping waypoint path for patrol and training bots.
pub struct PatrolRoute {
    pub waypoints: Vec<Vec3>,
    pub current: usize,
    /// Horizontal distance at which a waypoint counts as reached.
    pub arrive_radius: f32,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>, arrive_radius: f32) -> Self {
        Self {
            waypoints,
            current: 0,
            arrive_radius,
        }
    }

    pub fn target(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    pub fn advance(&mut self) {
        if !self.waypoints.is_empty() {
            self.current = (self.current + 1) % self.waypoints.len();
        }
    }
}

/// Name of the spawn point an entity returns to on respawn.
pub struct SpawnTag(pub String);

/// Transitions reported by the entity's most recent locomotion tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastStep(pub StepReport);

// ---------------------------------------------------------------------------
// Movement state machine
// ---------------------------------------------------------------------------

/// Observable movement state for animation, audio and network consumers.
///
/// Derived from locomotion results after each tick; it never feeds back into
/// the physics. Transition rules live in `systems::movement_state`.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveState {
    Idle,
    Walking,
    Running,
    /// Rising after a jump.
    Jumping,
    /// Airborne and descending, or walked off an edge.
    Falling,
    /// Brief recovery after touching down. Timer counts up.
    Landing { timer: f32 },
}

impl MoveState {
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walking => "Walking",
            Self::Running => "Running",
            Self::Jumping => "Jumping",
            Self::Falling => "Falling",
            Self::Landing { .. } => "Landing",
        }
    }
}

pub type MoveFsm = StateMachine<MoveState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patrol_route_wraps_around() {
        let mut route = PatrolRoute::new(vec![Vec3::ZERO, Vec3::X], 0.5);
        route.advance();
        assert_eq!(route.target(), Some(Vec3::X));
        route.advance();
        assert_eq!(route.target(), Some(Vec3::ZERO));
    }

    #[test]
    fn empty_route_has_no_target() {
        let mut route = PatrolRoute::new(Vec::new(), 0.5);
        route.advance();
        assert_eq!(route.target(), None);
    }
}

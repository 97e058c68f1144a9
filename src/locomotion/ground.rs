use glam::Vec3;

use crate::arena::{ray_hits, Solid};
use crate::config::{PhysicsConfig, GROUND_RAY_CLEARANCE, STEP_EPSILON};

/// Height of the surface supporting an entity at the XZ of `position`.
///
/// The acceptance band depends on `grounded`:
/// - grounded entities ride any surface up to `max_step_height` above their feet,
///   so ramps and small steps snap smoothly while tall ledges are ignored;
/// - airborne entities only see surfaces at or below their feet, i.e. the first
///   thing they would land on.
///
/// `config.ground_y` is the baseline: only surfaces above it can win, and it is
/// returned when nothing qualifies.
pub fn ground_height(
    position: Vec3,
    solids: &[Solid],
    current_feet_y: f32,
    grounded: bool,
    config: &PhysicsConfig,
) -> f32 {
    let ray_y = current_feet_y + config.eye_height + GROUND_RAY_CLEARANCE;
    let origin = Vec3::new(position.x, ray_y, position.z);
    let ceiling = if grounded {
        current_feet_y + config.max_step_height + STEP_EPSILON
    } else {
        current_feet_y
    };

    ray_hits(origin, Vec3::NEG_Y, solids)
        .map(|t| ray_y - t)
        .filter(|&height| height <= ceiling)
        .fold(config.ground_y, f32::max)
}

use glam::Vec3;

use crate::arena::Aabb;
use crate::config::{CollisionResolver, PhysicsConfig, BODY_MARGIN, PUSH_EPSILON, STAND_EPSILON};

/// Push `position` out of every overlapping collider along its shallowest axis.
///
/// Only X and Z are touched. Colliders are visited in order and each correction is
/// applied before the next test, so tightly packed corners can resolve differently
/// depending on collider order. Returns whether anything moved.
pub fn resolve_collisions(
    position: &mut Vec3,
    radius: f32,
    colliders: &[Aabb],
    feet_y: f32,
    config: &PhysicsConfig,
) -> bool {
    let band_low = feet_y + BODY_MARGIN;
    let band_high = feet_y + config.eye_height + BODY_MARGIN;
    let mut moved = false;

    for aabb in colliders {
        // Standing on this box: it is our support, not a wall.
        if feet_y + STAND_EPSILON >= aabb.top() {
            continue;
        }
        if !aabb.overlaps_band(band_low, band_high) {
            continue;
        }
        moved |= push_out(position, radius, aabb);
    }

    moved
}

/// Repeat [`resolve_collisions`] until a pass moves nothing or `iterations` ran.
pub fn resolve_collisions_relaxed(
    position: &mut Vec3,
    radius: f32,
    colliders: &[Aabb],
    feet_y: f32,
    config: &PhysicsConfig,
    iterations: u32,
) -> bool {
    let mut moved = false;
    for _ in 0..iterations {
        if !resolve_collisions(position, radius, colliders, feet_y, config) {
            break;
        }
        moved = true;
    }
    moved
}

/// Dispatch to the resolver selected in `config`.
pub fn resolve_with(
    position: &mut Vec3,
    radius: f32,
    colliders: &[Aabb],
    feet_y: f32,
    config: &PhysicsConfig,
) -> bool {
    match config.resolver {
        CollisionResolver::Sequential => {
            resolve_collisions(position, radius, colliders, feet_y, config)
        }
        CollisionResolver::Relaxed { iterations } => {
            resolve_collisions_relaxed(position, radius, colliders, feet_y, config, iterations)
        }
    }
}

fn push_out(position: &mut Vec3, radius: f32, aabb: &Aabb) -> bool {
    let min_x = aabb.min.x - radius;
    let max_x = aabb.max.x + radius;
    let min_z = aabb.min.z - radius;
    let max_z = aabb.max.z + radius;

    let (x, z) = (position.x, position.z);
    if !(x > min_x && x < max_x && z > min_z && z < max_z) {
        return false;
    }

    let to_min_x = x - min_x;
    let to_max_x = max_x - x;
    let to_min_z = z - min_z;
    let to_max_z = max_z - z;
    let least = to_min_x.min(to_max_x).min(to_min_z).min(to_max_z);

    if least == to_min_x {
        position.x = min_x - PUSH_EPSILON;
    } else if least == to_max_x {
        position.x = max_x + PUSH_EPSILON;
    } else if least == to_min_z {
        position.z = min_z - PUSH_EPSILON;
    } else {
        position.z = max_z + PUSH_EPSILON;
    }
    true
}

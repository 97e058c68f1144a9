use glam::Vec3;

use crate::arena::{ray_hits, Solid};

/// Whether any solid lies strictly between `origin` and `target`.
///
/// Coincident points are never blocked.
pub fn is_blocked(origin: Vec3, target: Vec3, solids: &[Solid]) -> bool {
    let delta = target - origin;
    let distance = delta.length();
    if !distance.is_finite() || distance < 1e-6 {
        return false;
    }
    let dir = delta / distance;
    ray_hits(origin, dir, solids).any(|t| t < distance)
}

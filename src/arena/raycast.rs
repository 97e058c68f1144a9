use glam::Vec3;

use super::shapes::{Aabb, Solid};

/// Nearest positive hit distance along a normalized ray.
///
/// A ray that starts inside a block reports the exit face, so a query and its
/// reverse agree on whether the segment between them is obstructed.
pub fn ray_solid_intersection(origin: Vec3, dir: Vec3, solid: &Solid) -> Option<f32> {
    match solid {
        Solid::Plane { height } => ray_plane_intersection(origin, dir, *height),
        Solid::Block(aabb) => ray_aabb_intersection(origin, dir, aabb),
        Solid::Ramp(ramp) => ramp.ray_intersection(origin, dir),
    }
}

/// All hits of a ray against `solids`, one per solid, in input order.
pub fn ray_hits<'a>(
    origin: Vec3,
    dir: Vec3,
    solids: &'a [Solid],
) -> impl Iterator<Item = f32> + 'a {
    solids
        .iter()
        .filter_map(move |solid| ray_solid_intersection(origin, dir, solid))
}

fn ray_plane_intersection(origin: Vec3, dir: Vec3, height: f32) -> Option<f32> {
    if dir.y.abs() < 1e-9 {
        return None;
    }
    let t = (height - origin.y) / dir.y;
    (t > 0.0).then_some(t)
}

fn ray_aabb_intersection(origin: Vec3, dir: Vec3, aabb: &Aabb) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let lo = aabb.min[axis];
        let hi = aabb.max[axis];

        if d.abs() < 1e-12 {
            // Parallel to this slab: either always inside it or never.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let t1 = (lo - o) * inv;
        let t2 = (hi - o) * inv;
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
    }

    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    let t = if tmin < 0.0 { tmax } else { tmin };
    (t > 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0))
    }

    #[test]
    fn downward_ray_hits_top_face() {
        let t = ray_aabb_intersection(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, &unit_box());
        assert_relative_eq!(t.unwrap(), 8.0);
    }

    #[test]
    fn ray_from_inside_reports_exit() {
        let t = ray_aabb_intersection(Vec3::new(0.0, 1.0, 0.0), Vec3::X, &unit_box());
        assert_relative_eq!(t.unwrap(), 1.0);
    }

    #[test]
    fn axis_parallel_miss_does_not_produce_nan_hits() {
        let t = ray_aabb_intersection(Vec3::new(1.0, 5.0, 3.0), Vec3::NEG_Y, &unit_box());
        assert!(t.is_none());
    }

    #[test]
    fn plane_behind_ray_is_ignored() {
        assert!(ray_plane_intersection(Vec3::new(0.0, 1.0, 0.0), Vec3::Y, 0.0).is_none());
        assert_relative_eq!(
            ray_plane_intersection(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.0).unwrap(),
            1.0
        );
    }
}

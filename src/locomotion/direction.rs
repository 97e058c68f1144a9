use glam::Vec3;

use crate::components::InputFrame;

/// Squared length below which a vector is treated as zero.
const NEGLIGIBLE_SQ: f32 = 1e-12;

/// Forward axis used when the view gives no usable horizontal heading.
const FALLBACK_FORWARD: Vec3 = Vec3::NEG_Z;
const FALLBACK_RIGHT: Vec3 = Vec3::X;

/// Viewer orientation in degrees. `yaw = -90` looks down -Z, pitch is clamped by
/// the camera to ±89 but any value is accepted here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ViewOrientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
    }
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal unit heading for this tick, or zero when there is no intent.
///
/// An explicit world direction wins when it has a horizontal component. Otherwise
/// forward/strafe intent is taken relative to `view`.
pub fn resolve_direction(input: &InputFrame, view: Option<ViewOrientation>) -> Vec3 {
    if let Some(world) = input.world_move_direction {
        let flat = flatten(world);
        if flat.is_finite() && flat.length_squared() >= NEGLIGIBLE_SQ {
            return flat.normalize();
        }
    }

    let intent_sq = input.move_forward * input.move_forward + input.move_strafe * input.move_strafe;
    if !intent_sq.is_finite() || intent_sq < NEGLIGIBLE_SQ {
        return Vec3::ZERO;
    }

    let forward = view
        .map(|v| flatten(v.forward()))
        .filter(|f| f.length_squared() >= NEGLIGIBLE_SQ)
        .map_or(FALLBACK_FORWARD, Vec3::normalize);

    let right = forward.cross(Vec3::Y);
    let right = if right.length_squared() < NEGLIGIBLE_SQ {
        FALLBACK_RIGHT
    } else {
        right.normalize()
    };

    let combined = forward * input.move_forward + right * input.move_strafe;
    if combined.length_squared() < NEGLIGIBLE_SQ {
        return Vec3::ZERO;
    }
    combined.normalize()
}

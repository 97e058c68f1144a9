use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// True when `min <= max` on every axis. Flat boxes (zero thickness) are allowed.
    pub fn is_ordered(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Whether `[low, high]` overlaps this box's vertical extent.
    pub fn overlaps_band(&self, low: f32, high: f32) -> bool {
        self.max.y >= low && self.min.y <= high
    }
}

/// Direction in which a ramp's surface rises across its footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampRise {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

/// Sloped walkable quad over a rectangular XZ footprint.
///
/// Only the top surface is raycastable. Ramps are never lateral colliders, so an
/// entity rides them through ground snapping alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    /// Footprint minimum corner as (x, z).
    pub min: Vec2,
    /// Footprint maximum corner as (x, z).
    pub max: Vec2,
    pub low: f32,
    pub high: f32,
    pub rise: RampRise,
}

impl Ramp {
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y
    }

    /// Surface expressed as `y = c + gx * x + gz * z`.
    fn plane_coefficients(&self) -> (f32, f32, f32) {
        let span_x = self.max.x - self.min.x;
        let span_z = self.max.y - self.min.y;
        let delta = self.high - self.low;
        match self.rise {
            RampRise::PosX => {
                let g = delta / span_x;
                (self.low - g * self.min.x, g, 0.0)
            }
            RampRise::NegX => {
                let g = -delta / span_x;
                (self.low - g * self.max.x, g, 0.0)
            }
            RampRise::PosZ => {
                let g = delta / span_z;
                (self.low - g * self.min.y, 0.0, g)
            }
            RampRise::NegZ => {
                let g = -delta / span_z;
                (self.low - g * self.max.y, 0.0, g)
            }
        }
    }

    /// Surface height at (x, z), or `None` outside the footprint.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        if !self.contains_xz(x, z) {
            return None;
        }
        let (c, gx, gz) = self.plane_coefficients();
        Some(c + gx * x + gz * z)
    }

    pub(crate) fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let (c, gx, gz) = self.plane_coefficients();
        // o.y + t*d.y = c + gx*(o.x + t*d.x) + gz*(o.z + t*d.z)
        let denom = dir.y - gx * dir.x - gz * dir.z;
        if denom.abs() < 1e-9 {
            return None;
        }
        let t = (c + gx * origin.x + gz * origin.z - origin.y) / denom;
        if t <= 0.0 {
            return None;
        }
        let hit = origin + dir * t;
        self.contains_xz(hit.x, hit.z).then_some(t)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.low.is_finite()
            && self.high.is_finite()
            && self.max.x > self.min.x
            && self.max.y > self.min.y
    }
}

/// Raycastable surface used for ground and line-of-sight queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid {
    /// Infinite horizontal plane. The arena floor.
    Plane { height: f32 },
    Block(Aabb),
    Ramp(Ramp),
}

//! Arena collision data: lateral colliders, raycastable solids and spawn points.
//!
//! An [`Arena`] is built once when a map loads and is never patched afterwards.
//! A map change replaces it wholesale. Maps can be built in code through
//! [`ArenaBuilder`] or loaded from JSON through [`ArenaDescription`].

mod raycast;
mod shapes;

pub use raycast::{ray_hits, ray_solid_intersection};
pub use shapes::{Aabb, Ramp, RampRise, Solid};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named location where entities (re)spawn. `position.y` is a feet-height hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub name: String,
    pub position: Vec3,
}

#[derive(Debug, Error, PartialEq)]
pub enum ArenaError {
    #[error("box {index} has min {min} above max {max}")]
    InvertedBox { index: usize, min: Vec3, max: Vec3 },
    #[error("ramp {index} has an empty or non-finite footprint")]
    InvalidRamp { index: usize },
    #[error("solid {index} has non-finite geometry")]
    NonFinite { index: usize },
    #[error("spawn point `{0}` is defined more than once")]
    DuplicateSpawn(String),
    #[error("failed to parse arena: {0}")]
    Parse(String),
}

/// Immutable collision geometry for one loaded map.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    colliders: Vec<Aabb>,
    solids: Vec<Solid>,
    spawn_points: Vec<SpawnPoint>,
}

impl Arena {
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::default()
    }

    pub fn colliders(&self) -> &[Aabb] {
        &self.colliders
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn spawn_points(&self) -> &[SpawnPoint] {
        &self.spawn_points
    }

    pub fn spawn_point(&self, name: &str) -> Option<&SpawnPoint> {
        self.spawn_points.iter().find(|s| s.name == name)
    }
}

impl Arena {
    /// Parse and validate a JSON [`ArenaDescription`].
    pub fn from_json_str(json: &str) -> Result<Self, ArenaError> {
        let description: ArenaDescription =
            serde_json::from_str(json).map_err(|e| ArenaError::Parse(e.to_string()))?;
        description.build()
    }
}

/// Data form of an arena. Every list is optional in JSON.
///
/// ```json
/// {
///   "floor": 0.0,
///   "blocks": [{ "min": [-1, 0, -1], "max": [1, 1, 1] }],
///   "ramps": [{ "min": [4, -1], "max": [8, 1], "low": 0, "high": 2, "rise": "pos_x" }],
///   "spawns": [{ "name": "player", "position": [0, 0, 6] }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaDescription {
    pub floor: Option<f32>,
    /// Colliders that are also solid.
    pub blocks: Vec<Aabb>,
    /// Colliders only.
    pub barriers: Vec<Aabb>,
    /// Solids only.
    pub platforms: Vec<Aabb>,
    pub ramps: Vec<Ramp>,
    pub spawns: Vec<SpawnPoint>,
}

impl ArenaDescription {
    pub fn build(self) -> Result<Arena, ArenaError> {
        let mut builder = Arena::builder();
        if let Some(height) = self.floor {
            builder = builder.floor(height);
        }
        for aabb in self.blocks {
            builder = builder.block(aabb);
        }
        for aabb in self.barriers {
            builder = builder.barrier(aabb);
        }
        for aabb in self.platforms {
            builder = builder.platform(aabb);
        }
        for ramp in self.ramps {
            builder = builder.ramp(ramp.min, ramp.max, ramp.low, ramp.high, ramp.rise);
        }
        for spawn in self.spawns {
            builder = builder.spawn(spawn.name, spawn.position);
        }
        builder.build()
    }
}

/// Accumulates geometry and validates it into an [`Arena`].
#[derive(Debug, Default)]
pub struct ArenaBuilder {
    colliders: Vec<Aabb>,
    solids: Vec<Solid>,
    spawn_points: Vec<SpawnPoint>,
}

impl ArenaBuilder {
    /// Infinite floor plane. Raycastable only, never a lateral collider.
    pub fn floor(mut self, height: f32) -> Self {
        self.solids.push(Solid::Plane { height });
        self
    }

    /// Solid box: pushes entities out laterally and can be stood on.
    pub fn block(mut self, aabb: Aabb) -> Self {
        self.colliders.push(aabb);
        self.solids.push(Solid::Block(aabb));
        self
    }

    /// Box that only blocks movement. Not raycastable, so it is neither ground nor cover.
    pub fn barrier(mut self, aabb: Aabb) -> Self {
        self.colliders.push(aabb);
        self
    }

    /// Box that can be stood on and blocks sight but never pushes entities.
    pub fn platform(mut self, aabb: Aabb) -> Self {
        self.solids.push(Solid::Block(aabb));
        self
    }

    pub fn ramp(mut self, min: Vec2, max: Vec2, low: f32, high: f32, rise: RampRise) -> Self {
        self.solids.push(Solid::Ramp(Ramp {
            min,
            max,
            low,
            high,
            rise,
        }));
        self
    }

    pub fn spawn(mut self, name: impl Into<String>, position: Vec3) -> Self {
        self.spawn_points.push(SpawnPoint {
            name: name.into(),
            position,
        });
        self
    }

    pub fn build(self) -> Result<Arena, ArenaError> {
        for (index, aabb) in self.colliders.iter().enumerate() {
            check_box(index, aabb)?;
        }
        for (index, solid) in self.solids.iter().enumerate() {
            match solid {
                Solid::Plane { height } if !height.is_finite() => {
                    return Err(ArenaError::NonFinite { index });
                }
                Solid::Plane { .. } => {}
                Solid::Block(aabb) => check_box(index, aabb)?,
                Solid::Ramp(ramp) if !ramp.is_valid() => {
                    return Err(ArenaError::InvalidRamp { index });
                }
                Solid::Ramp(_) => {}
            }
        }
        for (i, spawn) in self.spawn_points.iter().enumerate() {
            if self.spawn_points[..i].iter().any(|s| s.name == spawn.name) {
                return Err(ArenaError::DuplicateSpawn(spawn.name.clone()));
            }
        }

        log::debug!(
            "arena built: {} colliders, {} solids, {} spawn points",
            self.colliders.len(),
            self.solids.len(),
            self.spawn_points.len()
        );

        Ok(Arena {
            colliders: self.colliders,
            solids: self.solids,
            spawn_points: self.spawn_points,
        })
    }
}

fn check_box(index: usize, aabb: &Aabb) -> Result<(), ArenaError> {
    if !aabb.is_finite() {
        return Err(ArenaError::NonFinite { index });
    }
    if !aabb.is_ordered() {
        return Err(ArenaError::InvertedBox {
            index,
            min: aabb.min,
            max: aabb.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_solid_but_not_collider() {
        let arena = Arena::builder().floor(0.0).build().unwrap();
        assert!(arena.colliders().is_empty());
        assert_eq!(arena.solids(), &[Solid::Plane { height: 0.0 }]);
    }

    #[test]
    fn block_is_both_collider_and_solid() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let arena = Arena::builder().block(aabb).build().unwrap();
        assert_eq!(arena.colliders(), &[aabb]);
        assert_eq!(arena.solids(), &[Solid::Block(aabb)]);
    }

    #[test]
    fn inverted_box_is_rejected() {
        let err = Arena::builder()
            .block(Aabb::new(Vec3::ONE, Vec3::ZERO))
            .build()
            .unwrap_err();
        assert!(matches!(err, ArenaError::InvertedBox { index: 0, .. }));
    }

    #[test]
    fn non_finite_floor_is_rejected() {
        let err = Arena::builder().floor(f32::NAN).build().unwrap_err();
        assert_eq!(err, ArenaError::NonFinite { index: 0 });
    }

    #[test]
    fn empty_ramp_footprint_is_rejected() {
        let err = Arena::builder()
            .ramp(Vec2::ZERO, Vec2::new(0.0, 2.0), 0.0, 1.0, RampRise::PosX)
            .build()
            .unwrap_err();
        assert_eq!(err, ArenaError::InvalidRamp { index: 0 });
    }

    #[test]
    fn duplicate_spawn_names_are_rejected() {
        let err = Arena::builder()
            .spawn("alpha", Vec3::ZERO)
            .spawn("alpha", Vec3::X)
            .build()
            .unwrap_err();
        assert_eq!(err, ArenaError::DuplicateSpawn("alpha".to_string()));
    }

    #[test]
    fn spawn_lookup_by_name() {
        let arena = Arena::builder()
            .spawn("alpha", Vec3::ZERO)
            .spawn("bravo", Vec3::new(4.0, 0.0, 2.0))
            .build()
            .unwrap();
        assert_eq!(
            arena.spawn_point("bravo").map(|s| s.position),
            Some(Vec3::new(4.0, 0.0, 2.0))
        );
        assert!(arena.spawn_point("charlie").is_none());
    }

    #[test]
    fn json_description_builds_every_kind_of_geometry() {
        let arena = Arena::from_json_str(
            r#"{
                "floor": 0.0,
                "blocks": [{ "min": [-1.0, 0.0, -1.0], "max": [1.0, 1.0, 1.0] }],
                "barriers": [{ "min": [5.0, 0.0, -5.0], "max": [5.5, 3.0, 5.0] }],
                "platforms": [{ "min": [-4.0, 0.0, 2.0], "max": [-2.0, 0.3, 4.0] }],
                "ramps": [{ "min": [2.0, -1.0], "max": [4.0, 1.0], "low": 0.0, "high": 1.0, "rise": "neg_z" }],
                "spawns": [{ "name": "player", "position": [0.0, 0.0, 6.0] }]
            }"#,
        )
        .unwrap();

        // floor + block + platform + ramp
        assert_eq!(arena.solids().len(), 4);
        // block + barrier
        assert_eq!(arena.colliders().len(), 2);
        assert!(matches!(
            arena.solids()[3],
            Solid::Ramp(Ramp { rise: RampRise::NegZ, .. })
        ));
        assert_eq!(
            arena.spawn_point("player").map(|s| s.position),
            Some(Vec3::new(0.0, 0.0, 6.0))
        );
    }

    #[test]
    fn json_geometry_is_validated() {
        let err = Arena::from_json_str(r#"{ "blocks": [{ "min": [1, 1, 1], "max": [0, 0, 0] }] }"#)
            .unwrap_err();
        assert!(matches!(err, ArenaError::InvertedBox { index: 0, .. }));

        let err = Arena::from_json_str(r#"{ "floor": "low" }"#).unwrap_err();
        assert!(matches!(err, ArenaError::Parse(_)));
    }
}

//! Physics tuning values.
//!
//! A [`PhysicsConfig`] is built once (defaults or a JSON file) and then passed by
//! reference into every locomotion call. Nothing rebinds it during a session.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grounded acceptance slack above `feet + max_step_height`.
pub const STEP_EPSILON: f32 = 0.01;
/// Feet within this distance of a box top count as standing on it.
pub const STAND_EPSILON: f32 = 0.05;
/// Offset of the body band above the feet and above the eye.
pub const BODY_MARGIN: f32 = 0.1;
/// Distance placed beyond a collider edge after push-out.
pub const PUSH_EPSILON: f32 = 0.001;
/// Ground rays start this far above the entity's eye.
pub const GROUND_RAY_CLEARANCE: f32 = 50.0;

/// How lateral overlaps against multiple colliders are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollisionResolver {
    /// One ordered pass over the colliders.
    #[default]
    Sequential,
    /// Repeat the ordered pass until nothing moves or `iterations` passes ran.
    Relaxed { iterations: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Baseline ground height returned when no surface is found.
    pub ground_y: f32,
    /// Vertical acceleration (m/s², negative is down).
    pub gravity: f32,
    /// Default jump impulse (m/s).
    pub jump_velocity: f32,
    /// Eye height above the feet.
    pub eye_height: f32,
    /// Largest ground change a grounded entity rides without leaving the ground.
    pub max_step_height: f32,
    /// Default walk speed for spawned entities.
    pub walk_speed: f32,
    /// Default sprint speed for spawned entities.
    pub sprint_speed: f32,
    /// Default horizontal collision radius.
    pub radius: f32,
    /// Largest frame delta fed to a single advance.
    pub max_dt: f32,
    pub resolver: CollisionResolver,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ground_y: 0.0,
            gravity: -20.0,
            jump_velocity: 8.5,
            eye_height: 2.0,
            max_step_height: 0.5,
            walk_speed: 6.0,
            sprint_speed: 10.0,
            radius: 0.3,
            max_dt: 0.25,
            resolver: CollisionResolver::Sequential,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl PhysicsConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded physics config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("ground_y", self.ground_y),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("eye_height", self.eye_height),
            ("max_step_height", self.max_step_height),
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("radius", self.radius),
            ("max_dt", self.max_dt),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(*field, "must be finite"));
        }

        if self.gravity >= 0.0 {
            return Err(invalid("gravity", "must pull downward (negative)"));
        }
        if self.jump_velocity < 0.0 {
            return Err(invalid("jump_velocity", "must not be negative"));
        }
        if self.eye_height <= 0.0 {
            return Err(invalid("eye_height", "must be positive"));
        }
        if self.max_step_height < 0.0 {
            return Err(invalid("max_step_height", "must not be negative"));
        }
        if self.walk_speed <= 0.0 {
            return Err(invalid("walk_speed", "must be positive"));
        }
        if self.sprint_speed < self.walk_speed {
            return Err(invalid("sprint_speed", "must be at least walk_speed"));
        }
        if self.radius <= 0.0 {
            return Err(invalid("radius", "must be positive"));
        }
        if self.max_dt <= 0.0 {
            return Err(invalid("max_dt", "must be positive"));
        }
        if self.resolver == (CollisionResolver::Relaxed { iterations: 0 }) {
            return Err(invalid("resolver", "relaxed resolver needs at least one iteration"));
        }
        Ok(())
    }

    /// Clamp a frame delta into `[0, max_dt]`. Non-finite deltas become zero.
    pub fn sanitize_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            0.0
        } else {
            dt.min(self.max_dt)
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

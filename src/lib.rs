//! Skirmish: headless first-person locomotion for arena shooters.
//!
//! The [`locomotion`] module is the core: a pure per-tick update that moves an
//! entity through an [`arena::Arena`] of axis-aligned colliders and raycastable
//! solids. Everything else wires it into a `hecs` world driven at a fixed step.

pub mod arena;
pub mod camera;
pub mod components;
pub mod config;
pub mod engine;
pub mod fsm;
pub mod locomotion;
pub mod logging;
pub mod scene;
pub mod sim;
pub mod systems;

pub use arena::{
    Aabb, Arena, ArenaBuilder, ArenaDescription, ArenaError, Ramp, RampRise, Solid, SpawnPoint,
};
pub use components::{InputFrame, LocomotionState};
pub use config::{CollisionResolver, ConfigError, PhysicsConfig};
pub use locomotion::{advance, is_blocked, StepReport, ViewOrientation};
pub use sim::{SimError, Simulation};

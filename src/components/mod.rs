//! hecs components carried by simulated entities.

mod character;
mod locomotion;

pub use character::{Bot, LastStep, MoveFsm, MoveState, PatrolRoute, Player, SpawnTag};
pub use locomotion::{InputFrame, LocomotionState};

mod controllers;
mod locomotion;
mod movement_state;

pub use controllers::{bot_steering_system, patrol_system, player_input_system};
pub use locomotion::locomotion_system;
pub use movement_state::{movement_state_system, MoveCtx};

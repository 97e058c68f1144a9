//! Per-tick movement, collision and ground detection shared by every controller.
//!
//! Everything here is a pure function of its arguments plus raycasts against the
//! read-only [`Arena`](crate::arena::Arena). Nothing keeps hidden state between
//! calls.

mod advance;
mod collision;
mod direction;
mod ground;
mod sight;

pub use advance::{advance, StepReport};
pub use collision::{resolve_collisions, resolve_collisions_relaxed, resolve_with};
pub use direction::{resolve_direction, ViewOrientation};
pub use ground::ground_height;
pub use sight::is_blocked;

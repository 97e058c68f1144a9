use std::collections::HashSet;

use crate::components::InputFrame;

/// Logical actions a human controller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Sprint,
    Jump,
}

/// Input events delivered by the platform layer (or a script in headless runs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
    Look { dx: f32, dy: f32 },
}

/// Held actions plus this frame's accumulated look delta.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Action>,
    pub mouse_dx: f32,
    pub mouse_dy: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame's events. Look deltas are reset first.
    pub fn update(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;

        for event in events {
            match event {
                InputEvent::Pressed(action) => {
                    self.held.insert(action);
                }
                InputEvent::Released(action) => {
                    self.held.remove(&action);
                }
                InputEvent::Look { dx, dy } => {
                    self.mouse_dx += dx;
                    self.mouse_dy += dy;
                }
            }
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// View-relative movement intent for the locomotion core.
    pub fn frame(&self) -> InputFrame {
        let axis = |pos: Action, neg: Action| {
            f32::from(u8::from(self.is_held(pos))) - f32::from(u8::from(self.is_held(neg)))
        };
        InputFrame {
            move_forward: axis(Action::Forward, Action::Back),
            move_strafe: axis(Action::Right, Action::Left),
            world_move_direction: None,
            sprint: self.is_held(Action::Sprint),
            jump: self.is_held(Action::Jump),
        }
    }
}

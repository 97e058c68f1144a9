use glam::Vec3;

use crate::locomotion::ViewOrientation;

/// First-person viewer. Owns the look angles fed to view-relative movement and
/// sits at the followed entity's eye.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: -90.0_f32,
            pitch: 0.0,
            sensitivity: 0.1,
        }
    }

    pub fn look(&mut self, mouse_dx: f32, mouse_dy: f32) {
        self.yaw += mouse_dx * self.sensitivity;
        self.pitch -= mouse_dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-89.0, 89.0);
    }

    pub fn orientation(&self) -> ViewOrientation {
        ViewOrientation::new(self.yaw, self.pitch)
    }

    pub fn front(&self) -> Vec3 {
        self.orientation().forward().normalize()
    }

    pub fn follow_eye(&mut self, eye: Vec3) {
        self.position = eye;
    }
}

use std::f32::consts::TAU;

use macroquad::math::{Vec3, vec3};

/// Orbit radians per second at rotation speed 1.0
pub const ORBIT_RATE: f32 = 0.5;

/// Camera height as a fraction of its distance from the axis
const ELEVATION: f32 = 0.6;

/// OrbitCamera circles the stack, looking at its middle
pub struct OrbitCamera {
    pub angle: f32,
    pub distance: f32,
    pub rotation_speed: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, rotation_speed: f32) -> Self {
        Self {
            angle: 0.0,
            distance,
            rotation_speed,
        }
    }

    /// Move along the orbit
    pub fn advance(&mut self, dt: f32) {
        self.angle = (self.angle + self.rotation_speed * ORBIT_RATE * dt).rem_euclid(TAU);
    }

    /// Eye position relative to `target`
    pub fn eye(&self, target: Vec3) -> Vec3 {
        target
            + vec3(
                self.distance * self.angle.cos(),
                self.distance * ELEVATION,
                self.distance * self.angle.sin(),
            )
    }

    /// Back to the starting angle
    pub fn reset(&mut self) {
        self.angle = 0.0;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(30.0, 0.8)
    }
}

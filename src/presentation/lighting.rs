//! A single orbiting point light.
//!
//! The renderer has no lighting pipeline, so cell colors are shaded on
//! the CPU with an inverse-square style falloff.

use macroquad::color::Color;
use macroquad::math::{Vec3, vec3};

use crate::domain::BeatPhase;

/// Unlit fraction of a cell's base color
const AMBIENT: f32 = 0.55;

/// Strength of the light's own tint on lit cells
const TINT: f32 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
    pub color: Color,
    /// Distance at which the contribution halves
    pub range: f32,
}

impl PointLight {
    pub fn new(color: Color, range: f32) -> Self {
        Self {
            position: vec3(range, range, 0.0),
            intensity: 1.0,
            color,
            range: range.max(f32::EPSILON),
        }
    }

    /// Circle `center` against the camera and pulse with the beat
    pub fn animate(&mut self, center: Vec3, elapsed: f32, beat: BeatPhase) {
        let angle = -elapsed * 0.7;
        self.position = center + vec3(self.range * angle.cos(), self.range * 0.5, self.range * angle.sin());
        self.intensity = 0.8 + 0.4 * beat.spawn_phase();
    }

    /// Light reaching `point`, in [0, 1]
    pub fn contribution(&self, point: Vec3) -> f32 {
        let d = point.distance(self.position) / self.range;
        (self.intensity / (1.0 + d * d)).clamp(0.0, 1.0)
    }

    /// Shade `base` as seen at `point`; alpha is preserved
    pub fn shade(&self, base: Color, point: Vec3) -> Color {
        let k = self.contribution(point);
        let lit = AMBIENT + (1.0 - AMBIENT) * k;
        let mix = |b: f32, l: f32| (b * lit + l * TINT * k).clamp(0.0, 1.0);
        Color::new(
            mix(base.r, self.color.r),
            mix(base.g, self.color.g),
            mix(base.b, self.color.b),
            base.a,
        )
    }
}

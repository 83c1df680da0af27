//! Beat phase: a low-frequency oscillator that modulates seeding,
//! repopulation and cosmetic jitter.

use std::f32::consts::TAU;

/// Radians per second at pattern speed 1.0
pub const BEAT_RATE: f32 = 3.0;

/// Phase offset per unit of (x + y) in the layer-0 seeding wave
const SEED_WAVE_NUMBER: f32 = 0.35;

/// Highest layer-0 seeding probability reached at the wave crest
pub const SEED_DENSITY_PEAK: f64 = 0.3;

/// Cyclical angle, always kept in [0, 2π)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BeatPhase(f32);

impl BeatPhase {
    /// Wrap an arbitrary angle into [0, 2π)
    pub fn new(angle: f32) -> Self {
        let wrapped = angle.rem_euclid(TAU);
        // rem_euclid can round up to TAU for tiny negative inputs
        Self(if wrapped >= TAU { 0.0 } else { wrapped })
    }

    pub const fn angle(self) -> f32 {
        self.0
    }

    /// Advance by `pattern_speed` over `dt` seconds
    pub fn advanced(self, pattern_speed: f32, dt: f32) -> Self {
        Self::new(self.0 + pattern_speed * BEAT_RATE * dt)
    }

    /// Normalised phase in [0, 1]: `(sin(beat) + 1) / 2`
    pub fn spawn_phase(self) -> f32 {
        (self.0.sin() + 1.0) / 2.0
    }

    /// Number of clusters injected by repopulation, between 4 and 12
    pub fn spawn_count(self) -> usize {
        (4.0 + self.spawn_phase() * 8.0).floor() as usize
    }

    /// Probability that a freshly shifted-in layer-0 cell at (x, y) is alive.
    /// Travels diagonally across the plane as the beat advances.
    pub fn seed_probability(self, x: usize, y: usize) -> f64 {
        let wave = (self.0 + (x + y) as f32 * SEED_WAVE_NUMBER).sin();
        ((f64::from(wave) + 1.0) / 2.0 * SEED_DENSITY_PEAK).clamp(0.0, 1.0)
    }

    /// Oscillation in [-1, 1] for a cell, offset by its index sum
    pub fn jitter(self, index_sum: usize) -> f32 {
        (self.0 + index_sum as f32 * 0.5).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_into_range() {
        assert!((BeatPhase::new(TAU + 1.0).angle() - 1.0).abs() < 1e-5);
        let negative = BeatPhase::new(-1.0).angle();
        assert!((0.0..TAU).contains(&negative));
        assert_eq!(BeatPhase::new(-1e-9).angle(), 0.0);
    }

    #[test]
    fn test_advance_respects_speed() {
        let beat = BeatPhase::default().advanced(2.0, 0.1);
        assert!((beat.angle() - 0.6).abs() < 1e-5);

        let frozen = BeatPhase::new(1.0).advanced(0.0, 10.0);
        assert_eq!(frozen.angle(), 1.0);
    }

    #[test]
    fn test_spawn_count_bounds() {
        // sin = 0 -> phase 0.5 -> 4 + 4
        assert_eq!(BeatPhase::new(0.0).spawn_count(), 8);
        // sin = 1 -> phase 1 -> 12
        assert_eq!(BeatPhase::new(TAU / 4.0).spawn_count(), 12);
        // sin = -1 -> phase 0 -> 4
        assert_eq!(BeatPhase::new(3.0 * TAU / 4.0).spawn_count(), 4);
    }

    #[test]
    fn test_seed_probability_stays_in_range() {
        for step in 0..64 {
            let beat = BeatPhase::new(step as f32 * 0.1);
            for x in 0..30 {
                let p = beat.seed_probability(x, 30 - x);
                assert!((0.0..=SEED_DENSITY_PEAK).contains(&p));
            }
        }
    }

    #[test]
    fn test_seed_wave_travels() {
        let beat = BeatPhase::new(0.0);
        assert_ne!(beat.seed_probability(0, 0), beat.seed_probability(3, 0));
        // Same diagonal gives the same probability
        assert_eq!(beat.seed_probability(3, 1), beat.seed_probability(1, 3));
    }
}

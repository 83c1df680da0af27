use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::domain::{BeatPhase, Cell, Lattice, Pattern, Stepper};

/// Minimum seconds between two executed generations
pub const STEP_INTERVAL: f32 = 0.05;

/// Generations between layer shifts (and frontier advances)
pub const LAYER_SHIFT_INTERVAL: u64 = 10;

/// What happened during an executed generation
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub generation: u64,
    pub active_cells: usize,
    pub births: Vec<Cell>,
    pub spawned: usize,
    /// True when this generation also shifted history up a layer
    pub shifted: bool,
}

/// Session owns all mutable simulation state for one scene lifetime.
/// The per-frame driver calls [`Session::tick`] and nothing else mutates it.
pub struct Session {
    pub grid: Lattice,
    pub stepper: Stepper,
    /// Highest layer evaluated by the rule
    pub current_layer: usize,
    pub generation: u64,
    pub beat: BeatPhase,
    pub pattern_speed: f32,
    pub is_paused: bool,
    /// Unpaused seconds since the session began, drives camera and light
    pub elapsed: f32,
    pub step_timer: f32,
    pub last_step_time_ms: f32, // Step performance metric
    /// Rule births in the most recent generation
    pub last_births: usize,
    rng: StdRng,
}

impl Session {
    /// Create a session with a freshly seeded lattice.
    /// `seed` makes the whole run reproducible.
    pub fn new(size: usize, pattern_speed: f32, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let grid = Lattice::initialize(size, &mut rng);
        info!(size, population = grid.population(), "session initialised");

        Self {
            grid,
            stepper: Stepper::default(),
            current_layer: 0,
            generation: 0,
            beat: BeatPhase::default(),
            pattern_speed,
            is_paused: false,
            elapsed: 0.0,
            step_timer: 0.0,
            last_step_time_ms: 0.0,
            last_births: 0,
            rng,
        }
    }

    /// Swap the stepper (builder pattern)
    pub fn with_stepper(mut self, stepper: Stepper) -> Self {
        self.stepper = stepper;
        self
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        debug!(paused = self.is_paused, "pause toggled");
    }

    /// Throw the lattice away and seed a new one of the same size
    pub fn reseed(&mut self) {
        self.grid = Lattice::initialize(self.grid.size(), &mut self.rng);
        self.generation = 0;
        self.current_layer = 0;
        self.step_timer = 0.0;
        self.last_births = 0;
    }

    /// Stamp a pattern in the middle of layer 0
    pub fn drop_pattern(&mut self, pattern: &Pattern) {
        pattern.place_centered(&mut self.grid, 0);
    }

    /// Advance by one frame of `delta_time` seconds.
    ///
    /// Paused sessions do nothing, including the time accumulator.
    /// A generation only runs once [`STEP_INTERVAL`] has passed since
    /// the previous one.
    pub fn tick(&mut self, delta_time: f32) -> Option<StepReport> {
        if self.is_paused {
            return None;
        }

        self.elapsed += delta_time;
        self.beat = self.beat.advanced(self.pattern_speed, delta_time);
        self.step_timer += delta_time;

        if self.step_timer < STEP_INTERVAL {
            return None;
        }
        self.step_timer = 0.0;
        Some(self.advance_generation())
    }

    /// Run one generation immediately, ignoring the throttle
    pub fn advance_generation(&mut self) -> StepReport {
        let start = Instant::now();

        let outcome = self.stepper.step(&self.grid, self.current_layer, self.beat);
        self.grid = outcome.grid;
        self.generation += 1;

        let shifted = self.generation % LAYER_SHIFT_INTERVAL == 0;
        if shifted {
            self.grid.shift_layers(self.beat, &mut self.rng);
            self.current_layer = (self.current_layer + 1).min(self.grid.top_layer());
            debug!(
                generation = self.generation,
                frontier = self.current_layer,
                "layers shifted"
            );
        }

        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.last_births = outcome.births.len();

        StepReport {
            generation: self.generation,
            active_cells: outcome.active_cells,
            births: outcome.births,
            spawned: outcome.spawned.len(),
            shifted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Algorithm, presets};

    #[test]
    fn test_new_session_starts_at_layer_zero() {
        let session = Session::new(13, 1.0, Some(1));
        assert_eq!(session.grid.size(), 13);
        assert_eq!(session.current_layer, 0);
        assert_eq!(session.generation, 0);
        assert_eq!(session.grid.population(), session.grid.layer_population(0));
    }

    #[test]
    fn test_tick_is_throttled() {
        let mut session = Session::new(10, 1.0, Some(2));
        for _ in 0..4 {
            assert!(session.tick(0.01).is_none());
        }
        let report = session.tick(0.011).expect("interval elapsed");
        assert_eq!(report.generation, 1);
        assert_eq!(session.step_timer, 0.0);
        assert!(session.tick(0.01).is_none());
    }

    #[test]
    fn test_paused_session_freezes_everything() {
        let mut session = Session::new(10, 1.0, Some(3));
        session.toggle_pause();
        let beat = session.beat;

        assert!(session.tick(1.0).is_none());
        assert_eq!(session.generation, 0);
        assert_eq!(session.elapsed, 0.0);
        assert_eq!(session.beat, beat);

        session.toggle_pause();
        assert!(session.tick(0.1).is_some());
    }

    #[test]
    fn test_beat_advances_with_pattern_speed() {
        let mut still = Session::new(10, 0.0, Some(4));
        still.tick(0.02);
        assert_eq!(still.beat.angle(), 0.0);

        let mut moving = Session::new(10, 2.0, Some(4));
        moving.tick(0.02);
        assert!(moving.beat.angle() > 0.0);
    }

    #[test]
    fn test_frontier_advances_every_ten_generations() {
        let mut session = Session::new(10, 1.0, Some(5));
        for generation in 1..=25u64 {
            let report = session.advance_generation();
            assert_eq!(report.shifted, generation % 10 == 0);
        }
        assert_eq!(session.current_layer, 2);
    }

    #[test]
    fn test_frontier_stops_at_top_layer() {
        let mut session = Session::new(10, 1.0, Some(6));
        for _ in 0..200 {
            session.advance_generation();
        }
        assert_eq!(session.current_layer, 9);
    }

    #[test]
    fn test_reseed_resets_counters() {
        let mut session = Session::new(10, 1.0, Some(7));
        for _ in 0..12 {
            session.advance_generation();
        }
        session.reseed();
        assert_eq!(session.generation, 0);
        assert_eq!(session.current_layer, 0);
        assert_eq!(session.grid.population(), session.grid.layer_population(0));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Session::new(13, 1.0, Some(42));
        let mut b = Session::new(13, 1.0, Some(42));
        for _ in 0..40 {
            a.tick(0.05);
            b.tick(0.05);
        }
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.generation, b.generation);
    }

    #[test]
    fn test_drop_pattern_lands_on_layer_zero() {
        let mut session = Session::new(10, 1.0, Some(8));
        session.grid.clear();
        session.drop_pattern(&presets::glider());
        assert_eq!(session.grid.layer_population(0), 5);
    }

    #[test]
    fn test_last_births_tracks_report() {
        let mut session = Session::new(12, 1.0, Some(9));
        for _ in 0..30 {
            let report = session.advance_generation();
            assert_eq!(session.last_births, report.births.len());
        }
        session.reseed();
        assert_eq!(session.last_births, 0);
    }

    #[test]
    fn test_layers_above_frontier_stay_dead() {
        let mut session = Session::new(12, 1.0, Some(10));
        for _ in 0..150 {
            session.advance_generation();
            let top = session.grid.top_layer();
            for layer in session.current_layer + 1..=top {
                assert_eq!(session.grid.layer_population(layer), 0, "layer {layer}");
            }
        }
    }

    #[test]
    fn test_with_stepper_swaps_algorithm() {
        let mut serial = Session::new(10, 1.0, Some(11));
        let mut parallel = Session::new(10, 1.0, Some(11)).with_stepper(Stepper::new(Algorithm::Parallel));
        assert_eq!(parallel.stepper.algorithm, Algorithm::Parallel);
        for _ in 0..25 {
            assert_eq!(serial.advance_generation(), parallel.advance_generation());
        }
        assert_eq!(serial.grid, parallel.grid);
    }
}

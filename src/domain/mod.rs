mod algorithm;
mod beat;
mod cell;
mod lattice;
mod patterns;
pub mod stepper;

pub use algorithm::Algorithm;
pub use beat::{BEAT_RATE, BeatPhase, SEED_DENSITY_PEAK};
pub use cell::{Cell, next_state};
pub use lattice::{INITIAL_DENSITY, Lattice};
pub use patterns::{Pattern, presets};
pub use stepper::{REPOPULATION_THRESHOLD, StepOutcome, Stepper, step};

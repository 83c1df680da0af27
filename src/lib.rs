// Domain layer - the layered automaton itself
pub mod domain;

// Application layer - session state, parameters, orchestration
pub mod application;

// Presentation layer - primitives, history, lighting, audio
pub mod presentation;

// Infrastructure layer - UI, rendering, input
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Algorithm, BeatPhase, Cell, Lattice, Pattern, Stepper, presets};
pub use application::{App, OrbitCamera, SceneParams, Session};
pub use presentation::{Scene, Voice};

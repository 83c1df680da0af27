use tracing::info;

use super::camera::OrbitCamera;
use super::params::{ParamError, Reconfigure, SceneParams};
use super::session::{Session, StepReport};
use crate::domain::{Algorithm, Pattern, Stepper, presets};
use crate::presentation::{Scene, Voice};

/// Top-level orchestrator: owns the simulation session, the scene it is
/// presented through, and the camera. One [`App::frame`] call per display
/// refresh is the only thing that moves it forward.
pub struct App {
    pub params: SceneParams,
    pub session: Session,
    pub scene: Scene,
    pub camera: OrbitCamera,
    /// Survives rebuilds, unlike the session
    pub algorithm: Algorithm,
    patterns: Vec<Pattern>,
    pattern_index: usize,
    seed: Option<u64>,
    torn_down: bool,
}

impl App {
    pub fn new(params: SceneParams, voice: Voice, seed: Option<u64>) -> Result<Self, ParamError> {
        params.validate()?;

        let session = Session::new(params.grid_size, params.pattern_speed, seed);
        let mut scene = Scene::new(&params, voice);
        scene.refresh(&session.grid, session.beat);
        info!(grid_size = params.grid_size, "app started");

        Ok(Self {
            camera: OrbitCamera::new(params.camera_distance, params.rotation_speed),
            params,
            session,
            scene,
            algorithm: Algorithm::default(),
            patterns: presets::all_patterns(),
            pattern_index: 0,
            seed,
            torn_down: false,
        })
    }

    /// Advance one display frame.
    ///
    /// Camera and light only move while the session is running, since they
    /// share its time accumulator.
    pub fn frame(&mut self, delta_time: f32) -> Option<StepReport> {
        let report = self.session.tick(delta_time);

        if !self.session.is_paused {
            self.camera.advance(delta_time);
            self.scene.animate(self.session.elapsed, self.session.beat);
        }

        if let Some(report) = &report {
            self.scene.on_step(report, &self.session.grid, self.session.beat);
        }
        report
    }

    /// Apply new parameters.
    ///
    /// Grid size and cell size rebuild the session and scene from scratch;
    /// anything else is updated in place without resetting the simulation.
    pub fn reconfigure(&mut self, next: SceneParams) -> Result<Reconfigure, ParamError> {
        next.validate()?;
        let change = self.params.diff(&next);

        match change {
            Reconfigure::Unchanged => {}
            Reconfigure::InPlace => {
                self.session.pattern_speed = next.pattern_speed;
                self.camera.distance = next.camera_distance;
                self.camera.rotation_speed = next.rotation_speed;
                self.scene.restyle(&next, &self.session.grid, self.session.beat);
                info!("parameters updated in place");
            }
            Reconfigure::Rebuild => {
                self.scene.rebuild(&next);
                self.session = Session::new(next.grid_size, next.pattern_speed, self.seed)
                    .with_stepper(Stepper::new(self.algorithm));
                self.scene.refresh(&self.session.grid, self.session.beat);
                self.camera = OrbitCamera::new(next.camera_distance, next.rotation_speed);
                info!(grid_size = next.grid_size, cell_size = next.cell_size, "scene rebuilt");
            }
        }

        self.params = next;
        Ok(change)
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    /// New random layer 0, history wiped
    pub fn reseed(&mut self) {
        self.session.reseed();
        self.scene.history.clear();
        self.scene.refresh(&self.session.grid, self.session.beat);
    }

    /// Use `algorithm` for the rule pass from the next generation on
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.set_algorithm(algorithm);
        self
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        self.session.stepper.algorithm = algorithm;
        info!(algorithm = algorithm.name(), "algorithm selected");
    }

    pub fn cycle_algorithm(&mut self) {
        self.set_algorithm(self.algorithm.next());
    }

    /// Preset stamped by [`App::drop_pattern`]
    pub fn selected_pattern(&self) -> &Pattern {
        &self.patterns[self.pattern_index]
    }

    pub fn cycle_pattern(&mut self) {
        self.pattern_index = (self.pattern_index + 1) % self.patterns.len();
    }

    /// Stamp the selected preset in the middle of layer 0
    pub fn drop_pattern(&mut self) {
        self.session.drop_pattern(&self.patterns[self.pattern_index]);
        self.scene.refresh(&self.session.grid, self.session.beat);
    }

    pub fn toggle_sound(&mut self) -> Result<Reconfigure, ParamError> {
        let next = SceneParams {
            sound_enabled: !self.params.sound_enabled,
            ..self.params
        };
        self.reconfigure(next)
    }

    /// Release scene resources and close audio. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scene.teardown();
        self.scene.voice.close();
        self.torn_down = true;
        info!(generation = self.session.generation, "app shut down");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}

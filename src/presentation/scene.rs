use tracing::info;

use super::audio::Voice;
use super::history::HistoryTrail;
use super::lighting::PointLight;
use super::primitives::{CellPrimitive, CellStyle, reconcile, stack_center};
use crate::application::{SceneParams, StepReport};
use crate::domain::{BeatPhase, Cell, Lattice};

/// Light orbit radius relative to the lattice size
const LIGHT_RANGE_FACTOR: f32 = 0.9;

/// Everything the presentation side owns for one scene: the live cell
/// primitives, the history trail, the light and the birth voice.
pub struct Scene {
    pub live: Vec<CellPrimitive>,
    pub history: HistoryTrail,
    pub light: PointLight,
    pub style: CellStyle,
    pub voice: Voice,
    grid_size: usize,
}

impl Scene {
    pub fn new(params: &SceneParams, voice: Voice) -> Self {
        let mut voice = voice;
        voice.set_enabled(params.sound_enabled);
        Self {
            live: Vec::new(),
            history: HistoryTrail::new(),
            light: PointLight::new(params.light_color, params.grid_size as f32 * LIGHT_RANGE_FACTOR),
            style: CellStyle {
                cell_size: params.cell_size,
                color: params.cell_color,
            },
            voice,
            grid_size: params.grid_size,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Rebuild the live set from `grid`
    pub fn refresh(&mut self, grid: &Lattice, beat: BeatPhase) {
        let old = std::mem::take(&mut self.live);
        self.live = reconcile(old, grid, &self.style, beat);
    }

    /// React to an executed generation: new live set, history traces
    /// and one tone for the batch of births
    pub fn on_step(&mut self, report: &StepReport, grid: &Lattice, beat: BeatPhase) {
        self.refresh(grid, beat);
        if report.shifted {
            // Births moved up with the shift; top-layer births fell off
            let lifted: Vec<Cell> = report
                .births
                .iter()
                .filter(|cell| cell.layer < grid.top_layer())
                .map(|cell| Cell::new(cell.x, cell.y, cell.layer + 1))
                .collect();
            self.history.record(&lifted, grid.size(), report.generation);
        } else {
            self.history.record(&report.births, grid.size(), report.generation);
        }
        self.voice.on_births(&report.births);
    }

    /// Per-frame cosmetic update
    pub fn animate(&mut self, elapsed: f32, beat: BeatPhase) {
        self.light.animate(stack_center(self.grid_size), elapsed, beat);
    }

    /// Apply the cheap parameter changes without touching geometry
    pub fn restyle(&mut self, params: &SceneParams, grid: &Lattice, beat: BeatPhase) {
        self.light.color = params.light_color;
        self.voice.set_enabled(params.sound_enabled);
        if self.style.color != params.cell_color {
            self.style.color = params.cell_color;
            self.refresh(grid, beat);
        }
    }

    /// Release everything tied to this scene: live and history
    /// primitives are dropped and the voice falls silent.
    /// The voice itself survives a rebuild.
    pub fn teardown(&mut self) {
        self.voice.stop();
        self.live.clear();
        self.history.clear();
        info!(grid_size = self.grid_size, "scene torn down");
    }

    /// Reinitialise for new structural parameters, reusing the voice
    pub fn rebuild(&mut self, params: &SceneParams) {
        self.teardown();
        let voice = std::mem::replace(&mut self.voice, Voice::silent());
        *self = Self::new(params, voice);
    }
}

//! Automaton stepper: one generation of the layered rule plus the
//! repopulation heuristic that keeps the stack from dying out.

use std::f32::consts::TAU;

use rayon::prelude::*;
use tracing::debug;

use super::{Algorithm, BeatPhase, Cell, Lattice, next_state};

/// Repopulation fires when fewer live cells than this remain after the rule pass
pub const REPOPULATION_THRESHOLD: usize = 30;

/// Cluster ring radius as a fraction of the lattice size
pub const SPAWN_RADIUS_FACTOR: f32 = 0.3;

/// Offsets of a plus-shaped cluster around its center
const PLUS: [(isize, isize); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];

/// Result of a single generation
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub grid: Lattice,
    /// Live cells in `grid`, repopulated cells included
    pub active_cells: usize,
    /// Cells that went dead -> alive under the rule
    pub births: Vec<Cell>,
    /// Cells forced alive by repopulation (always layer 0)
    pub spawned: Vec<Cell>,
}

/// Evaluates generations. Holds no simulation state of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stepper {
    pub algorithm: Algorithm,
    pub repopulate: bool,
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl Stepper {
    pub const fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            repopulate: true,
        }
    }

    /// Same stepper with the repopulation heuristic switched off
    pub const fn without_repopulation(mut self) -> Self {
        self.repopulate = false;
        self
    }

    /// Compute the next generation.
    ///
    /// Only layers up to `current_layer` are evaluated; everything above is
    /// dead in the result. Neighbor counts are plane-local with toroidal
    /// wrap. If fewer than [`REPOPULATION_THRESHOLD`] cells survive the
    /// rule pass, plus-shaped clusters are stamped onto layer 0 afterwards.
    pub fn step(&self, grid: &Lattice, current_layer: usize, beat: BeatPhase) -> StepOutcome {
        let frontier = current_layer.min(grid.top_layer());

        let (mut next, births) = match self.algorithm {
            Algorithm::Serial => apply_rule(grid, frontier),
            Algorithm::Parallel => apply_rule_parallel(grid, frontier),
        };

        let survivors = next.population();
        let spawned = if self.repopulate && survivors < REPOPULATION_THRESHOLD {
            let spawned = inject_clusters(&mut next, beat);
            debug!(survivors, spawned = spawned.len(), "repopulated layer 0");
            spawned
        } else {
            Vec::new()
        };

        StepOutcome {
            active_cells: survivors + spawned.len(),
            grid: next,
            births,
            spawned,
        }
    }
}

/// Step with the default stepper (serial, repopulation on)
pub fn step(grid: &Lattice, current_layer: usize, beat: BeatPhase) -> StepOutcome {
    Stepper::default().step(grid, current_layer, beat)
}

/// Serial rule pass over layers `0..=frontier`
fn apply_rule(grid: &Lattice, frontier: usize) -> (Lattice, Vec<Cell>) {
    let size = grid.size();
    let mut next = Lattice::new(size);
    let mut births = Vec::new();

    for layer in 0..=frontier {
        for y in 0..size {
            for x in 0..size {
                let alive = grid.get(x, y, layer);
                let neighbors = grid.count_plane_neighbors(x, y, layer);
                if next_state(alive, neighbors) {
                    next.set(x, y, layer, true);
                    if !alive {
                        births.push(Cell::new(x, y, layer));
                    }
                }
            }
        }
    }

    (next, births)
}

/// Parallel rule pass using rayon, identical output to [`apply_rule`]
fn apply_rule_parallel(grid: &Lattice, frontier: usize) -> (Lattice, Vec<Cell>) {
    let size = grid.size();
    let active_len = (frontier + 1) * size * size;

    let mut cells: Vec<bool> = (0..active_len)
        .into_par_iter()
        .map(|idx| {
            let Cell { x, y, layer } = grid.cell_at(idx);
            next_state(grid.is_alive_at(idx), grid.count_plane_neighbors(x, y, layer))
        })
        .collect();

    let births = cells
        .iter()
        .enumerate()
        .filter(|&(idx, &alive)| alive && !grid.is_alive_at(idx))
        .map(|(idx, _)| grid.cell_at(idx))
        .collect();

    cells.resize(size * size * size, false);
    (Lattice::from_cells(size, cells), births)
}

/// Stamp `beat.spawn_count()` plus clusters on a ring around the lattice
/// center. Placement does not wrap; points off the lattice are skipped.
/// Returns the cells that were dead before and are now alive.
fn inject_clusters(grid: &mut Lattice, beat: BeatPhase) -> Vec<Cell> {
    let size = grid.size();
    let count = beat.spawn_count();
    let center = size as f32 / 2.0;
    let radius = SPAWN_RADIUS_FACTOR * size as f32;
    let mut spawned = Vec::new();

    for i in 0..count {
        let angle = beat.angle() + i as f32 * TAU / count as f32;
        let cx = (center + radius * angle.cos()).floor() as isize;
        let cy = (center + radius * angle.sin()).floor() as isize;

        for (dx, dy) in PLUS {
            let (px, py) = (cx + dx, cy + dy);
            if px < 0 || py < 0 || px >= size as isize || py >= size as isize {
                continue;
            }
            let (px, py) = (px as usize, py as usize);
            if !grid.get(px, py, 0) {
                grid.set(px, py, 0, true);
                spawned.push(Cell::new(px, py, 0));
            }
        }
    }

    spawned
}

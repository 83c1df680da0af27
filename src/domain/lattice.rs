//! The layered lattice: an N×N×N boolean volume where x and y wrap
//! like a torus and layers stack without wrapping.
//!
//! Storage is layer-major, so one layer is a contiguous `size * size`
//! slice and shifting history upward is a single `copy_within`.

use rand::Rng;

use super::{BeatPhase, Cell};

/// Probability of a layer-0 cell being alive on initialisation
pub const INITIAL_DENSITY: f64 = 0.2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    cells: Vec<bool>,
}

impl Lattice {
    /// Create a lattice with every cell dead
    pub(crate) fn new(size: usize) -> Self {
        debug_assert!(size > 0);
        Self {
            size,
            cells: vec![false; size * size * size],
        }
    }

    /// Allocate a lattice and seed layer 0 with ~20% live cells.
    /// Every other layer starts dead.
    ///
    /// `size` must be at least 1; callers validate it through
    /// `SceneParams::validate` first.
    pub fn initialize<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut lattice = Self::new(size);
        let plane = size * size;
        lattice.cells[..plane]
            .iter_mut()
            .for_each(|cell| *cell = rng.random_bool(INITIAL_DENSITY));
        lattice
    }

    /// Wrap precomputed cells; length must be `size³`
    pub(crate) fn from_cells(size: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), size * size * size);
        Self { size, cells }
    }

    /// Edge length on every axis
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Highest layer index, the fixed top bound of the stack
    pub const fn top_layer(&self) -> usize {
        self.size - 1
    }

    const fn plane(&self) -> usize {
        self.size * self.size
    }

    const fn index(&self, x: usize, y: usize, layer: usize) -> usize {
        layer * self.plane() + y * self.size + x
    }

    /// Inverse of the flat index
    pub(crate) const fn cell_at(&self, index: usize) -> Cell {
        let plane = self.plane();
        Cell::new(index % self.size, (index % plane) / self.size, index / plane)
    }

    pub(crate) fn is_alive_at(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Get cell state (out of range reads as dead)
    #[inline]
    pub fn get(&self, x: usize, y: usize, layer: usize) -> bool {
        if x >= self.size || y >= self.size || layer >= self.size {
            return false;
        }
        self.cells[self.index(x, y, layer)]
    }

    /// Set cell state (out of range writes are ignored)
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, layer: usize, alive: bool) {
        if x < self.size && y < self.size && layer < self.size {
            let idx = self.index(x, y, layer);
            self.cells[idx] = alive;
        }
    }

    /// Wrap a signed plane coordinate onto the torus
    #[inline]
    pub fn wrap(&self, coord: isize) -> usize {
        coord.rem_euclid(self.size as isize) as usize
    }

    /// Count the 8 live neighbors in the same layer, wrapping on x and y.
    /// Never looks across layers.
    pub fn count_plane_neighbors(&self, x: usize, y: usize, layer: usize) -> u8 {
        (-1isize..=1)
            .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter(|&(dx, dy)| {
                let nx = self.wrap(x as isize + dx);
                let ny = self.wrap(y as isize + dy);
                self.cells[self.index(nx, ny, layer)]
            })
            .count() as u8
    }

    /// Total number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cells in a single layer
    pub fn layer_population(&self, layer: usize) -> usize {
        if layer >= self.size {
            return 0;
        }
        let plane = self.plane();
        self.cells[layer * plane..(layer + 1) * plane]
            .iter()
            .filter(|&&alive| alive)
            .count()
    }

    /// Live cell count for every layer, bottom first
    pub fn layer_populations(&self) -> Vec<usize> {
        (0..self.size).map(|layer| self.layer_population(layer)).collect()
    }

    /// Iterate over live cells in storage order
    pub fn iter_alive(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| self.cell_at(idx))
    }

    /// Move every column's history up one layer and seed a fresh layer 0.
    ///
    /// Layer `k` receives layer `k - 1`; the old top layer is discarded.
    /// Layer 0 is redrawn with a probability from the beat's travelling
    /// wave, so the new seeds sweep across the plane instead of being
    /// uniform noise.
    pub fn shift_layers<R: Rng + ?Sized>(&mut self, beat: BeatPhase, rng: &mut R) {
        let plane = self.plane();
        let len = self.cells.len();
        self.cells.copy_within(0..len - plane, plane);

        for y in 0..self.size {
            for x in 0..self.size {
                let alive = rng.random_bool(beat.seed_probability(x, y));
                let idx = self.index(x, y, 0);
                self.cells[idx] = alive;
            }
        }
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

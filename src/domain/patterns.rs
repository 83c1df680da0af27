use super::Lattice;

/// A planar arrangement of live cells that can be stamped onto any layer
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>, // Relative coordinates of alive cells
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        Self { name, description, width, height, cells }
    }

    /// Stamp the pattern with its top-left corner at (x, y), wrapping
    /// around the torus like the rule does
    pub fn place_on(&self, lattice: &mut Lattice, x: usize, y: usize, layer: usize) {
        for &(dx, dy) in &self.cells {
            let px = lattice.wrap((x + dx) as isize);
            let py = lattice.wrap((y + dy) as isize);
            lattice.set(px, py, layer, true);
        }
    }

    /// Stamp the pattern centered on the plane
    pub fn place_centered(&self, lattice: &mut Lattice, layer: usize) {
        let size = lattice.size();
        let x = (size.saturating_sub(self.width)) / 2;
        let y = (size.saturating_sub(self.height)) / 2;
        self.place_on(lattice, x, y, layer);
    }
}

/// Small seed patterns that behave well on a 10–30 plane
pub mod presets {
    use super::*;

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new(
            "Blinker",
            "Oscillator (period 2)",
            vec![(0, 1), (1, 1), (2, 1)],
        )
    }

    /// Glider - moves diagonally, wraps forever on the torus
    pub fn glider() -> Pattern {
        Pattern::new(
            "Glider",
            "Moves diagonally (period 4)",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new(
            "Block",
            "Still life",
            vec![
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }

    /// Plus - same shape the repopulation clusters use
    pub fn plus() -> Pattern {
        Pattern::new(
            "Plus",
            "Becomes a ring after one step",
            vec![
                (1, 0),
                (0, 1), (1, 1), (2, 1),
                (1, 2),
            ],
        )
    }

    /// R-pentomino - classic methuselah
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "R-pentomino",
            "Methuselah",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![glider(), blinker(), block(), plus(), r_pentomino()]
    }
}

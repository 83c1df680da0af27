/// Cell addresses a single site of the layered lattice.
/// `x` and `y` span a plane, `layer` stacks planes upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub layer: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize, layer: usize) -> Self {
        Self { x, y, layer }
    }

    /// Sum of all three indices, used to phase-shift cosmetic motion per cell
    pub const fn index_sum(self) -> usize {
        self.x + self.y + self.layer
    }
}

/// Pure function computing the next state under B3/S23:
/// 1. Live cell with 2-3 neighbors survives
/// 2. Dead cell with exactly 3 neighbors becomes alive
/// 3. All other cases result in death
pub const fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underpopulation() {
        assert!(!next_state(true, 0));
        assert!(!next_state(true, 1));
    }

    #[test]
    fn test_survival() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
    }

    #[test]
    fn test_overpopulation() {
        assert!(!next_state(true, 4));
        assert!(!next_state(true, 8));
    }

    #[test]
    fn test_reproduction_needs_exactly_three() {
        assert!(next_state(false, 3));
        assert!(!next_state(false, 2));
        assert!(!next_state(false, 4));
    }

    #[test]
    fn test_index_sum() {
        assert_eq!(Cell::new(2, 3, 4).index_sum(), 9);
    }
}

//! Translucent traces left wherever a cell was born.
//!
//! Traces fade linearly with age and are removed once they reach
//! `lifetime` generations; the trail also holds at most `capacity`
//! traces, evicting the oldest first.

use std::collections::VecDeque;

use macroquad::math::Vec3;

use super::primitives::world_position;
use crate::domain::Cell;

pub const HISTORY_LIFETIME: u64 = 120;
pub const HISTORY_CAPACITY: usize = 4096;

/// Opacity of a trace on the generation it was recorded
pub const HISTORY_OPACITY: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryTrace {
    pub cell: Cell,
    pub position: Vec3,
    pub born_at: u64,
}

pub struct HistoryTrail {
    traces: VecDeque<HistoryTrace>,
    lifetime: u64,
    capacity: usize,
}

impl Default for HistoryTrail {
    fn default() -> Self {
        Self::with_limits(HISTORY_LIFETIME, HISTORY_CAPACITY)
    }
}

impl HistoryTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(lifetime: u64, capacity: usize) -> Self {
        Self {
            traces: VecDeque::new(),
            lifetime: lifetime.max(1),
            capacity,
        }
    }

    /// Add one trace per birth, then apply the retention policy
    pub fn record(&mut self, births: &[Cell], grid_size: usize, generation: u64) {
        self.traces.extend(births.iter().map(|&cell| HistoryTrace {
            cell,
            position: world_position(cell, grid_size),
            born_at: generation,
        }));
        self.prune(generation);
    }

    /// Drop expired traces and trim to capacity.
    /// Traces are stored oldest first.
    pub fn prune(&mut self, generation: u64) {
        while self
            .traces
            .front()
            .is_some_and(|trace| generation.saturating_sub(trace.born_at) >= self.lifetime)
        {
            self.traces.pop_front();
        }
        while self.traces.len() > self.capacity {
            self.traces.pop_front();
        }
    }

    /// Current opacity of a trace, 0 once it expires
    pub fn opacity(&self, trace: &HistoryTrace, generation: u64) -> f32 {
        let age = generation.saturating_sub(trace.born_at);
        if age >= self.lifetime {
            return 0.0;
        }
        HISTORY_OPACITY * (1.0 - age as f32 / self.lifetime as f32)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryTrace> {
        self.traces.iter()
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn clear(&mut self) {
        self.traces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn births(n: usize) -> Vec<Cell> {
        (0..n).map(|i| Cell::new(i % 10, i / 10, 0)).collect()
    }

    #[test]
    fn test_record_keeps_traces_within_lifetime() {
        let mut trail = HistoryTrail::with_limits(5, 100);
        trail.record(&births(3), 10, 1);
        trail.record(&births(2), 10, 4);
        assert_eq!(trail.len(), 5);

        // Generation 6: the first batch is 5 generations old
        trail.prune(6);
        assert_eq!(trail.len(), 2);
        assert!(trail.iter().all(|t| t.born_at == 4));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut trail = HistoryTrail::with_limits(1000, 4);
        trail.record(&births(3), 10, 1);
        trail.record(&births(3), 10, 2);
        assert_eq!(trail.len(), 4);
        assert_eq!(trail.iter().filter(|t| t.born_at == 1).count(), 1);
    }

    #[test]
    fn test_opacity_fades_linearly() {
        let trail = HistoryTrail::with_limits(10, 10);
        let trace = HistoryTrace {
            cell: Cell::new(0, 0, 0),
            position: Vec3::ZERO,
            born_at: 0,
        };
        assert_eq!(trail.opacity(&trace, 0), HISTORY_OPACITY);
        assert!((trail.opacity(&trace, 5) - HISTORY_OPACITY / 2.0).abs() < 1e-6);
        assert_eq!(trail.opacity(&trace, 10), 0.0);
    }

    #[test]
    fn test_clear() {
        let mut trail = HistoryTrail::new();
        trail.record(&births(7), 10, 0);
        trail.clear();
        assert!(trail.is_empty());
    }
}

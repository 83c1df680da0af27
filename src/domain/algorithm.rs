//! Algorithm enum for selecting how the rule pass is evaluated.
//!
//! Both variants produce identical lattices; they only differ in how
//! the per-cell work is scheduled.

use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Layer by layer, row by row on the calling thread
    #[default]
    Serial,
    /// Cells spread across the rayon pool
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name for UI and benchmark tables
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }

    /// The algorithm after this one, wrapping around
    pub fn next(self) -> Algorithm {
        let all = Algorithm::all();
        let index = all.iter().position(|&a| a == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Single thread, storage order",
            Algorithm::Parallel => "rayon par_iter over active layers",
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    /// Case-insensitive match on [`Algorithm::name`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::all()
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown algorithm: {s}"))
    }
}

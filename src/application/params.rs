//! Scene parameters: the user-adjustable knobs, their declared ranges,
//! and the diff that decides between a rebuild and an in-place update.

use std::env;
use std::str::FromStr;

use macroquad::color::{BLUE, Color, GOLD};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::Algorithm;

pub const GRID_SIZE_RANGE: (usize, usize) = (10, 30);
pub const CELL_SIZE_RANGE: (f32, f32) = (0.1, 1.0);
pub const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 3.0);
pub const CAMERA_DISTANCE_RANGE: (f32, f32) = (10.0, 80.0);
pub const PATTERN_SPEED_RANGE: (f32, f32) = (0.0, 5.0);

/// A parameter rejected at the configuration boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// What a parameter change costs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconfigure {
    Unchanged,
    /// Colors, speeds, camera distance, sound
    InPlace,
    /// Grid size or cell size: tear down and reinitialise
    Rebuild,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    pub grid_size: usize,
    pub cell_size: f32,
    pub rotation_speed: f32,
    pub camera_distance: f32,
    pub pattern_speed: f32,
    pub cell_color: Color,
    pub light_color: Color,
    pub sound_enabled: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            grid_size: 13,
            cell_size: 0.7,
            rotation_speed: 0.8,
            camera_distance: 30.0,
            pattern_speed: 1.0,
            cell_color: GOLD,
            light_color: BLUE,
            sound_enabled: true,
        }
    }
}

fn check(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ParamError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParamError::OutOfRange { name, value, min, max })
    }
}

fn clamp_finite(value: f32, (min, max): (f32, f32)) -> f32 {
    if value.is_finite() { value.clamp(min, max) } else { min }
}

impl SceneParams {
    /// Reject the first out-of-range field
    pub fn validate(&self) -> Result<(), ParamError> {
        let (min_grid, max_grid) = GRID_SIZE_RANGE;
        check(
            "grid_size",
            self.grid_size as f32,
            (min_grid as f32, max_grid as f32),
        )?;
        check("cell_size", self.cell_size, CELL_SIZE_RANGE)?;
        check("rotation_speed", self.rotation_speed, ROTATION_SPEED_RANGE)?;
        check("camera_distance", self.camera_distance, CAMERA_DISTANCE_RANGE)?;
        check("pattern_speed", self.pattern_speed, PATTERN_SPEED_RANGE)?;
        Ok(())
    }

    /// Coerce every field into its declared range
    pub fn clamped(mut self) -> Self {
        self.grid_size = self.grid_size.clamp(GRID_SIZE_RANGE.0, GRID_SIZE_RANGE.1);
        self.cell_size = clamp_finite(self.cell_size, CELL_SIZE_RANGE);
        self.rotation_speed = clamp_finite(self.rotation_speed, ROTATION_SPEED_RANGE);
        self.camera_distance = clamp_finite(self.camera_distance, CAMERA_DISTANCE_RANGE);
        self.pattern_speed = clamp_finite(self.pattern_speed, PATTERN_SPEED_RANGE);
        self
    }

    /// Classify the change from `self` to `next`
    pub fn diff(&self, next: &SceneParams) -> Reconfigure {
        if self.grid_size != next.grid_size || self.cell_size != next.cell_size {
            Reconfigure::Rebuild
        } else if self != next {
            Reconfigure::InPlace
        } else {
            Reconfigure::Unchanged
        }
    }

    /// Defaults overridden by `LIFE3D_*` environment variables, clamped
    pub fn from_env() -> Self {
        let mut params = Self::default();

        if let Some(size) = env_override("LIFE3D_GRID_SIZE") {
            params.grid_size = size;
        }
        if let Some(size) = env_override("LIFE3D_CELL_SIZE") {
            params.cell_size = size;
        }
        if let Some(speed) = env_override("LIFE3D_PATTERN_SPEED") {
            params.pattern_speed = speed;
        }
        if let Some(sound) = env_override("LIFE3D_SOUND") {
            params.sound_enabled = sound;
        }

        let clamped = params.clamped();
        if clamped != params {
            warn!(?params, "environment overrides clamped into range");
        }
        info!(grid_size = clamped.grid_size, sound = clamped.sound_enabled, "scene parameters loaded");
        clamped
    }
}

/// Fixed RNG seed for a reproducible run
pub fn seed_from_env() -> Option<u64> {
    env_override("LIFE3D_SEED")
}

/// Rule pass scheduling, `LIFE3D_ALGORITHM=serial|parallel`
pub fn algorithm_from_env() -> Algorithm {
    env_override("LIFE3D_ALGORITHM").unwrap_or_default()
}

fn env_override<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable override");
            None
        }
    }
}

//! Maps live lattice cells to renderable cube primitives.

use macroquad::color::Color;
use macroquad::math::{Vec3, vec3};

use crate::domain::{BeatPhase, Cell, Lattice};

/// World units between two stacked layers
pub const LAYER_SPACING: f32 = 1.0;

/// Vertical bob amplitude in world units
const BOB_AMPLITUDE: f32 = 0.08;

/// Tilt amplitude in radians
const TILT_AMPLITUDE: f32 = 0.15;

/// Opacity of the top layer; layer 0 is fully opaque
const TOP_LAYER_OPACITY: f32 = 0.45;

/// Per-scene look of a live cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    pub cell_size: f32,
    pub color: Color,
}

/// One drawable cube
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPrimitive {
    pub cell: Cell,
    pub position: Vec3,
    /// Euler angles in radians (x, y, z)
    pub rotation: Vec3,
    pub size: f32,
    pub color: Color,
}

/// Fixed affine map from lattice indices to world space.
/// x and y are centered on the origin; layers rise along +Y.
pub fn world_position(cell: Cell, grid_size: usize) -> Vec3 {
    let half = (grid_size as f32 - 1.0) / 2.0;
    vec3(
        cell.x as f32 - half,
        cell.layer as f32 * LAYER_SPACING,
        cell.y as f32 - half,
    )
}

/// Center of the stack, what the camera looks at
pub fn stack_center(grid_size: usize) -> Vec3 {
    vec3(0.0, (grid_size as f32 - 1.0) * LAYER_SPACING / 2.0, 0.0)
}

/// Higher layers fade out so the lower ones stay visible
pub fn layer_opacity(layer: usize, grid_size: usize) -> f32 {
    let top = grid_size.saturating_sub(1).max(1) as f32;
    1.0 - (1.0 - TOP_LAYER_OPACITY) * (layer as f32 / top).min(1.0)
}

fn primitive_for(cell: Cell, grid_size: usize, style: &CellStyle, beat: BeatPhase) -> CellPrimitive {
    let jitter = beat.jitter(cell.index_sum());
    let base = world_position(cell, grid_size);

    CellPrimitive {
        cell,
        position: base + vec3(0.0, BOB_AMPLITUDE * jitter, 0.0),
        rotation: vec3(TILT_AMPLITUDE * jitter, 2.0 * TILT_AMPLITUDE * jitter, 0.0),
        size: style.cell_size,
        color: Color::new(
            style.color.r,
            style.color.g,
            style.color.b,
            style.color.a * layer_opacity(cell.layer, grid_size),
        ),
    }
}

/// Replace every previous primitive with one per live cell.
///
/// The old set is discarded wholesale; only its allocation is kept.
/// Jitter is cosmetic and reads nothing but the beat and cell indices.
pub fn reconcile(
    old: Vec<CellPrimitive>,
    grid: &Lattice,
    style: &CellStyle,
    beat: BeatPhase,
) -> Vec<CellPrimitive> {
    let mut primitives = old;
    primitives.clear();
    primitives.extend(
        grid.iter_alive()
            .map(|cell| primitive_for(cell, grid.size(), style, beat)),
    );
    primitives
}

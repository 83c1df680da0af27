mod button;
mod dropdown;
mod slider;

pub use button::Toggle;
pub use dropdown::Dropdown;
pub use slider::Slider;

use macroquad::prelude::*;

use crate::application::SceneParams;
use crate::application::params::{
    CAMERA_DISTANCE_RANGE, CELL_SIZE_RANGE, GRID_SIZE_RANGE, PATTERN_SPEED_RANGE, ROTATION_SPEED_RANGE,
};

pub const PANEL_WIDTH: f32 = 200.0;
pub const PANEL_PADDING: f32 = 10.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// Named colors offered by both color pickers
pub const PALETTE: &[(&str, Color)] = &[
    ("Gold", GOLD),
    ("Orange", ORANGE),
    ("Crimson", RED),
    ("Lime", LIME),
    ("Sky", SKYBLUE),
    ("Blue", BLUE),
    ("Violet", VIOLET),
    ("White", WHITE),
];

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Width of the 3D scene area left of the panel
pub fn scene_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Palette index of `color`, falling back to the first entry
pub fn palette_index(color: Color) -> usize {
    PALETTE.iter().position(|&(_, c)| c == color).unwrap_or(0)
}

fn range_f32((min, max): (usize, usize)) -> (f32, f32) {
    (min as f32, max as f32)
}

/// Vertical slots for each widget, top to bottom
const SLIDER_ROWS: [f32; 5] = [30.0, 80.0, 130.0, 180.0, 230.0];
const CELL_COLOR_ROW: f32 = 290.0;
const LIGHT_COLOR_ROW: f32 = 345.0;
const SOUND_ROW: f32 = 395.0;

/// Every parameter control in the side panel
pub struct ControlPanel {
    sliders: [Slider; 5],
    cell_color: Dropdown,
    light_color: Dropdown,
    sound: Toggle,
}

impl ControlPanel {
    pub fn new(params: &SceneParams) -> Self {
        let width = PANEL_WIDTH - 2.0 * PANEL_PADDING;
        let sliders = [
            Slider::new(0.0, 0.0, width, "Grid Size", range_f32(GRID_SIZE_RANGE), 1.0, params.grid_size as f32),
            Slider::new(0.0, 0.0, width, "Cell Size", CELL_SIZE_RANGE, 0.05, params.cell_size),
            Slider::new(0.0, 0.0, width, "Rotation", ROTATION_SPEED_RANGE, 0.1, params.rotation_speed),
            Slider::new(0.0, 0.0, width, "Camera", CAMERA_DISTANCE_RANGE, 1.0, params.camera_distance),
            Slider::new(0.0, 0.0, width, "Pattern Speed", PATTERN_SPEED_RANGE, 0.1, params.pattern_speed),
        ];

        let mut cell_color = Dropdown::new(0.0, 0.0, width, "Cell Color", PALETTE.to_vec());
        cell_color.set_selected(palette_index(params.cell_color));
        let mut light_color = Dropdown::new(0.0, 0.0, width, "Light Color", PALETTE.to_vec());
        light_color.set_selected(palette_index(params.light_color));

        Self {
            sliders,
            cell_color,
            light_color,
            sound: Toggle::new(0.0, 0.0, width, BUTTON_HEIGHT, "Sound", params.sound_enabled),
        }
    }

    /// Reposition widgets against the current window width
    pub fn layout(&mut self) {
        let x = panel_x() + PANEL_PADDING;
        for (slider, y) in self.sliders.iter_mut().zip(SLIDER_ROWS) {
            slider.set_position(x, y);
        }
        self.cell_color.set_position(x, CELL_COLOR_ROW);
        self.light_color.set_position(x, LIGHT_COLOR_ROW);
        self.sound.set_position(x, SOUND_ROW);
    }

    /// True while a widget owns the mouse (open menu or active drag)
    pub fn is_capturing(&self) -> bool {
        self.cell_color.is_open() || self.light_color.is_open() || self.sliders.iter().any(Slider::is_dragging)
    }

    /// Mirror externally changed params (keyboard shortcuts)
    pub fn sync(&mut self, params: &SceneParams) {
        let values = [
            params.grid_size as f32,
            params.cell_size,
            params.rotation_speed,
            params.camera_distance,
            params.pattern_speed,
        ];
        for (slider, value) in self.sliders.iter_mut().zip(values) {
            slider.set_value(value);
        }
        self.cell_color.set_selected(palette_index(params.cell_color));
        self.light_color.set_selected(palette_index(params.light_color));
        self.sound.set_on(params.sound_enabled);
    }

    /// Handle widget input; returns the edited params when anything
    /// was committed this frame. Only committed fields change, and the
    /// result is clamped at this boundary.
    pub fn update(&mut self, params: &SceneParams, mouse_pos: (f32, f32)) -> Option<SceneParams> {
        let mut next = *params;
        let mut changed = false;

        // Only one menu open at a time; an open menu swallows clicks
        if self.cell_color.update(mouse_pos) {
            next.cell_color = self.cell_color.selected_color().unwrap_or(params.cell_color);
            changed = true;
        }
        if self.cell_color.is_open() {
            self.light_color.close();
            return changed.then(|| next.clamped());
        }

        if self.light_color.update(mouse_pos) {
            next.light_color = self.light_color.selected_color().unwrap_or(params.light_color);
            changed = true;
        }
        if self.light_color.is_open() {
            return changed.then(|| next.clamped());
        }

        for (row, slider) in self.sliders.iter_mut().enumerate() {
            if !slider.update(mouse_pos) {
                continue;
            }
            let value = slider.value();
            match row {
                0 => next.grid_size = value.round() as usize,
                1 => next.cell_size = value,
                2 => next.rotation_speed = value,
                3 => next.camera_distance = value,
                _ => next.pattern_speed = value,
            }
            changed = true;
        }

        if self.sound.update(mouse_pos) {
            next.sound_enabled = self.sound.is_on();
            changed = true;
        }

        changed.then(|| next.clamped())
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_rectangle(panel_x(), 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 235));

        self.sliders.iter().for_each(|slider| slider.draw(mouse_pos));
        self.sound.draw(mouse_pos);

        // Open dropdown last so its menu sits on top
        let (open, closed): (Vec<&Dropdown>, Vec<&Dropdown>) =
            [&self.cell_color, &self.light_color].into_iter().partition(|d| d.is_open());
        closed.into_iter().chain(open).for_each(|dropdown| dropdown.draw(mouse_pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_covers_defaults() {
        let params = SceneParams::default();
        assert_eq!(PALETTE[palette_index(params.cell_color)].1, params.cell_color);
        assert_eq!(PALETTE[palette_index(params.light_color)].1, params.light_color);
    }

    #[test]
    fn test_unknown_color_falls_back() {
        assert_eq!(palette_index(Color::new(0.1, 0.2, 0.3, 1.0)), 0);
    }

    #[test]
    fn test_panel_mirrors_params() {
        let params = SceneParams { grid_size: 21, sound_enabled: false, ..Default::default() };
        let panel = ControlPanel::new(&params);
        assert_eq!(panel.sliders[0].value(), 21.0);
        assert!(!panel.sound.is_on());
        assert!(!panel.is_capturing());
    }
}

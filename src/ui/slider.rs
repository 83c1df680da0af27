use macroquad::prelude::*;

/// Height of the clickable track
pub const TRACK_HEIGHT: f32 = 16.0;

/// Horizontal slider over a numeric range. While dragging the value
/// follows the mouse; the change is only committed on release.
#[derive(Clone)]
pub struct Slider {
    x: f32,
    y: f32,
    width: f32,
    label: String,
    min: f32,
    max: f32,
    step: f32,
    value: f32,
    drag_start: Option<f32>,
}

impl Slider {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        label: impl Into<String>,
        (min, max): (f32, f32),
        step: f32,
        value: f32,
    ) -> Self {
        let mut slider = Self {
            x,
            y,
            width,
            label: label.into(),
            min,
            max,
            step,
            value: min,
            drag_start: None,
        };
        slider.set_value(value);
        slider
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, snapped to the step grid (ignored while dragging)
    pub fn set_value(&mut self, value: f32) {
        if self.drag_start.is_none() {
            self.value = self.snap(value);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Update position for responsive layout
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn snap(&self, value: f32) -> f32 {
        let clamped = if value.is_finite() { value.clamp(self.min, self.max) } else { self.min };
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    /// Value under a mouse x coordinate
    pub fn value_at(&self, mouse_x: f32) -> f32 {
        let t = ((mouse_x - self.x) / self.width).clamp(0.0, 1.0);
        self.snap(self.min + t * (self.max - self.min))
    }

    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + TRACK_HEIGHT
    }

    /// Handle dragging; returns true when a drag ends on a new value
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        if self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left) {
            self.drag_start = Some(self.value);
        }

        let Some(start) = self.drag_start else {
            return false;
        };
        self.value = self.value_at(mouse_pos.0);

        if is_mouse_button_released(MouseButton::Left) || !is_mouse_button_down(MouseButton::Left) {
            self.drag_start = None;
            return self.value != start;
        }
        false
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let text = if self.step >= 1.0 {
            format!("{}: {:.0}", self.label, self.value)
        } else {
            format!("{}: {:.2}", self.label, self.value)
        };
        draw_text(&text, self.x, self.y - 5.0, 14.0, GRAY);

        let track_y = self.y + TRACK_HEIGHT / 2.0;
        draw_line(self.x, track_y, self.x + self.width, track_y, 3.0, Color::from_rgba(80, 80, 80, 255));

        let t = if self.max > self.min { (self.value - self.min) / (self.max - self.min) } else { 0.0 };
        let knob_x = self.x + t * self.width;
        draw_line(self.x, track_y, knob_x, track_y, 3.0, Color::from_rgba(70, 130, 180, 255));

        let knob_color = if self.is_dragging() || self.is_hovered(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_circle(knob_x, track_y, 7.0, knob_color);
        draw_circle_lines(knob_x, track_y, 7.0, 1.5, WHITE);
    }
}

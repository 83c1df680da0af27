use macroquad::prelude::*;

/// On/off button with hover and click detection
#[derive(Clone)]
pub struct Toggle {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    label: String,
    on: bool,
}

impl Toggle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, label: impl Into<String>, on: bool) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label: label.into(),
            on,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Check if mouse is hovering over the button
    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + self.height
    }

    /// Flip on click; returns true if the state changed this frame
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        if self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left) {
            self.on = !self.on;
            return true;
        }
        false
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let color = match (self.on, self.is_hovered(mouse_pos)) {
            (true, false) => Color::from_rgba(60, 150, 90, 255),
            (true, true) => Color::from_rgba(90, 190, 120, 255),
            (false, false) => Color::from_rgba(90, 90, 90, 255),
            (false, true) => Color::from_rgba(120, 120, 120, 255),
        };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        let text = format!("{}: {}", self.label, if self.on { "On" } else { "Off" });
        let text_size = measure_text(&text, None, 20, 1.0);
        draw_text(
            &text,
            self.x + (self.width - text_size.width) / 2.0,
            self.y + (self.height + text_size.height) / 2.0,
            20.0,
            WHITE,
        );
    }
}

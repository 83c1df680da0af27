use macroquad::prelude::*;

/// Dropdown selector over named colors
#[derive(Clone)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    items: Vec<(&'static str, Color)>,
    selected: usize,
    is_open: bool,
    label: String,
}

impl Dropdown {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        label: impl Into<String>,
        items: Vec<(&'static str, Color)>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height: 30.0,
            items,
            selected: 0,
            is_open: false,
            label: label.into(),
        }
    }

    /// Color of the selected item
    pub fn selected_color(&self) -> Option<Color> {
        self.items.get(self.selected).map(|&(_, color)| color)
    }

    /// Set selected index
    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Update position for responsive layout
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Draw without handling interaction
    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(&self.label, self.x, self.y - 5.0, 14.0, GRAY);

        let button_color = if self.is_hovered_main(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_rectangle(self.x, self.y, self.width, self.height, button_color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        if let Some(&(name, color)) = self.items.get(self.selected) {
            self.draw_item_face(name, color, self.y);
        }
        draw_text("v", self.x + self.width - 16.0, self.y + 20.0, 16.0, WHITE);

        if !self.is_open {
            return;
        }

        let menu_height = self.items.len() as f32 * self.height;
        draw_rectangle(
            self.x,
            self.y + self.height,
            self.width,
            menu_height,
            Color::from_rgba(30, 30, 30, 255),
        );

        for (i, &(name, color)) in self.items.iter().enumerate() {
            let item_y = self.item_y(i);
            let item_color = if self.is_hovered_item(mouse_pos, i) {
                Color::from_rgba(100, 149, 237, 255)
            } else if i == self.selected {
                Color::from_rgba(50, 100, 150, 255)
            } else {
                Color::from_rgba(45, 45, 45, 255)
            };
            draw_rectangle(self.x, item_y, self.width, self.height, item_color);
            draw_rectangle_lines(self.x, item_y, self.width, self.height, 1.0, Color::from_rgba(80, 80, 80, 255));
            self.draw_item_face(name, color, item_y);
        }

        draw_rectangle_lines(self.x, self.y + self.height, self.width, menu_height, 2.0, WHITE);
    }

    /// Swatch plus name
    fn draw_item_face(&self, name: &str, color: Color, y: f32) {
        draw_rectangle(self.x + 6.0, y + 7.0, 16.0, 16.0, color);
        draw_rectangle_lines(self.x + 6.0, y + 7.0, 16.0, 16.0, 1.0, WHITE);
        draw_text(name, self.x + 30.0, y + 21.0, 16.0, WHITE);
    }

    /// Handle interaction and return true if selection changed
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        if !is_mouse_button_pressed(MouseButton::Left) {
            return false;
        }

        if self.is_hovered_main(mouse_pos) {
            self.is_open = !self.is_open;
            return false; // Opening/closing is not a selection change
        }

        if !self.is_open {
            return false;
        }

        self.is_open = false;
        match self.item_at(mouse_pos) {
            Some(i) if i != self.selected => {
                self.selected = i;
                true
            }
            _ => false,
        }
    }

    fn item_y(&self, index: usize) -> f32 {
        self.y + self.height + index as f32 * self.height
    }

    fn is_hovered_main(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + self.height
    }

    fn is_hovered_item(&self, mouse_pos: (f32, f32), index: usize) -> bool {
        let item_y = self.item_y(index);
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= item_y
            && mouse_pos.1 < item_y + self.height
    }

    /// Menu item under the mouse, only meaningful while open
    pub fn item_at(&self, mouse_pos: (f32, f32)) -> Option<usize> {
        (0..self.items.len()).find(|&i| self.is_hovered_item(mouse_pos, i))
    }
}

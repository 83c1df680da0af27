use macroquad::prelude::*;
use tracing::warn;

use crate::application::App;
use crate::ui::{ControlPanel, scene_area_width};

/// Primary click on the scene area toggles pause.
/// Clicks on the panel, or while a widget owns the mouse, are ignored.
pub fn handle_scene_click(app: &mut App, panel_was_capturing: bool, mouse_pos: (f32, f32)) {
    if panel_was_capturing || mouse_pos.0 >= scene_area_width() {
        return;
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        app.toggle_pause();
    }
}

/// Keyboard shortcuts. Keeps the panel in sync when params change.
pub fn process_keyboard_input(app: &mut App, panel: &mut ControlPanel) {
    type KeyAction = (KeyCode, fn(&mut App));

    let actions: [KeyAction; 6] = [
        (KeyCode::Space, App::toggle_pause),
        (KeyCode::R, App::reseed),
        (KeyCode::G, App::drop_pattern),
        (KeyCode::P, App::cycle_pattern),
        (KeyCode::A, App::cycle_algorithm),
        (KeyCode::H, |app| app.camera.reset()),
    ];

    actions
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .for_each(|(_, action)| action(app));

    if is_key_pressed(KeyCode::M) {
        match app.toggle_sound() {
            Ok(_) => panel.sync(&app.params),
            Err(err) => warn!(%err, "sound toggle rejected"),
        }
    }
}

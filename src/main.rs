use macroquad::prelude::*;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use layered_life::{
    App, SceneParams, Voice,
    application::{algorithm_from_env, params::GRID_SIZE_RANGE, seed_from_env},
    input, rendering,
    presentation::{SilentSink, ToneBank},
    ui::ControlPanel,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Layered Life - 3D Game of Life".to_owned(),
        window_width: 1200,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

/// Tone bank for the tallest lattice, or a silent voice if audio is unavailable
async fn load_voice(params: &SceneParams) -> Voice {
    match ToneBank::load(GRID_SIZE_RANGE.1).await {
        Ok(bank) => Voice::new(Box::new(bank), params.sound_enabled),
        Err(err) => {
            warn!(%err, "audio unavailable, continuing without sound");
            Voice::new(Box::new(SilentSink), false)
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let params = SceneParams::from_env();
    let voice = load_voice(&params).await;

    let mut app = match App::new(params, voice, seed_from_env()) {
        Ok(app) => app.with_algorithm(algorithm_from_env()),
        Err(err) => {
            error!(%err, "invalid scene parameters");
            return;
        }
    };
    let mut panel = ControlPanel::new(&app.params);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let mouse_pos = mouse_position();
        panel.layout();

        // Panel first so a click on it never reaches the scene
        let panel_was_capturing = panel.is_capturing();
        if let Some(next) = panel.update(&app.params, mouse_pos) {
            if let Err(err) = app.reconfigure(next) {
                warn!(%err, "parameter change rejected");
                panel.sync(&app.params);
            }
        }
        input::handle_scene_click(&mut app, panel_was_capturing || panel.is_capturing(), mouse_pos);
        input::process_keyboard_input(&mut app, &mut panel);

        app.frame(get_frame_time());

        clear_background(Color::from_rgba(8, 8, 16, 255));
        rendering::draw_scene(&app);
        rendering::draw_hud(&app, &panel, mouse_pos);

        next_frame().await;
    }

    app.teardown();
}

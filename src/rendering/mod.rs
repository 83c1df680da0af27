use macroquad::prelude::*;
use macroquad::window::get_internal_gl;

use crate::application::App;
use crate::presentation::primitives::stack_center;
use crate::presentation::{CellPrimitive, PointLight};
use crate::ui::{ControlPanel, scene_area_width};

/// History traces are drawn smaller than live cells
const TRACE_SCALE: f32 = 0.45;

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Translation plus tilt of a live cube
fn model_matrix(primitive: &CellPrimitive) -> Mat4 {
    let r = primitive.rotation;
    Mat4::from_translation(primitive.position) * Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
}

/// Cube at the origin; the caller pushes its model matrix
fn draw_cell(primitive: &CellPrimitive, light: &PointLight) {
    let color = light.shade(primitive.color, primitive.position);
    let edge = Color::new(color.r * 0.5, color.g * 0.5, color.b * 0.5, color.a);
    let size = Vec3::splat(primitive.size);

    draw_cube(Vec3::ZERO, size, None, color);
    draw_cube_wires(Vec3::ZERO, size, edge);
}

/// Draw the lattice stack, history traces and light from the orbit camera
pub fn draw_scene(app: &App) {
    let size = app.session.grid.size();
    let center = stack_center(size);

    set_camera(&Camera3D {
        position: app.camera.eye(center),
        target: center,
        up: vec3(0.0, 1.0, 0.0),
        fovy: 45f32.to_radians(),
        ..Default::default()
    });

    draw_grid(size as u32 + 2, 1.0, Color::from_rgba(60, 60, 60, 255), Color::from_rgba(35, 35, 35, 255));

    let scene = &app.scene;
    let trace_size = Vec3::splat(scene.style.cell_size * TRACE_SCALE);
    for trace in scene.history.iter() {
        let alpha = scene.history.opacity(trace, app.session.generation);
        if alpha <= 0.0 {
            continue;
        }
        let base = Color::new(scene.style.color.r, scene.style.color.g, scene.style.color.b, alpha);
        draw_cube(trace.position, trace_size, None, scene.light.shade(base, trace.position));
    }

    let gl = unsafe { get_internal_gl() }.quad_gl;
    for primitive in &scene.live {
        gl.push_model_matrix(model_matrix(primitive));
        draw_cell(primitive, &scene.light);
        gl.pop_model_matrix();
    }

    let light = &scene.light;
    draw_sphere(light.position, 0.3 * light.intensity, None, light.color);

    set_default_camera();
}

fn draw_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Stats overlay plus the control panel
pub fn draw_hud(app: &App, panel: &ControlPanel, mouse_pos: (f32, f32)) {
    let session = &app.session;
    let grid = &session.grid;

    let lines = [
        (format!("Generation: {}", session.generation), WHITE),
        (format!("Population: {}", format_number(grid.population())), Color::from_rgba(0, 255, 150, 255)),
        (format!("Births: {}", format_number(session.last_births)), Color::from_rgba(255, 200, 80, 255)),
        (format!("Frontier: {}/{}", session.current_layer, grid.top_layer()), GRAY),
        (format!("Traces: {}", format_number(app.scene.history.len())), GRAY),
        (format!("Step: {:.2}ms | FPS: {}", session.last_step_time_ms, get_fps()), GRAY),
        (format!("Algorithm: {} ({})", app.algorithm.name(), app.algorithm.description()), GRAY),
        (format!("Pattern: {} - {}", app.selected_pattern().name, app.selected_pattern().description), GRAY),
        ("A algorithm | P pattern | G drop | R reseed".to_owned(), DARKGRAY),
    ];
    for (row, (text, color)) in lines.iter().enumerate() {
        draw_label(text, 12.0, 24.0 + row as f32 * 18.0, 18.0, *color);
    }

    // Per-layer population bars, bottom layer at the bottom
    let populations = grid.layer_populations();
    let plane = (grid.size() * grid.size()) as f32;
    let base_y = screen_height() - 16.0;
    for (layer, &count) in populations.iter().enumerate() {
        let y = base_y - layer as f32 * 6.0;
        let width = 80.0 * count as f32 / plane;
        let color = if layer <= session.current_layer { app.scene.style.color } else { DARKGRAY };
        draw_rectangle(12.0, y, width.max(1.0), 4.0, color);
    }

    let status = if session.is_paused { ("Paused - click to resume", ORANGE) } else { ("Running", GREEN) };
    let status_width = measure_text(status.0, None, 20, 1.0).width;
    draw_label(status.0, (scene_area_width() - status_width) / 2.0, screen_height() - 20.0, 20.0, status.1);

    panel.draw(mouse_pos);
}

//! Headless runs of the whole app: session, scene and voice together.

use std::cell::RefCell;
use std::rc::Rc;

use layered_life::application::{LAYER_SHIFT_INTERVAL, ParamError, Reconfigure, STEP_INTERVAL};
use layered_life::domain::Algorithm;
use layered_life::presentation::ToneSink;
use layered_life::{App, SceneParams, Voice};

#[derive(Clone, Default)]
struct Recording(Rc<RefCell<Vec<String>>>);

impl Recording {
    fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    fn plays(&self) -> usize {
        self.0.borrow().iter().filter(|e| e.starts_with("play")).count()
    }
}

impl ToneSink for Recording {
    fn play(&mut self, layer: usize) {
        self.0.borrow_mut().push(format!("play {layer}"));
    }

    fn stop(&mut self) {
        self.0.borrow_mut().push("stop".into());
    }

    fn close(&mut self) {
        self.0.borrow_mut().push("close".into());
    }
}

fn app_with(params: SceneParams, seed: u64) -> (App, Recording) {
    let recording = Recording::default();
    let voice = Voice::new(Box::new(recording.clone()), params.sound_enabled);
    let app = App::new(params, voice, Some(seed)).expect("valid params");
    (app, recording)
}

fn small() -> SceneParams {
    SceneParams {
        grid_size: 10,
        ..Default::default()
    }
}

#[test]
fn steps_are_throttled_to_the_interval() {
    let (mut app, _) = app_with(small(), 1);
    let dt = STEP_INTERVAL / 2.5;

    assert!(app.frame(dt).is_none());
    assert!(app.frame(dt).is_none());
    let report = app.frame(dt).expect("interval reached");
    assert_eq!(report.generation, 1);
    assert_eq!(app.session.generation, 1);
}

#[test]
fn pause_freezes_simulation_and_camera() {
    let (mut app, _) = app_with(small(), 2);
    app.frame(STEP_INTERVAL);
    app.toggle_pause();

    let generation = app.session.generation;
    let angle = app.camera.angle;
    let light = app.scene.light.position;
    for _ in 0..20 {
        assert!(app.frame(STEP_INTERVAL).is_none());
    }
    assert_eq!(app.session.generation, generation);
    assert_eq!(app.camera.angle, angle);
    assert_eq!(app.scene.light.position, light);

    app.toggle_pause();
    assert!(app.frame(STEP_INTERVAL).is_some());
}

#[test]
fn layers_shift_every_interval() {
    let (mut app, _) = app_with(small(), 3);

    for generation in 1..=LAYER_SHIFT_INTERVAL * 3 {
        let report = app.frame(STEP_INTERVAL).expect("one step per interval");
        assert_eq!(report.generation, generation);
        assert_eq!(report.shifted, generation % LAYER_SHIFT_INTERVAL == 0);
    }
    assert_eq!(app.session.current_layer, 3);
}

#[test]
fn live_primitives_track_the_lattice() {
    let (mut app, _) = app_with(small(), 4);
    for _ in 0..25 {
        app.frame(STEP_INTERVAL);
        assert_eq!(app.scene.live.len(), app.session.grid.population());
    }
}

#[test]
fn one_tone_per_generation_with_births() {
    let (mut app, recording) = app_with(small(), 5);

    let mut expected = 0;
    for _ in 0..40 {
        if let Some(report) = app.frame(STEP_INTERVAL) {
            if let Some(last) = report.births.last() {
                expected += 1;
                assert_eq!(app.scene.voice.last_layer(), Some(last.layer));
            }
        }
    }
    assert!(expected > 0);
    assert_eq!(recording.plays(), expected);
}

#[test]
fn sound_off_plays_nothing() {
    let params = SceneParams {
        sound_enabled: false,
        ..small()
    };
    let (mut app, recording) = app_with(params, 6);
    for _ in 0..40 {
        app.frame(STEP_INTERVAL);
    }
    assert_eq!(recording.plays(), 0);
}

#[test]
fn toggling_sound_off_cuts_the_voice() {
    let (mut app, recording) = app_with(small(), 7);
    for _ in 0..10 {
        app.frame(STEP_INTERVAL);
    }

    assert_eq!(app.toggle_sound(), Ok(Reconfigure::InPlace));
    assert!(!app.params.sound_enabled);
    assert_eq!(recording.events().last().map(String::as_str), Some("stop"));

    let plays = recording.plays();
    for _ in 0..10 {
        app.frame(STEP_INTERVAL);
    }
    assert_eq!(recording.plays(), plays);
}

#[test]
fn structural_change_rebuilds_from_scratch() {
    let (mut app, _) = app_with(small(), 8);
    for _ in 0..15 {
        app.frame(STEP_INTERVAL);
    }
    assert!(!app.scene.history.is_empty());

    let next = SceneParams {
        grid_size: 20,
        ..app.params
    };
    assert_eq!(app.reconfigure(next), Ok(Reconfigure::Rebuild));
    assert_eq!(app.session.generation, 0);
    assert_eq!(app.session.current_layer, 0);
    assert_eq!(app.session.grid.size(), 20);
    assert_eq!(app.scene.grid_size(), 20);
    assert!(app.scene.history.is_empty());
    assert_eq!(app.scene.live.len(), app.session.grid.population());
}

#[test]
fn cosmetic_change_keeps_the_run() {
    let (mut app, _) = app_with(small(), 9);
    for _ in 0..12 {
        app.frame(STEP_INTERVAL);
    }
    let grid = app.session.grid.clone();

    let next = SceneParams {
        pattern_speed: 3.0,
        camera_distance: 50.0,
        ..app.params
    };
    assert_eq!(app.reconfigure(next), Ok(Reconfigure::InPlace));
    assert_eq!(app.session.generation, 12);
    assert_eq!(app.session.grid, grid);
    assert_eq!(app.session.pattern_speed, 3.0);
    assert_eq!(app.camera.distance, 50.0);

    assert_eq!(app.reconfigure(next), Ok(Reconfigure::Unchanged));
}

#[test]
fn out_of_range_params_are_rejected() {
    let (mut app, _) = app_with(small(), 10);
    let before = app.params;

    let result = app.reconfigure(SceneParams {
        grid_size: 5,
        ..before
    });
    assert!(matches!(result, Err(ParamError::OutOfRange { .. })));
    assert_eq!(app.params, before);

    let too_big = SceneParams {
        grid_size: 40,
        ..Default::default()
    };
    assert!(App::new(too_big, Voice::silent(), None).is_err());
}

#[test]
fn same_seed_same_run() {
    let (mut a, _) = app_with(small(), 11);
    let (mut b, _) = app_with(small(), 11);
    for _ in 0..35 {
        assert_eq!(a.frame(STEP_INTERVAL), b.frame(STEP_INTERVAL));
    }
    assert_eq!(a.session.grid, b.session.grid);
}

#[test]
fn teardown_releases_scene_and_audio_once() {
    let (mut app, recording) = app_with(small(), 12);
    for _ in 0..15 {
        app.frame(STEP_INTERVAL);
    }

    app.teardown();
    assert!(app.scene.live.is_empty());
    assert!(app.scene.history.is_empty());
    assert!(!app.scene.voice.is_enabled());

    app.teardown();
    drop(app);
    let closes = recording.events().iter().filter(|e| *e == "close").count();
    assert_eq!(closes, 1);
}

#[test]
fn algorithm_choice_survives_rebuild() {
    let (app, _) = app_with(small(), 13);
    let mut app = app.with_algorithm(Algorithm::Parallel);
    assert_eq!(app.session.stepper.algorithm, Algorithm::Parallel);

    let next = SceneParams {
        grid_size: 15,
        ..app.params
    };
    assert_eq!(app.reconfigure(next), Ok(Reconfigure::Rebuild));
    assert_eq!(app.session.stepper.algorithm, Algorithm::Parallel);

    app.cycle_algorithm();
    assert_eq!(app.algorithm, Algorithm::Serial);
    assert_eq!(app.session.stepper.algorithm, Algorithm::Serial);
}

#[test]
fn parallel_app_matches_serial_app() {
    let (mut serial, _) = app_with(small(), 14);
    let (parallel, _) = app_with(small(), 14);
    let mut parallel = parallel.with_algorithm(Algorithm::Parallel);
    for _ in 0..30 {
        assert_eq!(serial.frame(STEP_INTERVAL), parallel.frame(STEP_INTERVAL));
    }
}

#[test]
fn dropping_patterns_cycles_presets() {
    let (mut app, _) = app_with(small(), 15);
    assert_eq!(app.selected_pattern().name, "Glider");

    let before = app.session.grid.layer_population(0);
    app.drop_pattern();
    assert!(app.session.grid.layer_population(0) >= before);
    assert_eq!(app.scene.live.len(), app.session.grid.population());

    let first = app.selected_pattern().name;
    app.cycle_pattern();
    assert_ne!(app.selected_pattern().name, first);
}

use delve_app::app_loop::{AppMode, AppState, FrameInput};
use delve_app::camera::ScreenSize;
use delve_core::{GenerationConfig, MovementMode, Pos, SimConfig, Simulation, Visibility, WorldPos};
use macroquad::prelude::KeyCode;

const SCREEN: ScreenSize = ScreenSize { width: 800.0, height: 600.0 };

fn quiet_config() -> SimConfig {
    SimConfig {
        enemies_base: 0,
        enemies_per_level: 0,
        decorations_per_level: 0,
        item_caches_per_level: 0,
        generation: GenerationConfig {
            wall_fill_percent: 0,
            smoothing_passes: 0,
            ..GenerationConfig::default()
        },
        ..SimConfig::default()
    }
}

fn keys(keys: &[KeyCode]) -> FrameInput {
    FrameInput { keys_pressed: keys.to_vec(), ..FrameInput::default() }
}

fn click_on(app: &AppState, sim: &Simulation, pos: Pos) -> FrameInput {
    let pitch = sim.config().tile_pitch;
    let (x, y) = app.camera.world_to_screen(WorldPos::from_grid(pos, pitch));
    FrameInput { clicked_at: Some((x + pitch / 2.0, y + pitch / 2.0)), ..FrameInput::default() }
}

#[test]
fn space_toggles_auto_play_and_i_toggles_inventory() {
    let mut sim = Simulation::new(12345, quiet_config()).expect("level builds");
    let mut app = AppState::new(sim.config().tile_pitch);
    assert_eq!(app.mode, AppMode::Paused);

    app.tick(&mut sim, &keys(&[KeyCode::Space]), SCREEN);
    assert_eq!(app.mode, AppMode::AutoPlay);
    app.tick(&mut sim, &keys(&[KeyCode::Space, KeyCode::I]), SCREEN);
    assert_eq!(app.mode, AppMode::Paused);
    assert!(app.inventory_visible);

    app.tick(&mut sim, &keys(&[KeyCode::I]), SCREEN);
    assert!(!app.inventory_visible);
}

#[test]
fn right_steps_exactly_one_turn_while_paused() {
    let mut sim = Simulation::new(7, quiet_config()).expect("level builds");
    let mut app = AppState::new(sim.config().tile_pitch);

    app.tick(&mut sim, &keys(&[KeyCode::Right]), SCREEN);
    assert_eq!(sim.turn(), 1);
    app.tick(&mut sim, &FrameInput::default(), SCREEN);
    assert_eq!(sim.turn(), 1, "paused app must not advance on its own");
}

#[test]
fn auto_play_runs_one_turn_per_tick_interval() {
    let mut sim = Simulation::new(99, quiet_config()).expect("level builds");
    let mut app = AppState::new(sim.config().tile_pitch);
    app.tick(&mut sim, &keys(&[KeyCode::Space]), SCREEN);
    assert_eq!(sim.turn(), 0);

    let interval = sim.tick_interval_ms();
    let frame = FrameInput { elapsed_ms: interval - 1, ..FrameInput::default() };
    app.tick(&mut sim, &frame, SCREEN);
    assert_eq!(sim.turn(), 0);
    let frame = FrameInput { elapsed_ms: 1, ..FrameInput::default() };
    app.tick(&mut sim, &frame, SCREEN);
    assert_eq!(sim.turn(), 1);
}

#[test]
fn camera_follows_the_player() {
    let mut sim = Simulation::new(3, quiet_config()).expect("level builds");
    let mut app = AppState::new(sim.config().tile_pitch);
    app.tick(&mut sim, &FrameInput::default(), SCREEN);

    let pitch = sim.config().tile_pitch;
    let (x, y) = app.camera.world_to_screen(sim.player().header.sprite.position);
    assert_eq!((x + pitch / 2.0, y + pitch / 2.0), (SCREEN.width / 2.0, SCREEN.height / 2.0));
}

#[test]
fn manual_click_moves_the_player_to_the_clicked_floor() {
    let mut sim = Simulation::new(21, quiet_config()).expect("level builds");
    let mut app = AppState::new(sim.config().tile_pitch);
    app.tick(&mut sim, &keys(&[KeyCode::M]), SCREEN);
    assert_eq!(sim.movement_mode(), MovementMode::Manual);

    let start = sim.player().pos();
    let target = start
        .neighbors()
        .into_iter()
        .find(|&pos| sim.board().is_walkable(pos) && Some(pos) != sim.board().exit_pos())
        .expect("open room leaves a floor neighbour");

    let click = click_on(&app, &sim, target);
    app.tick(&mut sim, &click, SCREEN);

    assert_eq!(sim.turn(), 1);
    assert_eq!(sim.player().pos(), target);
    assert_eq!(sim.board().visibility(target), Visibility::Visible);
    assert_eq!(app.notice, None);
}

#[test]
fn invalid_clicks_are_ignored() {
    let mut sim = Simulation::new(21, quiet_config()).expect("level builds");
    let mut app = AppState::new(sim.config().tile_pitch);
    app.tick(&mut sim, &keys(&[KeyCode::M]), SCREEN);
    let start = sim.player().pos();

    let wall = Pos { y: 0, x: 0 };
    assert!(!sim.board().is_walkable(wall));
    let click = click_on(&app, &sim, wall);
    app.tick(&mut sim, &click, SCREEN);

    let outside = Pos { y: -3, x: -3 };
    let click = click_on(&app, &sim, outside);
    app.tick(&mut sim, &click, SCREEN);

    assert_eq!(sim.turn(), 0);
    assert_eq!(sim.player().pos(), start);
    assert_eq!(app.mode, AppMode::Paused);
}

#[test]
fn clicks_do_nothing_in_auto_mode() {
    let mut sim = Simulation::new(21, quiet_config()).expect("level builds");
    let mut app = AppState::new(sim.config().tile_pitch);
    app.tick(&mut sim, &FrameInput::default(), SCREEN);
    let start = sim.player().pos();
    let target = start.neighbors()[0];

    let click = click_on(&app, &sim, target);
    app.tick(&mut sim, &click, SCREEN);

    assert_eq!(sim.player().pos(), start);
    assert_eq!(sim.turn(), 0);
}

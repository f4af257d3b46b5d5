mod frame_input;
mod render;
mod window_config;

use std::env;

use delve_app::app_loop::AppState;
use delve_app::camera::ScreenSize;
use delve_app::launch::{generate_runtime_seed, parse_launch_args};
use delve_app::APP_NAME;
use delve_core::{SimConfig, Simulation};
use macroquad::prelude::{next_frame, screen_height, screen_width};
use macroquad::window::Conf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn start_simulation() -> Result<Simulation, String> {
    let args: Vec<String> = env::args().collect();
    let options = parse_launch_args(&args, generate_runtime_seed())?;
    let config = match &options.config_path {
        Some(path) => SimConfig::load(path).map_err(|err| err.to_string())?,
        None => SimConfig::default(),
    };
    let seed = options.seed.value();
    info!(seed, choice = ?options.seed, "starting {APP_NAME}");
    Simulation::new(seed, config).map_err(|err| err.to_string())
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    let mut sim = match start_simulation() {
        Ok(sim) => sim,
        Err(message) => {
            error!(%message, "failed to start");
            return;
        }
    };
    let mut app = AppState::new(sim.config().tile_pitch);

    loop {
        let input = frame_input::capture_frame_input();
        let screen = ScreenSize { width: screen_width(), height: screen_height() };
        app.tick(&mut sim, &input, screen);
        render::draw_frame(&sim, &app);
        next_frame().await
    }
}

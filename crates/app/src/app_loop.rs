use delve_core::{AdvanceStopReason, MovementMode, Pos, RunOutcome, SimError, Simulation};
use macroquad::prelude::KeyCode;
use tracing::{error, info, warn};

use crate::camera::{Camera, ScreenSize};

#[derive(Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Paused,
    AutoPlay,
    Finished(RunOutcome),
}

/// Everything the app needs from one rendered frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    /// Screen coordinates of a left click, if any.
    pub clicked_at: Option<(f32, f32)>,
    pub elapsed_ms: u64,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub mode: AppMode,
    pub inventory_visible: bool,
    pub camera: Camera,
    /// Last core failure, shown in the status line until the next successful action.
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(tile_pitch: f32) -> Self {
        Self { camera: Camera::new(tile_pitch), ..Self::default() }
    }

    /// Process input and logic for a single frame.
    pub fn tick(&mut self, sim: &mut Simulation, input: &FrameInput, screen: ScreenSize) {
        let pressed = |key| input.keys_pressed.contains(&key);

        if pressed(KeyCode::I) {
            self.inventory_visible = !self.inventory_visible;
        }

        match self.mode {
            AppMode::Paused | AppMode::AutoPlay => {
                if pressed(KeyCode::Space) {
                    self.mode = match self.mode {
                        AppMode::Paused => AppMode::AutoPlay,
                        _ => AppMode::Paused,
                    };
                }
                if pressed(KeyCode::M) {
                    let next = match sim.movement_mode() {
                        MovementMode::Auto => MovementMode::Manual,
                        MovementMode::Manual => MovementMode::Auto,
                    };
                    sim.set_movement_mode(next);
                    info!(mode = ?next, "movement mode changed");
                }
                if pressed(KeyCode::Right)
                    && self.mode == AppMode::Paused
                    && sim.movement_mode() == MovementMode::Auto
                {
                    let result = sim.run_turn();
                    self.record_failure(result);
                }
            }
            AppMode::Finished(_) => {}
        }

        if self.mode == AppMode::AutoPlay {
            match sim.advance(input.elapsed_ms) {
                Ok(result) => self.apply_stop_reason(result.stop_reason),
                Err(err) => {
                    error!(%err, "advance failed");
                    self.notice = Some(err.to_string());
                    self.mode = AppMode::Paused;
                }
            }
        }

        if let Some((x, y)) = input.clicked_at
            && sim.movement_mode() == MovementMode::Manual
            && !matches!(self.mode, AppMode::Finished(_))
        {
            let target = self.camera.screen_to_tile(x, y);
            self.click(sim, target);
        }

        if let Some(outcome) = sim.outcome() {
            self.mode = AppMode::Finished(outcome);
        }
        self.camera.center_on(sim.player().header.sprite.position, screen);
    }

    pub fn apply_stop_reason(&mut self, stop_reason: AdvanceStopReason) {
        match stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                self.mode = AppMode::Finished(outcome);
            }
            AdvanceStopReason::AwaitingTick { .. } | AdvanceStopReason::AwaitingInput => {
                // Keep ticking on the next frame
            }
        }
    }

    fn click(&mut self, sim: &mut Simulation, target: Pos) {
        match sim.click_tile(target) {
            Ok(_) => self.notice = None,
            Err(SimError::InvalidManualMove { pos }) => {
                warn!(?pos, "ignored click on a cell the player cannot walk to");
            }
            Err(err) => self.record_failure::<()>(Err(err)),
        }
    }

    fn record_failure<T>(&mut self, result: Result<T, SimError>) {
        match result {
            Ok(_) => self.notice = None,
            Err(err) => {
                error!(%err, "turn failed");
                self.notice = Some(err.to_string());
            }
        }
    }
}

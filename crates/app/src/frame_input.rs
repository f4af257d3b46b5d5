//! Keyboard and mouse input collection for one rendered frame.

use delve_app::app_loop::FrameInput;
use macroquad::prelude::{
    KeyCode, MouseButton, get_frame_time, is_key_pressed, is_mouse_button_pressed, mouse_position,
};

const ACTION_KEYS: [KeyCode; 4] = [KeyCode::Space, KeyCode::Right, KeyCode::I, KeyCode::M];

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed = ACTION_KEYS.into_iter().filter(|&key| is_key_pressed(key)).collect();
    let clicked_at = is_mouse_button_pressed(MouseButton::Left).then(mouse_position);
    let elapsed_ms = (get_frame_time() * 1000.0).round() as u64;

    FrameInput { keys_pressed, clicked_at, elapsed_ms }
}

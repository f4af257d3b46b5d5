//! Immediate-mode drawing of the board, entities, and text overlays.

use delve_app::app_loop::{AppMode, AppState};
use delve_app::ui_text::{
    event_log_line, finished_recap_lines, hud_lines, inventory_lines, status_text,
};
use delve_core::{Simulation, Sprite, Texture, Visibility};
use macroquad::prelude::{
    BLACK, Color, DARKGRAY, LIGHTGRAY, WHITE, clear_background, draw_rectangle, draw_text,
    screen_height, screen_width,
};

const FONT_SIZE: f32 = 22.0;
const LINE_HEIGHT: f32 = 24.0;
const EVENT_LOG_LINES: usize = 6;
const REMEMBERED_DIM: f32 = 0.45;

fn texture_color(texture: Texture) -> Color {
    match texture {
        Texture::Floor => Color::from_rgba(70, 62, 54, 255),
        Texture::Wall => Color::from_rgba(120, 110, 96, 255),
        Texture::Exit => Color::from_rgba(60, 140, 220, 255),
        Texture::Player => Color::from_rgba(240, 200, 60, 255),
        Texture::Skeleton => Color::from_rgba(220, 220, 210, 255),
        Texture::Chest => Color::from_rgba(180, 110, 40, 255),
        Texture::Bones => Color::from_rgba(150, 140, 130, 255),
    }
}

fn dimmed(color: Color) -> Color {
    Color::new(color.r * REMEMBERED_DIM, color.g * REMEMBERED_DIM, color.b * REMEMBERED_DIM, 1.0)
}

pub fn draw_frame(sim: &Simulation, app: &AppState) {
    clear_background(BLACK);
    draw_board(sim, app);
    draw_overlays(sim, app);
}

fn draw_board(sim: &Simulation, app: &AppState) {
    let pitch = sim.config().tile_pitch;
    for cell in sim.board().cells() {
        let Some(sprite) = cell.sprite.filter(|sprite| sprite.visible) else {
            continue;
        };
        let color = texture_color(sprite.texture);
        let color = if cell.visibility == Visibility::Remembered { dimmed(color) } else { color };
        draw_sprite(app, sprite, pitch, color);
    }

    for (_, entity) in sim.world().entities() {
        let sprite = entity.header().sprite;
        if sprite.visible {
            draw_sprite(app, sprite, pitch * 0.7, texture_color(sprite.texture));
        }
    }
    let player = sim.player().header.sprite;
    draw_sprite(app, player, pitch * 0.7, texture_color(player.texture));
}

fn draw_sprite(app: &AppState, sprite: Sprite, size: f32, color: Color) {
    let (x, y) = app.camera.world_to_screen(sprite.position);
    let inset = (app.camera.tile_pitch - size) / 2.0;
    draw_rectangle(x + inset, y + inset, size, size, color);
}

fn draw_overlays(sim: &Simulation, app: &AppState) {
    let mut y = LINE_HEIGHT;
    let status = match &app.notice {
        Some(notice) => format!("{}  [{notice}]", status_text(&app.mode, sim.movement_mode())),
        None => status_text(&app.mode, sim.movement_mode()),
    };
    draw_text(&status, 12.0, y, FONT_SIZE, WHITE);
    for line in hud_lines(sim) {
        y += LINE_HEIGHT;
        draw_text(&line, 12.0, y, FONT_SIZE, LIGHTGRAY);
    }

    let log = sim.log();
    let mut log_y = screen_height() - LINE_HEIGHT * EVENT_LOG_LINES as f32;
    for event in &log[log.len().saturating_sub(EVENT_LOG_LINES)..] {
        draw_text(&event_log_line(event), 12.0, log_y, FONT_SIZE, DARKGRAY);
        log_y += LINE_HEIGHT;
    }

    if app.inventory_visible {
        draw_panel(&inventory_lines(sim.inventory()), screen_width() - 320.0, LINE_HEIGHT);
    }
    if let AppMode::Finished(outcome) = app.mode {
        let lines = finished_recap_lines(sim, outcome);
        draw_panel(&lines, screen_width() / 2.0 - 160.0, screen_height() / 3.0);
    }
}

fn draw_panel(lines: &[String], x: f32, y: f32) {
    let height = LINE_HEIGHT * (lines.len() as f32 + 0.5);
    draw_rectangle(x - 8.0, y - LINE_HEIGHT, 316.0, height, Color::new(0.0, 0.0, 0.0, 0.8));
    for (index, line) in lines.iter().enumerate() {
        draw_text(line, x, y + LINE_HEIGHT * index as f32, FONT_SIZE, WHITE);
    }
}

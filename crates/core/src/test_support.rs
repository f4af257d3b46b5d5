//! Shared test fixtures for the crate's unit test suites.
//! This module exists to avoid repeating board and actor setup across many tests.
//! It does not own production simulation logic.

use crate::board::Board;
use crate::content::{creature_preset, creature_texture};
use crate::entities::{Actor, spawn_actor};
use crate::mapgen::ProtoBoard;
use crate::types::{CreatureKind, Pos, TileKind, Visibility};

pub(crate) const TEST_PITCH: f32 = 32.0;

/// `#` is wall, anything else floor.
pub(crate) fn board_from_rows(rows: &[&str]) -> Board {
    let height = rows.len();
    let width = rows[0].len();
    let mut proto = ProtoBoard::filled(width, height, TileKind::Floor);
    for (y, row) in rows.iter().enumerate() {
        for (x, glyph) in row.chars().enumerate() {
            if glyph == '#' {
                proto.set(Pos { y: y as i32, x: x as i32 }, TileKind::Wall);
            }
        }
    }
    Board::from_proto(&proto, TEST_PITCH)
}

pub(crate) fn open_board(width: usize, height: usize) -> Board {
    Board::from_proto(&ProtoBoard::open_room(width, height), TEST_PITCH)
}

pub(crate) fn reveal_all(board: &mut Board) {
    for cell in board.cells_mut() {
        cell.visibility = Visibility::Remembered;
    }
}

pub(crate) fn actor_at(kind: CreatureKind, pos: Pos, history_len: usize) -> Actor {
    spawn_actor(creature_preset(kind), creature_texture(kind), pos, history_len, TEST_PITCH)
}

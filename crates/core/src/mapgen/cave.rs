//! Cellular-automaton cave carving.

use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;
use crate::rng::roll_percent;
use crate::types::{Pos, TileKind};

use super::proto::ProtoBoard;

/// Random fill followed by smoothing. The perimeter is always wall; the interior is not yet
/// guaranteed to be connected.
pub fn generate_level(
    width: usize,
    height: usize,
    rng: &mut ChaCha8Rng,
    params: &GenerationConfig,
) -> ProtoBoard {
    let mut board = ProtoBoard::filled(width, height, TileKind::Wall);
    for pos in board.positions() {
        if board.is_perimeter(pos) {
            continue;
        }
        let tile = if roll_percent(rng, params.wall_fill_percent) {
            TileKind::Wall
        } else {
            TileKind::Floor
        };
        board.set(pos, tile);
    }

    for _ in 0..params.smoothing_passes {
        board = smooth(&board);
    }
    board
}

/// One 4-5 rule pass: more than four walls around a cell make it wall, fewer than four make it
/// floor, exactly four keep it.
fn smooth(board: &ProtoBoard) -> ProtoBoard {
    let mut next = board.clone();
    for pos in board.positions() {
        if board.is_perimeter(pos) {
            continue;
        }
        let walls = surrounding_walls(board, pos);
        if walls > 4 {
            next.set(pos, TileKind::Wall);
        } else if walls < 4 {
            next.set(pos, TileKind::Floor);
        }
    }
    next
}

fn surrounding_walls(board: &ProtoBoard, pos: Pos) -> u32 {
    let mut walls = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if board.tile_at(Pos { y: pos.y + dy, x: pos.x + dx }) == TileKind::Wall {
                walls += 1;
            }
        }
    }
    walls
}

//! Fog of war: field of view from an observer and the three-state cell visibility it drives.
//! This module exists to keep sight rules deterministic and isolated from movement choices.
//! It does not decide what an actor does with what it sees.

use crate::board::Board;
use crate::types::{Pos, Visibility};

/// Recomputes every cell's visibility for an observer and keeps cell sprites in step.
///
/// Cells in view become `Visible`. Cells seen before and now out of view become `Remembered`.
/// Everything else stays `Unseen`.
pub fn update_tiles_visibility(board: &mut Board, observer: Pos, radius: i32) -> &mut Board {
    let in_view = field_of_view(board, observer, radius);
    for (cell, seen_now) in board.cells_mut().iter_mut().zip(in_view) {
        cell.visibility = match (seen_now, cell.visibility) {
            (true, _) => Visibility::Visible,
            (false, Visibility::Unseen) => Visibility::Unseen,
            (false, _) => Visibility::Remembered,
        };
        if let Some(sprite) = cell.sprite.as_mut() {
            sprite.visible = cell.visibility != Visibility::Unseen;
        }
    }
    board
}

/// Row-major mask of cells the observer can currently see.
pub fn field_of_view(board: &Board, origin: Pos, radius: i32) -> Vec<bool> {
    let mut view = vec![false; board.cells().len()];
    if !board.in_bounds(origin) {
        return view;
    }

    view[board.index(origin)] = true;
    for octant in 0..8 {
        scan_octant(board, &mut view, origin, radius, 1, Slope::new(1, 1), Slope::new(0, 1), octant);
    }

    let min_y = (origin.y - radius).max(0);
    let max_y = (origin.y + radius + 1).min(board.height() as i32);
    let min_x = (origin.x - radius).max(0);
    let max_x = (origin.x + radius + 1).min(board.width() as i32);
    for y in min_y..max_y {
        for x in min_x..max_x {
            let pos = Pos { y, x };
            let idx = board.index(pos);
            if pos != origin && view[idx] && !has_direct_line_of_sight(board, origin, pos) {
                view[idx] = false;
            }
        }
    }
    view
}

fn within_disc(origin: Pos, pos: Pos, radius: i32) -> bool {
    let dx = pos.x - origin.x;
    let dy = pos.y - origin.y;
    dx * dx + dy * dy <= radius * radius + radius
}

fn transform_octant(orig: Pos, x: i32, y: i32, oct: u8) -> Pos {
    match oct {
        0 => Pos { y: orig.y - y, x: orig.x + x },
        1 => Pos { y: orig.y - x, x: orig.x + y },
        2 => Pos { y: orig.y - x, x: orig.x - y },
        3 => Pos { y: orig.y - y, x: orig.x - x },
        4 => Pos { y: orig.y + y, x: orig.x - x },
        5 => Pos { y: orig.y + x, x: orig.x - y },
        6 => Pos { y: orig.y + x, x: orig.x + y },
        7 => Pos { y: orig.y + y, x: orig.x + x },
        _ => orig,
    }
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

#[allow(clippy::too_many_arguments)]
fn scan_octant(
    board: &Board,
    view: &mut [bool],
    orig: Pos,
    range: i32,
    dist: i32,
    start: Slope,
    end: Slope,
    oct: u8,
) {
    if dist > range {
        return;
    }
    let mut blocked = false;
    let mut cur_start = start;
    for y in (0..=dist).rev() {
        let top = Slope::new(2 * y + 1, 2 * dist - 1);
        let bot = Slope::new(2 * y - 1, 2 * dist + 1);
        if !(cur_start.greater_or_equal(&bot) && top.greater_than(&end)) {
            continue;
        }

        let pos = transform_octant(orig, dist, y, oct);
        if board.in_bounds(pos) && within_disc(orig, pos, range) {
            view[board.index(pos)] = true;
        }
        if board.is_opaque(pos) {
            if !blocked {
                scan_octant(board, view, orig, range, dist + 1, cur_start, top, oct);
                blocked = true;
            }
            cur_start = bot;
        } else if blocked {
            blocked = false;
        }
    }
    if !blocked {
        scan_octant(board, view, orig, range, dist + 1, cur_start, end, oct);
    }
}

fn has_direct_line_of_sight(board: &Board, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_x = dx.abs();
    let total_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut step_x = 0;
    let mut step_y = 0;

    while step_x < total_x || step_y < total_y {
        let lhs = (1 + 2 * step_x) * total_y;
        let rhs = (1 + 2 * step_y) * total_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            step_x += 1;
            step_y += 1;
        } else if lhs < rhs {
            x += sx;
            step_x += 1;
        } else {
            y += sy;
            step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if board.is_opaque(Pos { y, x }) {
            return false;
        }
    }
    true
}

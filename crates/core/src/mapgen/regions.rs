//! Flood-fill connectivity repair.

use std::collections::VecDeque;

use crate::types::{Pos, TileKind};

use super::proto::ProtoBoard;

/// Keeps only the largest 4-connected floor region; every other floor cell becomes wall.
/// On ties the region found first in row-major order wins.
pub fn remove_disconnected_regions(mut board: ProtoBoard) -> ProtoBoard {
    let regions = floor_regions(&board);
    let Some(largest) = regions
        .iter()
        .enumerate()
        .max_by(|(left_index, left), (right_index, right)| {
            left.len().cmp(&right.len()).then(right_index.cmp(left_index))
        })
        .map(|(index, _)| index)
    else {
        return board;
    };

    for (index, region) in regions.iter().enumerate() {
        if index == largest {
            continue;
        }
        for &pos in region {
            board.set(pos, TileKind::Wall);
        }
    }
    board
}

pub fn count_floor_regions(board: &ProtoBoard) -> usize {
    floor_regions(board).len()
}

fn floor_regions(board: &ProtoBoard) -> Vec<Vec<Pos>> {
    let mut seen = vec![false; board.tiles.len()];
    let mut regions = Vec::new();

    for start in board.positions() {
        if !board.is_floor(start) || seen[board.index(start)] {
            continue;
        }

        seen[board.index(start)] = true;
        let mut open = VecDeque::from([start]);
        let mut region = Vec::new();
        while let Some(pos) = open.pop_front() {
            region.push(pos);
            for next in pos.neighbors() {
                if !board.is_floor(next) || seen[board.index(next)] {
                    continue;
                }
                seen[board.index(next)] = true;
                open.push_back(next);
            }
        }
        regions.push(region);
    }
    regions
}

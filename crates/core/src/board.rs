//! Tiled board: cells with occupancy, tags, visibility, and render handles.
//! This module exists to lift generated proto-grids into the structure the turn loop mutates.
//! It does not decide who moves where; occupancy is flipped by the orchestrator.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;

use crate::error::SimError;
use crate::mapgen::ProtoBoard;
use crate::rng::random_index;
use crate::types::{CellTag, Pos, Sprite, Texture, TileKind, Visibility, WorldPos};

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub pos: Pos,
    pub world: WorldPos,
    pub tile: TileKind,
    pub tag: CellTag,
    pub has_actor: bool,
    pub visibility: Visibility,
    pub sprite: Option<Sprite>,
}

impl Cell {
    pub fn is_walkable(&self) -> bool {
        self.tile == TileKind::Floor
    }

    pub fn is_free(&self) -> bool {
        self.is_walkable() && !self.has_actor
    }

    fn texture(&self) -> Texture {
        match (self.tile, self.tag) {
            (TileKind::Wall, _) => Texture::Wall,
            (TileKind::Floor, CellTag::Exit) => Texture::Exit,
            (TileKind::Floor, _) => Texture::Floor,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Lifts a proto-grid into cells on a fixed world pitch: nothing seen, nothing occupied,
    /// nothing tagged.
    pub fn from_proto(proto: &ProtoBoard, pitch: f32) -> Self {
        let cells = proto
            .positions()
            .map(|pos| Cell {
                pos,
                world: WorldPos::from_grid(pos, pitch),
                tile: proto.tile_at(pos),
                tag: CellTag::None,
                has_actor: false,
                visibility: Visibility::Unseen,
                sprite: None,
            })
            .collect();
        Self { width: proto.width, height: proto.height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells.get_mut(idx)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(Cell::is_walkable)
    }

    pub fn is_opaque(&self, pos: Pos) -> bool {
        !self.is_walkable(pos)
    }

    pub fn visibility(&self, pos: Pos) -> Visibility {
        self.cell(pos).map_or(Visibility::Unseen, |cell| cell.visibility)
    }

    pub fn has_actor(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.has_actor)
    }

    pub fn set_occupied(&mut self, pos: Pos, occupied: bool) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.has_actor = occupied;
        }
    }

    pub fn exit_pos(&self) -> Option<Pos> {
        self.cells.iter().find(|cell| cell.tag == CellTag::Exit).map(|cell| cell.pos)
    }

    pub fn free_tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_free()).count()
    }

    /// Uniform pick among walkable cells without an actor.
    pub fn random_free_tile(&self, rng: &mut ChaCha8Rng) -> Result<Pos, SimError> {
        let free: Vec<Pos> =
            self.cells.iter().filter(|cell| cell.is_free()).map(|cell| cell.pos).collect();
        if free.is_empty() {
            return Err(SimError::NoFreeTile);
        }
        Ok(free[random_index(rng, free.len())])
    }

    /// Tags the floor cell farthest (by walking distance) from `origin` as the exit, replacing
    /// any previous exit. Ties go to the larger `(y, x)`.
    pub fn place_exit(&mut self, origin: Pos) -> Result<Pos, SimError> {
        if !self.is_walkable(origin) {
            return Err(SimError::NoExitCandidate);
        }

        let distances = self.walking_distances(origin);
        let mut best = origin;
        let mut best_distance = 0_u32;
        for cell in &self.cells {
            let Some(distance) = distances[self.index(cell.pos)] else {
                continue;
            };
            if distance > best_distance
                || (distance == best_distance && (cell.pos.y, cell.pos.x) > (best.y, best.x))
            {
                best = cell.pos;
                best_distance = distance;
            }
        }

        for cell in &mut self.cells {
            if cell.tag == CellTag::Exit {
                cell.tag = CellTag::None;
            }
        }
        if let Some(cell) = self.cell_mut(best) {
            cell.tag = CellTag::Exit;
        }
        Ok(best)
    }

    /// Attaches a render handle to every cell. Sprites start visible only for seen cells.
    pub fn tile_board(&mut self) {
        for cell in &mut self.cells {
            cell.sprite = Some(Sprite {
                texture: cell.texture(),
                position: cell.world,
                visible: cell.visibility != Visibility::Unseen,
            });
        }
    }

    /// Breadth-first walking distance from `origin` over walkable cells.
    pub(crate) fn walking_distances(&self, origin: Pos) -> Vec<Option<u32>> {
        let mut distances = vec![None; self.cells.len()];
        if !self.is_walkable(origin) {
            return distances;
        }

        distances[self.index(origin)] = Some(0);
        let mut open = VecDeque::from([origin]);
        while let Some(pos) = open.pop_front() {
            let distance = distances[self.index(pos)].unwrap_or(0);
            for next in pos.neighbors() {
                if !self.is_walkable(next) || distances[self.index(next)].is_some() {
                    continue;
                }
                distances[self.index(next)] = Some(distance + 1);
                open.push_back(next);
            }
        }
        distances
    }

    /// Text rendering for diagnostics: `#` wall, `.` floor, `>` exit, `a` actor, `@` marked
    /// position, `?` unseen floor.
    pub fn render_ascii(&self, marker: Option<Pos>) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                let cell = &self.cells[self.index(pos)];
                let glyph = if Some(pos) == marker {
                    '@'
                } else if cell.tile == TileKind::Wall {
                    '#'
                } else if cell.has_actor {
                    'a'
                } else if cell.tag == CellTag::Exit {
                    '>'
                } else if cell.visibility == Visibility::Unseen {
                    '?'
                } else {
                    '.'
                };
                text.push(glyph);
            }
            text.push('\n');
        }
        text
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::test_support::board_from_rows;

    #[test]
    fn converted_board_starts_unseen_unoccupied_and_untagged() {
        let board = Board::from_proto(&ProtoBoard::open_room(5, 4), 16.0);
        assert_eq!(board.cells().len(), 20);
        for cell in board.cells() {
            assert_eq!(cell.visibility, Visibility::Unseen);
            assert!(!cell.has_actor);
            assert_eq!(cell.tag, CellTag::None);
            assert!(cell.sprite.is_none());
            assert_eq!(cell.world, WorldPos::from_grid(cell.pos, 16.0));
        }
    }

    #[test]
    fn random_free_tile_skips_occupied_cells_then_reports_exhaustion() {
        let mut board = board_from_rows(&[
            "#####", //
            "#...#", //
            "#.#.#", //
            "#####",
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let floor = board.free_tile_count();
        assert_eq!(floor, 5);

        for _ in 0..floor {
            let pos = board.random_free_tile(&mut rng).expect("free tile should remain");
            assert!(board.is_walkable(pos));
            assert!(!board.has_actor(pos), "returned occupied cell {pos:?}");
            board.set_occupied(pos, true);
        }

        assert_eq!(board.random_free_tile(&mut rng), Err(SimError::NoFreeTile));
    }

    #[test]
    fn exit_is_farthest_walkable_cell_and_unique() {
        let mut board = board_from_rows(&[
            "#######", //
            "#.....#", //
            "#####.#", //
            "#.....#", //
            "#######",
        ]);
        let exit = board.place_exit(Pos { y: 1, x: 1 }).expect("exit");
        assert_eq!(exit, Pos { y: 3, x: 1 });

        let again = board.place_exit(Pos { y: 3, x: 1 }).expect("exit");
        assert_eq!(again, Pos { y: 1, x: 1 });
        let exits = board.cells().iter().filter(|cell| cell.tag == CellTag::Exit).count();
        assert_eq!(exits, 1);
        assert_eq!(board.exit_pos(), Some(again));
    }

    #[test]
    fn exit_needs_walkable_origin() {
        let mut board = board_from_rows(&[
            "###", //
            "#.#", //
            "###",
        ]);
        assert_eq!(board.place_exit(Pos { y: 0, x: 0 }), Err(SimError::NoExitCandidate));
    }

    #[test]
    fn tiling_attaches_textures_per_cell() {
        let mut board = board_from_rows(&[
            "####", //
            "#..#", //
            "####",
        ]);
        board.place_exit(Pos { y: 1, x: 1 }).expect("exit");
        board.tile_board();

        let exit_sprite = board.cell(Pos { y: 1, x: 2 }).and_then(|cell| cell.sprite);
        assert_eq!(exit_sprite.map(|sprite| sprite.texture), Some(Texture::Exit));
        let wall_sprite = board.cell(Pos { y: 0, x: 0 }).and_then(|cell| cell.sprite);
        assert_eq!(wall_sprite.map(|sprite| sprite.texture), Some(Texture::Wall));
        assert!(board.cells().iter().all(|cell| cell.sprite.is_some_and(|s| !s.visible)));
    }
}

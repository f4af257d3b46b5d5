//! Screen framing: keeps the player centred and maps clicks back to grid cells.

use delve_core::{Pos, WorldPos};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

/// Top-left corner of the view in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub offset: WorldPos,
    pub tile_pitch: f32,
}

impl Camera {
    pub fn new(tile_pitch: f32) -> Self {
        Self { offset: WorldPos::default(), tile_pitch }
    }

    /// Puts the centre of the target tile in the middle of the screen.
    pub fn center_on(&mut self, target: WorldPos, screen: ScreenSize) {
        let half_tile = self.tile_pitch / 2.0;
        self.offset = WorldPos {
            x: target.x + half_tile - screen.width / 2.0,
            y: target.y + half_tile - screen.height / 2.0,
        };
    }

    pub fn world_to_screen(&self, world: WorldPos) -> (f32, f32) {
        (world.x - self.offset.x, world.y - self.offset.y)
    }

    pub fn screen_to_tile(&self, screen_x: f32, screen_y: f32) -> Pos {
        let world_x = screen_x + self.offset.x;
        let world_y = screen_y + self.offset.y;
        Pos {
            y: (world_y / self.tile_pitch).floor() as i32,
            x: (world_x / self.tile_pitch).floor() as i32,
        }
    }
}

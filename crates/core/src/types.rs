use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours in a fixed north, east, south, west order.
    pub fn neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }
}

/// Position in render space, derived from a grid position and the tile pitch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub fn from_grid(pos: Pos, pitch: f32) -> Self {
        Self { x: pos.x as f32 * pitch, y: pos.y as f32 * pitch }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellTag {
    #[default]
    None,
    Exit,
    Item,
    Decoration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Unseen,
    /// Seen earlier, currently outside the observer's view.
    Remembered,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureKind {
    Player,
    Skeleton,
}

/// Texture handles the front end maps to real art.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Texture {
    Floor,
    Wall,
    Exit,
    Player,
    Skeleton,
    Chest,
    Bones,
}

/// Render handle the front end attaches to cells and entities. The core only moves it and
/// toggles `visible`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub texture: Texture,
    pub position: WorldPos,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Default,
    EnterCombat,
    EnterDungeon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Won,
    Lost,
    Ongoing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnPhase {
    #[default]
    AwaitingTick,
    PlayerMoving,
    EnemiesMoving,
    CombatResolving,
    VisibilityRefresh,
    LevelTransition,
    Terminal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelEntered { level: u32, width: usize, height: usize },
    PlayerMoved { to: Pos },
    CombatQueued { at: Pos },
    CombatResolved { at: Pos, outcome: CombatOutcome },
    ItemLooted { id: &'static str, level: u32 },
    PlayerDefeated { level: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    AwaitingTick { remaining_ms: u64 },
    AwaitingInput,
    Finished(RunOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub turns: u32,
    pub stop_reason: AdvanceStopReason,
}

//! Entities that live on a board: static dressing and actors.

use std::collections::VecDeque;
use std::iter;

use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::content::{CreaturePreset, CreatureStats};
use crate::rng::random_index;
use crate::types::{CellTag, CreatureKind, Pos, Sprite, Texture, Visibility, WorldPos};

#[derive(Clone, Debug, PartialEq)]
pub struct EntityHeader {
    pub pos: Pos,
    pub sprite: Sprite,
}

impl EntityHeader {
    fn new(texture: Texture, pos: Pos, pitch: f32) -> Self {
        Self { pos, sprite: Sprite { texture, position: WorldPos::from_grid(pos, pitch), visible: false } }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaticKind {
    Decoration,
    Item,
}

impl StaticKind {
    pub fn texture(self) -> Texture {
        match self {
            StaticKind::Decoration => Texture::Bones,
            StaticKind::Item => Texture::Chest,
        }
    }

    pub fn tag(self) -> CellTag {
        match self {
            StaticKind::Decoration => CellTag::Decoration,
            StaticKind::Item => CellTag::Item,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StaticEntity {
    pub header: EntityHeader,
    pub kind: StaticKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub header: EntityHeader,
    pub kind: CreatureKind,
    pub stats: CreatureStats,
    /// Turn-interval divisor.
    pub speed: u32,
    last_cells: VecDeque<Pos>,
}

impl Actor {
    pub fn pos(&self) -> Pos {
        self.header.pos
    }

    pub fn is_alive(&self) -> bool {
        self.stats.hp > 0
    }

    /// Recently visited cells, most recent first. Always holds the configured history length.
    pub fn last_cells(&self) -> &VecDeque<Pos> {
        &self.last_cells
    }

    pub fn visited_recently(&self, pos: Pos) -> bool {
        self.last_cells.contains(&pos)
    }

    pub fn record_visit(&mut self, pos: Pos) {
        if self.last_cells.is_empty() {
            return;
        }
        self.last_cells.pop_back();
        self.last_cells.push_front(pos);
    }

    /// Preset that respawns this actor with its current stats.
    pub fn preset(&self) -> CreaturePreset {
        CreaturePreset { kind: self.kind, stats: self.stats, speed: self.speed }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Static(StaticEntity),
    Actor(Actor),
}

impl Entity {
    pub fn header(&self) -> &EntityHeader {
        match self {
            Entity::Static(entity) => &entity.header,
            Entity::Actor(actor) => &actor.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut EntityHeader {
        match self {
            Entity::Static(entity) => &mut entity.header,
            Entity::Actor(actor) => &mut actor.header,
        }
    }

    pub fn pos(&self) -> Pos {
        self.header().pos
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match self {
            Entity::Actor(actor) => Some(actor),
            Entity::Static(_) => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match self {
            Entity::Actor(actor) => Some(actor),
            Entity::Static(_) => None,
        }
    }

    pub fn static_kind(&self) -> Option<StaticKind> {
        match self {
            Entity::Static(entity) => Some(entity.kind),
            Entity::Actor(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnCounts {
    pub decorations: usize,
    pub items: usize,
}

/// Builds an actor with a fresh sprite. Board occupancy is left to the caller.
pub fn spawn_actor(
    preset: CreaturePreset,
    texture: Texture,
    pos: Pos,
    history_len: usize,
    pitch: f32,
) -> Actor {
    Actor {
        header: EntityHeader::new(texture, pos, pitch),
        kind: preset.kind,
        stats: preset.stats,
        speed: preset.speed,
        last_cells: VecDeque::from(vec![pos; history_len]),
    }
}

/// Scatters decorations and item caches over untagged free floor, tagging each cell it uses.
/// Stops early without error once no candidate cell is left.
pub fn spawn_entities(
    board: &mut Board,
    rng: &mut ChaCha8Rng,
    counts: SpawnCounts,
    pitch: f32,
) -> Vec<Entity> {
    let mut candidates: Vec<Pos> = board
        .cells()
        .iter()
        .filter(|cell| cell.is_free() && cell.tag == CellTag::None)
        .map(|cell| cell.pos)
        .collect();

    let kinds = iter::repeat_n(StaticKind::Decoration, counts.decorations)
        .chain(iter::repeat_n(StaticKind::Item, counts.items));

    let mut spawned = Vec::new();
    for kind in kinds {
        if candidates.is_empty() {
            break;
        }
        let pos = candidates.swap_remove(random_index(rng, candidates.len()));
        if let Some(cell) = board.cell_mut(pos) {
            cell.tag = kind.tag();
        }
        spawned.push(Entity::Static(StaticEntity {
            header: EntityHeader::new(kind.texture(), pos, pitch),
            kind,
        }));
    }
    spawned
}

/// Moves the grid and world position together. Occupancy belongs to the caller.
pub fn move_entity(header: &mut EntityHeader, pos: Pos, pitch: f32) {
    header.pos = pos;
    header.sprite.position = WorldPos::from_grid(pos, pitch);
}

pub fn update_entities_visibility<'a>(
    entities: impl IntoIterator<Item = &'a mut Entity>,
    board: &Board,
) {
    for entity in entities {
        sync_header_visibility(entity.header_mut(), board);
    }
}

pub fn update_actor_visibility(actor: &mut Actor, board: &Board) {
    sync_header_visibility(&mut actor.header, board);
}

fn sync_header_visibility(header: &mut EntityHeader, board: &Board) {
    header.sprite.visible = board.visibility(header.pos) == Visibility::Visible;
}

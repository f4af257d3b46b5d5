//! Turn loop orchestration: owns the run state and sequences movement, combat, and sight.
//! This file wires focused orchestration submodules together.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::combat::resolve_exchange;
use crate::config::SimConfig;
use crate::content::creature_preset;
use crate::entities::{
    Actor, Entity, move_entity, update_actor_visibility, update_entities_visibility,
};
use crate::error::SimError;
use crate::loot::{Inventory, roll_item};
use crate::mapgen::MapGenerator;
use crate::movement::{MoveRole, select_next_move};
use crate::types::*;
use crate::visibility::update_tiles_visibility;

mod combat_queue;
mod hash;
mod level;
mod moves;
mod turn;


/// Everything that belongs to one level: the board and the entities standing on it.
/// Replaced wholesale when the player takes the exit.
#[derive(Clone, Debug)]
pub struct World {
    board: Board,
    entities: SlotMap<EntityId, Entity>,
}

impl World {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn entities(&self) -> &SlotMap<EntityId, Entity> {
        &self.entities
    }

    pub fn enemies(&self) -> impl Iterator<Item = (EntityId, &Actor)> {
        self.entities.iter().filter_map(|(id, entity)| entity.as_actor().map(|actor| (id, actor)))
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies().count()
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EntityId> {
        self.enemies().find(|(_, actor)| actor.pos() == pos).map(|(id, _)| id)
    }

    /// Enemy ids nearest-first by Manhattan distance to `player`; equal distances keep registry
    /// order.
    pub fn enemies_by_distance(&self, player: Pos) -> Vec<EntityId> {
        let mut order: Vec<(u32, EntityId)> =
            self.enemies().map(|(id, actor)| (actor.pos().manhattan(player), id)).collect();
        order.sort_by_key(|&(distance, _)| distance);
        order.into_iter().map(|(_, id)| id).collect()
    }
}

pub struct Simulation {
    seed: u64,
    config: SimConfig,
    rng: ChaCha8Rng,
    generator: MapGenerator,
    level: u32,
    turn: u64,
    pending_ms: u64,
    phase: TurnPhase,
    player: Actor,
    world: World,
    inventory: Inventory,
    combat_queue: Vec<Pos>,
    outcome: Option<RunOutcome>,
    log: Vec<LogEvent>,
}

impl Simulation {
    /// Starts a run on level 1.
    pub fn new(seed: u64, config: SimConfig) -> Result<Self, SimError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let generator = MapGenerator::new(seed, config.generation.clone());
        let preset = creature_preset(CreatureKind::Player);
        let (world, player) = level::build_world(&config, &generator, &mut rng, 1, preset)?;

        let mut sim = Self {
            seed,
            config,
            rng,
            generator,
            level: 1,
            turn: 0,
            pending_ms: 0,
            phase: TurnPhase::AwaitingTick,
            player,
            world,
            inventory: Inventory::default(),
            combat_queue: Vec::new(),
            outcome: None,
            log: Vec::new(),
        };
        sim.record_level_entry();
        Ok(sim)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn board(&self) -> &Board {
        &self.world.board
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn combat_queue(&self) -> &[Pos] {
        &self.combat_queue
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn movement_mode(&self) -> MovementMode {
        self.config.movement_mode
    }

    pub fn set_movement_mode(&mut self, mode: MovementMode) {
        self.config.movement_mode = mode;
        self.pending_ms = 0;
    }

    /// Virtual milliseconds between automatic turns at the player's current speed.
    pub fn tick_interval_ms(&self) -> u64 {
        (self.config.base_wait_ms / u64::from(self.player.speed.max(1))).max(1)
    }

    fn record_level_entry(&mut self) {
        let (width, height) = (self.world.board.width(), self.world.board.height());
        info!(level = self.level, width, height, enemies = self.world.enemy_count(), "entered level");
        self.log.push(LogEvent::LevelEntered { level: self.level, width, height });
    }

    fn refresh_visibility(&mut self) {
        let radius = self.config.view_radius;
        update_tiles_visibility(&mut self.world.board, self.player.pos(), radius);
        update_entities_visibility(self.world.entities.values_mut(), &self.world.board);
        update_actor_visibility(&mut self.player, &self.world.board);
    }
}

//! Level construction and the wholesale world swap on transition.

use super::*;
use crate::content::{CreaturePreset, creature_texture};
use crate::entities::{SpawnCounts, spawn_actor, spawn_entities};

/// Builds a complete level off to the side. Nothing is observable until the caller installs
/// the returned world and player.
pub(super) fn build_world(
    config: &SimConfig,
    generator: &MapGenerator,
    rng: &mut ChaCha8Rng,
    level: u32,
    player_preset: CreaturePreset,
) -> Result<(World, Actor), SimError> {
    let (width, height) = config.level_dimensions(level);
    let enemy_total = config.enemy_count(level);
    let required_floor = enemy_total + 2;
    let pitch = config.tile_pitch;

    let proto = generator.generate(level, width, height, required_floor);
    let mut board = Board::from_proto(&proto, pitch);

    let player_pos = board.random_free_tile(rng)?;
    let mut player = spawn_actor(
        player_preset,
        creature_texture(player_preset.kind),
        player_pos,
        config.history_len,
        pitch,
    );
    board.set_occupied(player_pos, true);
    board.place_exit(player_pos)?;

    let mut entities = SlotMap::with_key();
    let skeleton = creature_preset(CreatureKind::Skeleton);
    for _ in 0..enemy_total {
        let pos = board.random_free_tile(rng)?;
        let enemy = spawn_actor(
            skeleton,
            creature_texture(skeleton.kind),
            pos,
            config.history_len,
            pitch,
        );
        board.set_occupied(pos, true);
        entities.insert(Entity::Actor(enemy));
    }

    let counts = SpawnCounts {
        decorations: config.decorations_per_level,
        items: config.item_caches_per_level,
    };
    for entity in spawn_entities(&mut board, rng, counts, pitch) {
        entities.insert(entity);
    }

    update_tiles_visibility(&mut board, player_pos, config.view_radius);
    board.tile_board();
    update_entities_visibility(entities.values_mut(), &board);
    update_actor_visibility(&mut player, &board);

    Ok((World { board, entities }, player))
}

impl Simulation {
    /// Replaces the world with the next level. On failure the current world stays installed.
    pub(super) fn transition_level(&mut self) -> Result<(), SimError> {
        let next_level = self.level + 1;
        let (world, player) = build_world(
            &self.config,
            &self.generator,
            &mut self.rng,
            next_level,
            self.player.preset(),
        )?;

        self.world = world;
        self.player = player;
        self.level = next_level;
        self.combat_queue.clear();
        self.record_level_entry();
        Ok(())
    }
}

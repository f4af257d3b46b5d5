//! Applying selected moves for the player and the enemies.

use super::*;
use crate::entities::StaticKind;

impl Simulation {
    pub(super) fn move_player(&mut self) -> Result<MoveResult, SimError> {
        let to = select_next_move(&self.player, &self.world.board, MoveRole::Player, &mut self.rng);
        self.apply_player_move(to)
    }

    /// Validates and performs a player move. Stepping into an enemy queues combat instead.
    pub(super) fn apply_player_move(&mut self, to: Pos) -> Result<MoveResult, SimError> {
        let from = self.player.pos();
        if !self.world.board.in_bounds(to) {
            return Err(SimError::OutOfBoundsSelection { from, pos: to });
        }
        if to == from {
            return Ok(MoveResult::Default);
        }
        if self.world.board.has_actor(to) {
            self.enqueue_combat(to);
            return Ok(MoveResult::EnterCombat);
        }

        self.world.board.set_occupied(from, false);
        self.world.board.set_occupied(to, true);
        move_entity(&mut self.player.header, to, self.config.tile_pitch);
        self.player.record_visit(to);
        trace!(?from, ?to, "player moved");
        self.log.push(LogEvent::PlayerMoved { to });

        let tag = self.world.board.cell(to).map_or(CellTag::None, |cell| cell.tag);
        match tag {
            CellTag::Exit => Ok(MoveResult::EnterDungeon),
            CellTag::Item => {
                self.pick_up_cache(to);
                Ok(MoveResult::Default)
            }
            CellTag::None | CellTag::Decoration => Ok(MoveResult::Default),
        }
    }

    fn pick_up_cache(&mut self, pos: Pos) {
        let cache = self
            .world
            .entities
            .iter()
            .find(|(_, entity)| entity.static_kind() == Some(StaticKind::Item) && entity.pos() == pos)
            .map(|(id, _)| id);
        if let Some(id) = cache {
            self.world.entities.remove(id);
        }
        if let Some(cell) = self.world.board.cell_mut(pos) {
            cell.tag = CellTag::None;
        }
        self.award_loot();
    }

    /// Moves every enemy once, nearest to the player first, so a near enemy vacates the cell a
    /// farther one wants.
    pub(super) fn move_enemies(&mut self) -> Result<(), SimError> {
        let player_pos = self.player.pos();
        let role = MoveRole::Enemy { player: player_pos, aggro_radius: self.config.enemy_aggro_radius };

        for id in self.world.enemies_by_distance(player_pos) {
            let Some(enemy) = self.world.entities.get(id).and_then(Entity::as_actor) else {
                continue;
            };
            let from = enemy.pos();
            let to = select_next_move(enemy, &self.world.board, role, &mut self.rng);

            if !self.world.board.in_bounds(to) {
                return Err(SimError::OutOfBoundsSelection { from, pos: to });
            }
            if to == player_pos {
                self.enqueue_combat(from);
                continue;
            }
            if to == from || self.world.board.has_actor(to) {
                continue;
            }

            self.world.board.set_occupied(from, false);
            self.world.board.set_occupied(to, true);
            if let Some(enemy) = self.world.entities.get_mut(id).and_then(Entity::as_actor_mut) {
                move_entity(&mut enemy.header, to, self.config.tile_pitch);
                enemy.record_visit(to);
            }
            trace!(?from, ?to, "enemy moved");
        }
        Ok(())
    }

    /// Moves the player straight to a clicked floor cell. Only available in manual mode.
    pub fn click_tile(&mut self, pos: Pos) -> Result<MoveResult, SimError> {
        if self.config.movement_mode == MovementMode::Auto {
            return Err(SimError::AutoMovementActive);
        }
        if self.outcome.is_some() {
            return Ok(MoveResult::Default);
        }
        if !self.world.board.is_walkable(pos) {
            return Err(SimError::InvalidManualMove { pos });
        }

        self.turn += 1;
        let result = self.apply_player_move(pos)?;
        match result {
            MoveResult::EnterDungeon => self.transition_level()?,
            MoveResult::EnterCombat | MoveResult::Default => {
                self.resolve_combat_queue();
                self.refresh_visibility();
                if self.outcome.is_some() {
                    self.phase = TurnPhase::Terminal;
                }
            }
        }
        Ok(result)
    }
}

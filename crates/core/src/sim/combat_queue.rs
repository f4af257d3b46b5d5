//! Deferred combat: contested cells queue up during movement and drain last-in-first-out.

use super::*;

impl Simulation {
    pub(super) fn enqueue_combat(&mut self, at: Pos) {
        debug!(?at, "combat queued");
        self.combat_queue.push(at);
        self.log.push(LogEvent::CombatQueued { at });
    }

    /// Drains the queue newest first. Once the player falls, the remaining entries are dropped.
    pub(super) fn resolve_combat_queue(&mut self) {
        while let Some(at) = self.combat_queue.pop() {
            if self.outcome.is_some() {
                self.combat_queue.clear();
                break;
            }
            self.combat_check(at);
        }
    }

    /// Resolves one round against the enemy standing at `at`. `None` when no enemy is there any
    /// more, e.g. it was defeated earlier in the same drain.
    pub fn combat_check(&mut self, at: Pos) -> Option<CombatOutcome> {
        let id = self.world.enemy_at(at)?;
        let enemy = self.world.entities.get_mut(id).and_then(Entity::as_actor_mut)?;
        let outcome = resolve_exchange(
            self.config.combat_formula,
            &mut self.player.stats,
            &mut enemy.stats,
            &mut self.rng,
        );
        debug!(?at, ?outcome, player_hp = self.player.stats.hp, "combat round");
        self.log.push(LogEvent::CombatResolved { at, outcome });

        match outcome {
            CombatOutcome::Won => {
                self.world.entities.remove(id);
                self.world.board.set_occupied(at, false);
                self.award_loot();
            }
            CombatOutcome::Lost => {
                info!(level = self.level, turn = self.turn, "player defeated");
                self.outcome = Some(RunOutcome::Defeat);
                self.log.push(LogEvent::PlayerDefeated { level: self.level });
            }
            CombatOutcome::Ongoing => {}
        }
        Some(outcome)
    }

    pub(super) fn award_loot(&mut self) {
        let item = roll_item(self.level, 1, &mut self.rng);
        debug!(id = item.id, level = item.level, "item looted");
        self.log.push(LogEvent::ItemLooted { id: item.id, level: item.level });
        self.inventory.push(item);
    }
}

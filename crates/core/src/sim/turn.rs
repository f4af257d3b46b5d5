//! Phase stepping and the deferred-tick clock.

use super::*;

impl Simulation {
    /// Adds `elapsed_ms` of virtual time and runs every turn that time pays for.
    ///
    /// Runs at most `max_turns_per_advance` turns per call; time beyond that budget is dropped
    /// so a long stall never turns into a burst of catch-up turns.
    pub fn advance(&mut self, elapsed_ms: u64) -> Result<AdvanceResult, SimError> {
        if let Some(outcome) = self.outcome {
            return Ok(AdvanceResult { turns: 0, stop_reason: AdvanceStopReason::Finished(outcome) });
        }
        if self.config.movement_mode == MovementMode::Manual {
            return Ok(AdvanceResult { turns: 0, stop_reason: AdvanceStopReason::AwaitingInput });
        }

        self.pending_ms = self.pending_ms.saturating_add(elapsed_ms);
        let mut turns = 0;
        while self.pending_ms >= self.tick_interval_ms() {
            if turns >= self.config.max_turns_per_advance {
                self.pending_ms = 0;
                break;
            }
            self.pending_ms -= self.tick_interval_ms();
            self.run_turn()?;
            turns += 1;

            if let Some(outcome) = self.outcome {
                return Ok(AdvanceResult { turns, stop_reason: AdvanceStopReason::Finished(outcome) });
            }
        }

        let remaining_ms = self.tick_interval_ms() - self.pending_ms;
        Ok(AdvanceResult { turns, stop_reason: AdvanceStopReason::AwaitingTick { remaining_ms } })
    }

    /// Runs the rest of the current turn, or a whole turn when waiting for a tick.
    pub fn run_turn(&mut self) -> Result<(), SimError> {
        if self.phase == TurnPhase::Terminal {
            return Ok(());
        }
        loop {
            let phase = self.step_phase()?;
            if matches!(phase, TurnPhase::AwaitingTick | TurnPhase::Terminal) {
                return Ok(());
            }
        }
    }

    /// Executes exactly one phase and returns the phase that follows it.
    pub fn step_phase(&mut self) -> Result<TurnPhase, SimError> {
        let next = match self.phase {
            TurnPhase::AwaitingTick => {
                self.turn += 1;
                TurnPhase::PlayerMoving
            }
            TurnPhase::PlayerMoving => match self.move_player()? {
                MoveResult::EnterDungeon => TurnPhase::LevelTransition,
                MoveResult::EnterCombat | MoveResult::Default => TurnPhase::EnemiesMoving,
            },
            TurnPhase::EnemiesMoving => {
                self.move_enemies()?;
                TurnPhase::CombatResolving
            }
            TurnPhase::CombatResolving => {
                self.resolve_combat_queue();
                TurnPhase::VisibilityRefresh
            }
            TurnPhase::VisibilityRefresh => {
                self.refresh_visibility();
                if self.outcome.is_some() { TurnPhase::Terminal } else { TurnPhase::AwaitingTick }
            }
            TurnPhase::LevelTransition => {
                self.transition_level()?;
                TurnPhase::AwaitingTick
            }
            TurnPhase::Terminal => TurnPhase::Terminal,
        };
        self.phase = next;
        Ok(next)
    }
}

//! One round of player-versus-enemy combat under the configured formula.

use rand_chacha::ChaCha8Rng;

use crate::config::CombatFormula;
use crate::content::CreatureStats;
use crate::rng::roll_die;
use crate::types::CombatOutcome;

/// Player strikes first. A surviving enemy strikes back in the same round.
pub fn resolve_exchange(
    formula: CombatFormula,
    player: &mut CreatureStats,
    enemy: &mut CreatureStats,
    rng: &mut ChaCha8Rng,
) -> CombatOutcome {
    strike(formula, player, enemy, rng);
    if enemy.hp <= 0 {
        return CombatOutcome::Won;
    }

    strike(formula, enemy, player, rng);
    if player.hp <= 0 {
        return CombatOutcome::Lost;
    }
    CombatOutcome::Ongoing
}

fn strike(
    formula: CombatFormula,
    attacker: &CreatureStats,
    defender: &mut CreatureStats,
    rng: &mut ChaCha8Rng,
) -> i32 {
    let roll = match formula {
        CombatFormula::StatComparison => 0,
        CombatFormula::DiceRoll => roll_die(rng, 6),
    };
    let damage = (attacker.attack + roll - defender.defense).max(1);
    defender.hp -= damage;
    damage
}

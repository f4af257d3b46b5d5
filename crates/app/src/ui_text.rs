//! Text formatting for the status line, HUD, inventory panel, recap, and event log.

use delve_core::{CombatOutcome, Inventory, LogEvent, MovementMode, RunOutcome, Simulation};

use crate::app_loop::AppMode;
use crate::{format_snapshot_hash, reason_code};

pub fn status_text(mode: &AppMode, movement: MovementMode) -> String {
    match (mode, movement) {
        (AppMode::Finished(outcome), _) => format!("Finished: {}", reason_code(*outcome)),
        (_, MovementMode::Manual) => "Manual (click a tile to move, M for auto)".to_string(),
        (AppMode::AutoPlay, MovementMode::Auto) => "Auto ON (Space to pause)".to_string(),
        (AppMode::Paused, MovementMode::Auto) => {
            "Paused (Space to resume, Right to step)".to_string()
        }
    }
}

pub fn hud_lines(sim: &Simulation) -> Vec<String> {
    let stats = &sim.player().stats;
    vec![
        format!("Level {}  Turn {}", sim.level(), sim.turn()),
        format!("HP {}/{}  ATK {}  DEF {}", stats.hp, stats.max_hp, stats.attack, stats.defense),
        format!("Enemies {}  Items {}", sim.world().enemy_count(), sim.inventory().len()),
    ]
}

pub fn inventory_lines(inventory: &Inventory) -> Vec<String> {
    if inventory.is_empty() {
        return vec!["Inventory: empty".to_string()];
    }
    let mut lines = vec![format!("Inventory ({})", inventory.len())];
    lines.extend(inventory.temp.iter().map(|item| {
        format!("{} x{} (lvl {}, power {})", item.name, item.quantity, item.level, item.power)
    }));
    lines
}

pub fn finished_recap_lines(sim: &Simulation, outcome: RunOutcome) -> Vec<String> {
    vec![
        "Run recap:".to_string(),
        format!("Reason: {}", reason_code(outcome)),
        format!("Seed: {}", sim.seed()),
        format!("Snapshot: {}", format_snapshot_hash(sim.snapshot_hash())),
        format!("Level reached: {}", sim.level()),
        format!("Turns: {}", sim.turn()),
        format!("Items looted: {}", sim.inventory().len()),
    ]
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::LevelEntered { level, width, height } => {
            format!("entered level {level} ({width}x{height})")
        }
        LogEvent::PlayerMoved { to } => format!("moved to ({}, {})", to.x, to.y),
        LogEvent::CombatQueued { at } => format!("combat at ({}, {})", at.x, at.y),
        LogEvent::CombatResolved { outcome, .. } => match outcome {
            CombatOutcome::Won => "enemy slain".to_string(),
            CombatOutcome::Lost => "player fell".to_string(),
            CombatOutcome::Ongoing => "combat continues".to_string(),
        },
        LogEvent::ItemLooted { id, level } => format!("looted {id} (lvl {level})"),
        LogEvent::PlayerDefeated { level } => format!("defeated on level {level}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::Pos;

    #[test]
    fn status_text_reports_finished_reason_code() {
        let mode = AppMode::Finished(RunOutcome::Defeat);
        assert_eq!(status_text(&mode, MovementMode::Auto), "Finished: DMG_HP_ZERO");
        assert_eq!(status_text(&mode, MovementMode::Manual), "Finished: DMG_HP_ZERO");
    }

    #[test]
    fn status_text_reports_paused_and_manual_modes() {
        assert_eq!(
            status_text(&AppMode::Paused, MovementMode::Auto),
            "Paused (Space to resume, Right to step)"
        );
        assert_eq!(
            status_text(&AppMode::AutoPlay, MovementMode::Manual),
            "Manual (click a tile to move, M for auto)"
        );
    }

    #[test]
    fn empty_inventory_has_a_single_line() {
        assert_eq!(inventory_lines(&Inventory::default()), vec!["Inventory: empty"]);
    }

    #[test]
    fn event_log_line_formats_moves_and_loot() {
        let moved = LogEvent::PlayerMoved { to: Pos { y: 2, x: 5 } };
        assert_eq!(event_log_line(&moved), "moved to (5, 2)");
        assert_eq!(
            event_log_line(&LogEvent::ItemLooted { id: "iron_sword", level: 3 }),
            "looted iron_sword (lvl 3)"
        );
        assert_eq!(
            event_log_line(&LogEvent::CombatResolved {
                at: Pos { y: 1, x: 1 },
                outcome: CombatOutcome::Won,
            }),
            "enemy slain"
        );
    }
}

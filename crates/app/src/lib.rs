pub mod app_loop;
pub mod camera;
pub mod launch;
pub mod ui_text;

use delve_core::RunOutcome;

pub const APP_NAME: &str = "Delve";

/// `0x` plus 16 lowercase hex digits, the form printed by the headless runner too.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Stable code shown in the recap and logs when a run ends.
pub fn reason_code(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Defeat => "DMG_HP_ZERO",
    }
}

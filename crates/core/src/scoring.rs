//! Scoring module - line-clear points and level pacing
//!
//! - Each cleared line is worth `LINE_SCORE * level`.
//! - Emptying the grid with a clear adds a flat bonus once per lock.
//! - Fall interval shrinks by `FALL_SPEEDUP_PERCENT` of the base per level.

use crate::types::{FALL_SPEEDUP_PERCENT, LINE_SCORE};

/// Points for clearing `lines` rows in a single lock at `level`.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    lines.saturating_mul(LINE_SCORE).saturating_mul(level)
}

/// Points for a whole lock: line score plus `bonus` if the grid ended up empty.
///
/// The bonus needs at least one cleared line.
pub fn lock_score(lines: u32, level: u32, grid_cleared: bool, bonus: u32) -> u32 {
    let base = line_clear_score(lines, level);
    if grid_cleared && lines > 0 {
        base.saturating_add(bonus)
    } else {
        base
    }
}

/// Gravity interval for `level`: `base / (1 + (level - 1) * 0.1)`, never below `floor_ms`.
pub fn fall_interval_ms(level: u32, base_ms: u32, floor_ms: u32) -> u32 {
    let steps = level.saturating_sub(1);
    let divisor = 100u32.saturating_add(steps.saturating_mul(FALL_SPEEDUP_PERCENT));
    let interval = base_ms.saturating_mul(100) / divisor;
    interval.max(floor_ms).max(1)
}

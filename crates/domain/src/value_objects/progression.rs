//! Progression formulas - ability rolls, per-level growth and carry capacity.

use super::ability::ability_modifier;
use super::dice::DiceExpression;
use crate::ports::RandomPort;

/// Expression rolled once per ability for a new character (range 4-20).
pub const ABILITY_ROLL: DiceExpression = DiceExpression::from_parts(4, 5);

/// Carry capacity floor, regardless of stats.
pub const MIN_CARRY_CAPACITY: u32 = 50;

/// Carry capacity ceiling, regardless of stats.
pub const MAX_CARRY_CAPACITY: u32 = 500;

/// Extra carry per point of positive strength.
const CARRY_PER_STRENGTH: u64 = 10;

/// Carry multiplier growth per level above 1, in percent.
const CARRY_PERCENT_PER_LEVEL: u64 = 3;

/// Maximum carry weight for a character of `level` with `strength`.
///
/// `base = 50 + max(0, strength) * 10`, scaled by `1 + 0.03 * (level - 1)`
/// (levels below 1 count as 1), floored and clamped to `[50, 500]`. The
/// percentage is applied in integer arithmetic so the floor is exact.
pub fn carry_capacity(level: u32, strength: i32) -> u32 {
    let base = u64::from(MIN_CARRY_CAPACITY) + strength.max(0) as u64 * CARRY_PER_STRENGTH;
    let levels_above_first = u64::from(level.max(1) - 1);
    let scaled = base.saturating_mul(100 + CARRY_PERCENT_PER_LEVEL * levels_above_first) / 100;
    scaled.clamp(u64::from(MIN_CARRY_CAPACITY), u64::from(MAX_CARRY_CAPACITY)) as u32
}

/// One growth step: roll `die` once and adjust by the modifier for
/// `governing_score`. Always at least 1, however harsh the modifier.
pub fn growth_step(die: DiceExpression, governing_score: i32, rng: &dyn RandomPort) -> u32 {
    (die.roll(rng).total + ability_modifier(governing_score)).max(1) as u32
}

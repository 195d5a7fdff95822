//! The damage formula shared by every damage-dealing action.

use crate::rng::RngOracle;

use super::modifiers::DamageModifiers;
use super::types::DamageType;

/// Breakdown of one damage calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageCalculation {
    pub damage_type: DamageType,
    pub base: f64,
    pub added: f64,
    /// `Σ increased` as a fraction.
    pub increased: f64,
    /// `Π (1 + more_i)`.
    pub more: f64,
    pub crit_chance: f64,
    pub is_critical: bool,
    pub critical_multiplier: f64,
    pub final_damage: f64,
}

/// Calculate damage for a roll in `[0, 100)`.
///
/// # Formula
///
/// ```text
/// subtotal   = base + added
/// after_inc  = subtotal × (1 + Σ increased_i)
/// after_more = after_inc × Π (1 + more_i)
/// crit       = roll < clamp(crit_chance + Σ bonus, 0, 100)
/// final      = crit ? after_more × crit_multiplier × Π (1 + boost_i) : after_more
/// ```
pub fn calculate_with_roll(
    damage_type: DamageType,
    modifiers: &DamageModifiers,
    roll: f64,
) -> DamageCalculation {
    let subtotal = modifiers.base + modifiers.added;
    let increased = modifiers.increased_total();
    let after_inc = subtotal * (1.0 + increased);

    let more = modifiers.more_product();
    let after_more = after_inc * more;

    let crit_chance = modifiers.effective_crit_chance();
    let is_critical = roll < crit_chance;
    let critical_multiplier = modifiers.effective_crit_multiplier();

    let final_damage = if is_critical {
        after_more * critical_multiplier
    } else {
        after_more
    };

    DamageCalculation {
        damage_type,
        base: modifiers.base,
        added: modifiers.added,
        increased,
        more,
        crit_chance,
        is_critical,
        critical_multiplier,
        final_damage,
    }
}

/// Calculate damage, rolling the critical strike from `rng` with `seed`.
pub fn calculate_damage(
    damage_type: DamageType,
    modifiers: &DamageModifiers,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> DamageCalculation {
    calculate_with_roll(damage_type, modifiers, rng.roll_percent(seed))
}

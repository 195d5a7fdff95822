//! Damage contributions written into the event context.
//!
//! Percent parameters arrive in percent points and are stored as fractions,
//! the unit the damage formula works in.

use crate::config::CombatConfig;
use crate::damage::DamageType;
use crate::error::ResolveError;
use crate::modifier::{ElementalDamage, EventContext, ExtraHit};

use super::Applied;

fn invalid(name: &'static str, reason: impl Into<String>) -> ResolveError {
    ResolveError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

pub(super) fn add_flat(ctx: &mut EventContext, amount: f64) -> Result<Applied, ResolveError> {
    if !amount.is_finite() {
        return Err(invalid("amount", "must be finite"));
    }
    ctx.add_damage(amount);
    Ok(Applied::Context)
}

pub(super) fn add_increased(ctx: &mut EventContext, percent: f64) -> Result<Applied, ResolveError> {
    if !percent.is_finite() {
        return Err(invalid("percent", "must be finite"));
    }
    ctx.increased_damage.push(percent / 100.0);
    Ok(Applied::Context)
}

pub(super) fn add_more(ctx: &mut EventContext, percent: f64) -> Result<Applied, ResolveError> {
    if !percent.is_finite() || percent <= -100.0 {
        return Err(invalid("percent", format!("{percent} would zero or invert damage")));
    }
    ctx.more_damage.push(percent / 100.0);
    Ok(Applied::Context)
}

pub(super) fn add_elemental(
    ctx: &mut EventContext,
    damage_type: DamageType,
    amount: f64,
) -> Result<Applied, ResolveError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(invalid("amount", format!("{amount} is not a valid added damage")));
    }
    ctx.added_elemental_damage.push(ElementalDamage {
        damage_type,
        amount,
    });
    Ok(Applied::Context)
}

pub(super) fn add_extra_hit(
    ctx: &mut EventContext,
    damage_fraction: f64,
) -> Result<Applied, ResolveError> {
    if !damage_fraction.is_finite() || damage_fraction <= 0.0 {
        return Err(invalid(
            "damage_fraction",
            format!("{damage_fraction} must be positive"),
        ));
    }
    if ctx.extra_hits.len() >= CombatConfig::MAX_EXTRA_HITS {
        return Ok(Applied::Nothing);
    }
    ctx.extra_hits.push(ExtraHit { damage_fraction });
    Ok(Applied::Context)
}

pub(super) fn modify_multiplier(
    ctx: &mut EventContext,
    multiplier: f64,
) -> Result<Applied, ResolveError> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(invalid("multiplier", format!("{multiplier} must be non-negative")));
    }
    ctx.damage_multiplier *= multiplier;
    Ok(Applied::Context)
}

pub(super) fn add_crit_chance(
    ctx: &mut EventContext,
    percent: f64,
) -> Result<Applied, ResolveError> {
    if !percent.is_finite() {
        return Err(invalid("percent", "must be finite"));
    }
    ctx.crit_chance_bonus += percent;
    Ok(Applied::Context)
}

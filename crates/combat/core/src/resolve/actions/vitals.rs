//! Actor stat, guard, mana and health changes.

use crate::actor::{CombatActor, StatDelta, StatKind};
use crate::error::ResolveError;

use super::Applied;

pub(super) fn modify_stat(actor: &mut CombatActor, stat: StatKind, delta: StatDelta) -> Applied {
    let value = actor.stats.apply(stat, delta);
    Applied::Stat { stat, value }
}

pub(super) fn add_guard(actor: &mut CombatActor, amount: f64) -> Result<Applied, ResolveError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ResolveError::InvalidParameter {
            name: "amount",
            reason: format!("guard gain of {amount} is not allowed"),
        });
    }
    let gained = actor.gain_guard(amount);
    Ok(if gained > 0.0 {
        Applied::Guard(gained)
    } else {
        Applied::Nothing
    })
}

/// Positive amounts restore mana, negative amounts drain it.
pub(super) fn add_mana(actor: &mut CombatActor, amount: f64) -> Applied {
    let change = if amount >= 0.0 {
        actor.mana.restore(amount)
    } else {
        -actor.mana.drain(-amount)
    };
    if change == 0.0 {
        Applied::Nothing
    } else {
        Applied::Mana(change)
    }
}

pub(super) fn modify_health_percent(actor: &mut CombatActor, percent: f64) -> Applied {
    let change = actor.modify_health_percent(percent);
    if change == 0.0 {
        Applied::Nothing
    } else {
        Applied::Health(change)
    }
}

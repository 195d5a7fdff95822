//! Scripted bursts: damage the target, pay the cost, gain stacks.

use tracing::debug;

use crate::actor::CombatActor;
use crate::error::ResolveError;
use crate::modifier::{EventContext, PendingDamage, Surge};

use super::Applied;

/// All parts apply together or none do: a surge the actor cannot pay for
/// is skipped.
pub(super) fn trigger(
    ctx: &mut EventContext,
    actor: &mut CombatActor,
    surge: &Surge,
) -> Result<Applied, ResolveError> {
    let target = ctx.target.ok_or(ResolveError::MissingTarget)?;
    if !surge.damage.is_finite() || surge.damage < 0.0 {
        return Err(ResolveError::InvalidParameter {
            name: "damage",
            reason: format!("surge damage of {} is not allowed", surge.damage),
        });
    }

    if !actor.mana.spend(surge.mana_cost.max(0.0)) {
        debug!(
            target: "combat::actions",
            actor = %actor.id,
            mana = actor.mana.current,
            cost = surge.mana_cost,
            "surge skipped, not enough mana"
        );
        return Ok(Applied::Nothing);
    }
    if surge.health_cost_percent > 0.0 {
        actor.modify_health_percent(-surge.health_cost_percent);
    }

    ctx.pending_damage.push(PendingDamage {
        target,
        amount: surge.damage,
        damage_type: surge.damage_type,
    });
    let stacks = actor.stacks.add_stacks(surge.stack, surge.stacks);

    Ok(Applied::Surge {
        damage: surge.damage,
        stacks,
    })
}

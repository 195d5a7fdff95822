//! Blood Price: guard that absorbs a blow makes the attacker bleed.

use crate::actor::CombatActor;
use crate::error::ResolveError;
use crate::modifier::{ContextKey, EventContext, EventType, ModifierScratch};
use crate::resolve::{Applied, ModifierBehavior, ResolveEnv};
use crate::status::{StatusEffect, StatusEffectKind};

const BLEED_TURNS: u32 = 3;

/// On damage taken, applies Bleed to the attacker with a magnitude equal to
/// the damage the owner's guard just absorbed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BloodPrice;

impl ModifierBehavior for BloodPrice {
    fn id(&self) -> &'static str {
        "blood_price"
    }

    fn apply(
        &self,
        ctx: &mut EventContext,
        _actor: &mut CombatActor,
        _state: &mut ModifierScratch,
        env: &mut ResolveEnv<'_>,
    ) -> Result<Applied, ResolveError> {
        if env.event != EventType::OnDamageTaken {
            return Ok(Applied::Nothing);
        }
        let attacker = ctx.source.ok_or(ResolveError::MissingContext {
            key: ContextKey::Source,
        })?;
        let absorbed = ctx.damage_reduced.ok_or(ResolveError::MissingContext {
            key: ContextKey::DamageReduced,
        })?;
        if absorbed <= 0.0 {
            return Ok(Applied::Nothing);
        }
        if !env.status.tracks(attacker) {
            return Err(ResolveError::CollaboratorUnavailable {
                actor: attacker,
                collaborator: "status manager",
            });
        }

        let bleed = StatusEffect::new(StatusEffectKind::Bleed, absorbed, BLEED_TURNS);
        if !env.status.add_status_effect(attacker, bleed) {
            return Ok(Applied::Nothing);
        }
        Ok(Applied::StatusApplied {
            actor: attacker,
            kind: StatusEffectKind::Bleed,
            magnitude: absorbed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorId;
    use crate::resolve::behaviors::test_support::BehaviorHarness;
    use crate::status::StatusManager;

    #[test]
    fn absorbed_damage_bleeds_attacker() {
        let mut h = BehaviorHarness::new();
        h.actor.gain_guard(8.0);
        let taken = h.actor.take_damage(12.0);
        let mut ctx = EventContext::new()
            .with_source(ActorId::enemy(0))
            .with_damage_reduced(taken.absorbed_by_guard);

        h.run(&BloodPrice, EventType::OnDamageTaken, &mut ctx).unwrap();
        assert_eq!(h.status.total_magnitude(ActorId::enemy(0), StatusEffectKind::Bleed), 8.0);
    }

    #[test]
    fn nothing_absorbed_nothing_applied() {
        let mut h = BehaviorHarness::new();
        let mut ctx = EventContext::new()
            .with_source(ActorId::enemy(0))
            .with_damage_reduced(0.0);
        let applied = h.run(&BloodPrice, EventType::OnDamageTaken, &mut ctx).unwrap();
        assert!(applied.is_nothing());
    }

    #[test]
    fn missing_attacker_is_reported() {
        let mut h = BehaviorHarness::new();
        let mut ctx = EventContext::new().with_damage_reduced(5.0);
        let err = h.run(&BloodPrice, EventType::OnDamageTaken, &mut ctx).unwrap_err();
        assert_eq!(err, ResolveError::MissingContext { key: ContextKey::Source });
    }
}

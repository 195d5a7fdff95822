//! Relentless Momentum: every third card in a turn strikes again.

use crate::actor::CombatActor;
use crate::config::CombatConfig;
use crate::error::ResolveError;
use crate::modifier::{EventContext, EventType, ExtraHit, ModifierScratch};
use crate::resolve::{Applied, ModifierBehavior, ResolveEnv};

const CARDS_PLAYED: &str = "cards_played_this_turn";
const EVERY: i64 = 3;
const EXTRA_HIT_FRACTION: f64 = 0.5;

/// Counts cards played this turn. The count is reset to zero at turn start,
/// never decremented, so repeated turn starts are idempotent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RelentlessMomentum;

impl RelentlessMomentum {
    /// Cards played this turn according to `state`.
    pub fn cards_played(state: &ModifierScratch) -> i64 {
        state.count(CARDS_PLAYED)
    }
}

impl ModifierBehavior for RelentlessMomentum {
    fn id(&self) -> &'static str {
        "relentless_momentum"
    }

    fn apply(
        &self,
        ctx: &mut EventContext,
        _actor: &mut CombatActor,
        state: &mut ModifierScratch,
        env: &mut ResolveEnv<'_>,
    ) -> Result<Applied, ResolveError> {
        match env.event {
            EventType::OnTurnStart | EventType::OnCombatStart => {
                state.set_count(CARDS_PLAYED, 0);
                Ok(Applied::Behavior(self.id()))
            }
            EventType::OnCardPlayed => {
                let played = state.increment(CARDS_PLAYED);
                if played % EVERY != 0 || ctx.extra_hits.len() >= CombatConfig::MAX_EXTRA_HITS {
                    return Ok(Applied::Behavior(self.id()));
                }
                ctx.extra_hits.push(ExtraHit {
                    damage_fraction: EXTRA_HIT_FRACTION,
                });
                Ok(Applied::Context)
            }
            _ => Ok(Applied::Nothing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::behaviors::test_support::BehaviorHarness;

    #[test]
    fn third_card_gains_extra_hit() {
        let mut h = BehaviorHarness::new();
        let mut hits = Vec::new();
        for _ in 0..6 {
            let mut ctx = EventContext::new();
            h.run(&RelentlessMomentum, EventType::OnCardPlayed, &mut ctx).unwrap();
            hits.push(ctx.extra_hits.len());
        }
        assert_eq!(hits, [0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn repeated_turn_start_stays_at_zero() {
        let mut h = BehaviorHarness::new();
        h.run(&RelentlessMomentum, EventType::OnCardPlayed, &mut EventContext::new())
            .unwrap();
        for _ in 0..2 {
            h.run(&RelentlessMomentum, EventType::OnTurnStart, &mut EventContext::new())
                .unwrap();
            assert_eq!(RelentlessMomentum::cards_played(&h.state), 0);
        }
    }
}

//! Battle Rhythm: play three different card types in one turn to gain a
//! stack.

use crate::actor::CombatActor;
use crate::error::ResolveError;
use crate::modifier::{ContextKey, EventContext, EventType, ModifierScratch};
use crate::resolve::{Applied, ModifierBehavior, ResolveEnv};
use crate::stacks::StackKind;

const PLAYED: &str = "card_types_played";
const REQUIRED_TYPES: usize = 3;

/// Tracks distinct card types played this turn. A repeated type before the
/// set is complete restarts tracking from that card; the set also clears at
/// turn start and after granting a stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct BattleRhythm;

impl ModifierBehavior for BattleRhythm {
    fn id(&self) -> &'static str {
        "battle_rhythm"
    }

    fn apply(
        &self,
        ctx: &mut EventContext,
        actor: &mut CombatActor,
        state: &mut ModifierScratch,
        env: &mut ResolveEnv<'_>,
    ) -> Result<Applied, ResolveError> {
        match env.event {
            EventType::OnTurnStart | EventType::OnCombatStart => {
                state.remove(PLAYED);
                Ok(Applied::Behavior(self.id()))
            }
            EventType::OnCardPlayed => {
                let card = ctx.card.as_ref().ok_or(ResolveError::MissingContext {
                    key: ContextKey::Card,
                })?;
                let card_type: &str = card.card_type.as_ref();

                if !state.insert_member(PLAYED, card_type) {
                    state.remove(PLAYED);
                    state.insert_member(PLAYED, card_type);
                    return Ok(Applied::Behavior(self.id()));
                }
                if state.member_count(PLAYED) < REQUIRED_TYPES {
                    return Ok(Applied::Behavior(self.id()));
                }

                state.remove(PLAYED);
                Ok(Applied::from_stack_change(
                    actor.stacks.add_stacks(StackKind::BattleRhythm, 1),
                ))
            }
            _ => Ok(Applied::Nothing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardDescriptor, CardType};
    use crate::damage::DamageType;
    use crate::resolve::behaviors::test_support::BehaviorHarness;

    fn play(h: &mut BehaviorHarness, card_type: CardType) {
        let card = CardDescriptor::new("card", card_type, DamageType::Physical);
        h.run(&BattleRhythm, EventType::OnCardPlayed, &mut EventContext::for_card(card))
            .unwrap();
    }

    #[test]
    fn three_distinct_types_grant_a_stack() {
        let mut h = BehaviorHarness::new();
        play(&mut h, CardType::Attack);
        play(&mut h, CardType::Guard);
        assert_eq!(h.actor.stacks.get_stacks(StackKind::BattleRhythm), 0);
        play(&mut h, CardType::Skill);
        assert_eq!(h.actor.stacks.get_stacks(StackKind::BattleRhythm), 1);
        assert_eq!(h.state.member_count(PLAYED), 0);
    }

    #[test]
    fn duplicate_restarts_tracking() {
        let mut h = BehaviorHarness::new();
        play(&mut h, CardType::Attack);
        play(&mut h, CardType::Guard);
        play(&mut h, CardType::Attack);
        assert_eq!(h.state.member_count(PLAYED), 1);

        play(&mut h, CardType::Skill);
        assert_eq!(h.actor.stacks.get_stacks(StackKind::BattleRhythm), 0);
        play(&mut h, CardType::Power);
        assert_eq!(h.actor.stacks.get_stacks(StackKind::BattleRhythm), 1);
    }

    #[test]
    fn turn_start_clears_progress() {
        let mut h = BehaviorHarness::new();
        play(&mut h, CardType::Attack);
        play(&mut h, CardType::Guard);
        h.run(&BattleRhythm, EventType::OnTurnStart, &mut EventContext::new())
            .unwrap();
        play(&mut h, CardType::Skill);
        assert_eq!(h.actor.stacks.get_stacks(StackKind::BattleRhythm), 0);
        assert_eq!(h.state.member_count(PLAYED), 1);
    }

    #[test]
    fn card_event_without_card_fails() {
        let mut h = BehaviorHarness::new();
        let err = h
            .run(&BattleRhythm, EventType::OnCardPlayed, &mut EventContext::new())
            .unwrap_err();
        assert_eq!(err, ResolveError::MissingContext { key: ContextKey::Card });
    }
}

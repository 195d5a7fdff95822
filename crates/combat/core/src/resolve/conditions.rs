//! Condition evaluation.
//!
//! Evaluation never mutates anything. A condition that cannot be answered
//! (no target, no card) evaluates to false before inversion.

use tracing::trace;

use crate::actor::CombatActor;
use crate::modifier::{Condition, ConditionKind, EventContext, ModifierScratch};

use super::{ResolveEnv, subject_actor};

/// Evaluate one condition, applying its `invert` flag.
///
/// `(effect_index, condition_index)` identifies the random-chance roll so
/// rolls in the same dispatch stay independent.
pub fn evaluate(
    condition: &Condition,
    ctx: &EventContext,
    actor: &CombatActor,
    _state: &ModifierScratch,
    env: &ResolveEnv<'_>,
    (effect_index, condition_index): (u32, u32),
) -> bool {
    let raw = match &condition.kind {
        ConditionKind::HasStack { stack } => actor.stacks.has_stacks(*stack),

        ConditionKind::StackCount {
            stack,
            comparison,
            value,
        } => comparison.compare(actor.stacks.get_stacks(*stack) as f64, *value as f64),

        ConditionKind::HasStatus { status, subject } => {
            match subject_actor(*subject, ctx, actor) {
                Ok(id) => env.status.has_status_effect(id, *status),
                Err(_) => false,
            }
        }

        ConditionKind::HealthPercent {
            comparison,
            percent,
        } => comparison.compare(actor.health.percent(), *percent),

        ConditionKind::ManaPercent {
            comparison,
            percent,
        } => comparison.compare(actor.mana.percent(), *percent),

        ConditionKind::TurnNumber { comparison, turn } => {
            comparison.compare(ctx.turn as f64, *turn as f64)
        }

        ConditionKind::CardType { card_type } => {
            ctx.card.as_ref().is_some_and(|c| c.card_type == *card_type)
        }

        ConditionKind::DamageType { damage_type } => ctx.damage_type == Some(*damage_type),

        ConditionKind::TargetType { kind } => ctx.target_kind == Some(*kind),

        ConditionKind::RandomChance { percent } => {
            env.roll_condition(actor.id, effect_index, condition_index) < *percent
        }

        ConditionKind::IsCritical => ctx.is_critical,
    };

    let result = raw != condition.invert;
    trace!(
        target: "combat::conditions",
        condition = ?condition.kind,
        invert = condition.invert,
        result,
        "condition evaluated"
    );
    result
}

/// AND-combine `conditions`. An empty list passes.
///
/// `effect_index` keeps random rolls of different effects independent.
pub fn evaluate_all(
    conditions: &[Condition],
    ctx: &EventContext,
    actor: &CombatActor,
    state: &ModifierScratch,
    env: &ResolveEnv<'_>,
    effect_index: u32,
) -> bool {
    conditions.iter().enumerate().all(|(i, condition)| {
        evaluate(condition, ctx, actor, state, env, (effect_index, i as u32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorId, ActorKind};
    use crate::card::{CardDescriptor, CardType};
    use crate::config::CombatConfig;
    use crate::damage::DamageType;
    use crate::modifier::{Comparison, EventType, Subject};
    use crate::resolve::BehaviorTable;
    use crate::rng::FixedRoll;
    use crate::stacks::StackKind;
    use crate::status::{StatusEffect, StatusEffectKind, StatusLedger, StatusManager};

    struct Fixture {
        status: StatusLedger,
        rng: FixedRoll,
        config: CombatConfig,
        behaviors: BehaviorTable,
    }

    impl Fixture {
        fn new(roll: f64) -> Self {
            Self {
                status: StatusLedger::new().with_actors([ActorId::PLAYER, ActorId::enemy(0)]),
                rng: FixedRoll(roll),
                config: CombatConfig::default(),
                behaviors: BehaviorTable::new(),
            }
        }

        fn env(&mut self) -> ResolveEnv<'_> {
            ResolveEnv::new(
                EventType::OnCardPlayed,
                &mut self.status,
                &self.rng,
                &self.config,
                &self.behaviors,
            )
        }
    }

    fn check(
        condition: Condition,
        ctx: &EventContext,
        actor: &CombatActor,
        fixture: &mut Fixture,
    ) -> bool {
        let env = fixture.env();
        evaluate(&condition, ctx, actor, &ModifierScratch::default(), &env, (0, 0))
    }

    #[test]
    fn invert_negates_single_condition() {
        let mut fixture = Fixture::new(50.0);
        let actor = CombatActor::player(40.0, 3.0);
        let ctx = EventContext::new();
        let kind = ConditionKind::HasStack {
            stack: StackKind::Flow,
        };

        assert!(!check(Condition::new(kind.clone()), &ctx, &actor, &mut fixture));
        assert!(check(Condition::inverted(kind), &ctx, &actor, &mut fixture));
    }

    #[test]
    fn stack_count_and_health_thresholds() {
        let mut fixture = Fixture::new(50.0);
        let mut actor = CombatActor::player(40.0, 3.0);
        actor.stacks.add_stacks(StackKind::Corruption, 4);
        actor.take_damage(30.0);
        let ctx = EventContext::new();

        let stack = Condition::new(ConditionKind::StackCount {
            stack: StackKind::Corruption,
            comparison: Comparison::GreaterOrEqual,
            value: 4,
        });
        let low_health = Condition::new(ConditionKind::HealthPercent {
            comparison: Comparison::Less,
            percent: 30.0,
        });
        assert!(check(stack, &ctx, &actor, &mut fixture));
        assert!(check(low_health, &ctx, &actor, &mut fixture));
    }

    #[test]
    fn target_status_without_target_is_false() {
        let mut fixture = Fixture::new(50.0);
        fixture
            .status
            .add_status_effect(
                ActorId::enemy(0),
                StatusEffect::new(StatusEffectKind::Bleed, 2.0, 2),
            );
        let actor = CombatActor::player(40.0, 3.0);
        let condition = Condition::new(ConditionKind::HasStatus {
            status: StatusEffectKind::Bleed,
            subject: Subject::Target,
        });

        assert!(!check(condition.clone(), &EventContext::new(), &actor, &mut fixture));
        let ctx = EventContext::new().with_target(ActorId::enemy(0), ActorKind::Minion);
        assert!(check(condition, &ctx, &actor, &mut fixture));
    }

    #[test]
    fn card_damage_and_target_matches() {
        let mut fixture = Fixture::new(50.0);
        let actor = CombatActor::player(40.0, 3.0);
        let card = CardDescriptor::new("Frost Lance", CardType::Skill, DamageType::Cold);
        let ctx = EventContext::for_card(card).with_target(ActorId::enemy(1), ActorKind::Elite);

        let all = [
            Condition::new(ConditionKind::CardType {
                card_type: CardType::Skill,
            }),
            Condition::new(ConditionKind::DamageType {
                damage_type: DamageType::Cold,
            }),
            Condition::new(ConditionKind::TargetType {
                kind: ActorKind::Elite,
            }),
        ];
        let env = fixture.env();
        assert!(evaluate_all(&all, &ctx, &actor, &ModifierScratch::default(), &env, 0));

        let with_miss = [
            all[0].clone(),
            Condition::new(ConditionKind::TargetType {
                kind: ActorKind::Boss,
            }),
        ];
        assert!(!evaluate_all(&with_miss, &ctx, &actor, &ModifierScratch::default(), &env, 0));
    }

    #[test]
    fn random_chance_compares_roll() {
        let actor = CombatActor::player(40.0, 3.0);
        let ctx = EventContext::new();
        let chance = Condition::new(ConditionKind::RandomChance { percent: 25.0 });

        assert!(check(chance.clone(), &ctx, &actor, &mut Fixture::new(10.0)));
        assert!(!check(chance, &ctx, &actor, &mut Fixture::new(25.0)));
    }

    #[test]
    fn empty_condition_list_passes() {
        let mut fixture = Fixture::new(0.0);
        let env = fixture.env();
        let actor = CombatActor::player(40.0, 3.0);
        let scratch = ModifierScratch::default();
        assert!(evaluate_all(&[], &EventContext::new(), &actor, &scratch, &env, 0));
    }
}

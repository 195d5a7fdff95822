//! Action handlers.
//!
//! `resolve` routes an [`Action`] to the handler of its kind. Handlers return
//! what they changed as an [`Applied`] value; an error means the action was a
//! no-op and the dispatcher logs it and moves on.

mod cards;
mod damage;
mod stacks;
mod status;
mod surge;
mod vitals;

use crate::actor::{ActorId, CombatActor, StatKind};
use crate::error::ResolveError;
use crate::modifier::{
    Action, ActionKind, EventContext, EventType, ModifierDefinition, ModifierScratch,
};
use crate::stacks::StackChange;
use crate::status::StatusEffectKind;

use super::ResolveEnv;

/// What a resolved action changed.
#[derive(Clone, Debug, PartialEq)]
pub enum Applied {
    /// Nothing observable changed (e.g. a stack already at its cap).
    Nothing,
    Stacks(StackChange),
    /// Event context fields were written.
    Context,
    StatusApplied {
        actor: ActorId,
        kind: StatusEffectKind,
        magnitude: f64,
    },
    StatusRemoved {
        actor: ActorId,
        kind: StatusEffectKind,
    },
    Stat {
        stat: StatKind,
        value: f64,
    },
    Guard(f64),
    Mana(f64),
    Health(f64),
    Surge {
        damage: f64,
        stacks: Option<StackChange>,
    },
    Deferred(EventType),
    /// A named behavior ran.
    Behavior(&'static str),
}

impl Applied {
    pub fn from_stack_change(change: Option<StackChange>) -> Self {
        change.map_or(Self::Nothing, Self::Stacks)
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

/// Resolve one action for `actor`, the owner of `definition`.
pub fn resolve(
    action: &Action,
    ctx: &mut EventContext,
    actor: &mut CombatActor,
    state: &mut ModifierScratch,
    definition: &ModifierDefinition,
    env: &mut ResolveEnv<'_>,
) -> Result<Applied, ResolveError> {
    match &action.kind {
        ActionKind::AddStacks { stack, amount } => Ok(stacks::add(actor, *stack, *amount)),
        ActionKind::RemoveStacks { stack, amount } => Ok(stacks::remove(actor, *stack, *amount)),
        ActionKind::SetStacks { stack, value } => Ok(stacks::set(actor, *stack, *value)),
        ActionKind::ClearStacks { stack } => Ok(stacks::clear(actor, *stack)),
        ActionKind::ModifyStackMax { stack, delta } => {
            Ok(stacks::modify_max(actor, *stack, *delta))
        }

        ActionKind::AddFlatDamage { amount } => damage::add_flat(ctx, *amount),
        ActionKind::AddPercentDamage { percent } => damage::add_increased(ctx, *percent),
        ActionKind::AddMorePercentDamage { percent } => damage::add_more(ctx, *percent),
        ActionKind::AddElementalDamage {
            damage_type,
            amount,
        } => damage::add_elemental(ctx, *damage_type, *amount),
        ActionKind::AddExtraHit { damage_fraction } => damage::add_extra_hit(ctx, *damage_fraction),
        ActionKind::ModifyDamageMultiplier { multiplier } => {
            damage::modify_multiplier(ctx, *multiplier)
        }
        ActionKind::AddCritChance { percent } => damage::add_crit_chance(ctx, *percent),

        ActionKind::ApplyStatus {
            status,
            magnitude,
            turns,
            subject,
        } => status::apply(ctx, actor, env, *status, *magnitude, *turns, *subject),
        ActionKind::RemoveStatus { status, subject } => {
            status::remove(ctx, actor, env, *status, *subject)
        }

        ActionKind::ModifyStat { stat, delta } => Ok(vitals::modify_stat(actor, *stat, *delta)),
        ActionKind::AddGuard { amount } => vitals::add_guard(actor, *amount),
        ActionKind::AddMana { amount } => Ok(vitals::add_mana(actor, *amount)),
        ActionKind::ModifyHealthPercent { percent } => {
            Ok(vitals::modify_health_percent(actor, *percent))
        }

        ActionKind::DrawCards { count } => Ok(cards::draw(ctx, *count)),
        ActionKind::DiscardCards { count } => Ok(cards::discard(ctx, *count)),
        ActionKind::TagCard { tag } => cards::tag(ctx, tag),
        ActionKind::EchoTaggedCards { tag, copies } => cards::echo(ctx, tag, *copies),

        ActionKind::Surge(surge) => surge::trigger(ctx, actor, surge),

        ActionKind::TriggerEvent { event } => {
            env.defer(*event, ctx.follow_up());
            Ok(Applied::Deferred(*event))
        }

        ActionKind::Behavior => {
            let behaviors = env.behaviors;
            let behavior = behaviors
                .get(&definition.id)
                .ok_or_else(|| ResolveError::UnknownBehavior(definition.id.clone()))?;
            behavior.apply(ctx, actor, state, env)
        }
    }
}

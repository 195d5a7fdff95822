//! The event dispatcher.
//!
//! # Dispatch
//!
//! `process_event` runs the primary event to completion, then drains the
//! follow-up queue: events queued by `TriggerEvent` actions and stack
//! transitions recorded in the actor's stack journal. Follow-ups are never
//! interleaved with the dispatch that produced them, and at most
//! `CombatConfig::max_chained_events` of them run per call, so a modifier
//! that keeps re-triggering its own event still terminates.
//!
//! # Ordering
//!
//! Matching effects of every active modifier run in descending priority;
//! equal priorities keep registry order. Actions within an effect run in
//! ascending execution order.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::actor::{ActorId, CombatActor};
use crate::config::CombatConfig;
use crate::error::{GameError, ResolveError};
use crate::modifier::{Effect, EventContext, EventType, ModifierDefinition, ModifierState};
use crate::resolve::{BehaviorTable, DeferredEvent, ResolveEnv, evaluate_all, resolve};
use crate::rng::{PcgRng, RngOracle};
use crate::stacks::StackChange;
use crate::status::StatusManager;

use super::registry::ModifierRegistry;
use super::report::{DispatchFailure, DispatchReport};

/// Dispatcher state machine: `Idle → Dispatching(event) → Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchPhase {
    #[default]
    Idle,
    Dispatching(EventType),
}

/// Routes combat events to the modifiers active on an actor.
pub struct EventDispatcher {
    registry: Arc<ModifierRegistry>,
    behaviors: BehaviorTable,
    config: CombatConfig,
    rng: Box<dyn RngOracle>,
    combat_seed: u64,
    nonce: u64,
    states: HashMap<ActorId, ModifierState>,
    phase: DispatchPhase,
}

impl EventDispatcher {
    /// Creates a dispatcher with the built-in behaviors, default balance and
    /// the PCG oracle.
    pub fn new(registry: impl Into<Arc<ModifierRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            behaviors: BehaviorTable::with_defaults(),
            config: CombatConfig::default(),
            rng: Box::new(PcgRng),
            combat_seed: 0,
            nonce: 0,
            states: HashMap::new(),
            phase: DispatchPhase::Idle,
        }
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_behaviors(mut self, behaviors: BehaviorTable) -> Self {
        self.behaviors = behaviors;
        self
    }

    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_seed(mut self, combat_seed: u64) -> Self {
        self.combat_seed = combat_seed;
        self
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    pub fn behaviors(&self) -> &BehaviorTable {
        &self.behaviors
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn phase(&self) -> DispatchPhase {
        self.phase
    }

    /// Number of dispatches run so far, follow-ups included.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Persistent modifier state of `actor`, if it has any.
    pub fn state(&self, actor: ActorId) -> Option<&ModifierState> {
        self.states.get(&actor)
    }

    /// Combat-start reset: clears the actor's stacks and modifier state.
    pub fn begin_combat(&mut self, actor: &mut CombatActor) {
        actor.begin_combat();
        self.states.entry(actor.id).or_default().clear();
        debug!(target: "combat::dispatch", actor = %actor.id, "combat started");
    }

    /// Discards everything kept for `actor`.
    pub fn end_combat(&mut self, actor: ActorId) {
        self.states.remove(&actor);
        debug!(target: "combat::dispatch", actor = %actor, "combat ended");
    }

    /// Notify the core of a combat occurrence on `actor`.
    ///
    /// `ctx` is mutated by actions and should be read back by the caller.
    /// Failing actions are skipped, logged and listed in the report.
    pub fn process_event(
        &mut self,
        event: EventType,
        ctx: &mut EventContext,
        actor: &mut CombatActor,
        status: &mut dyn StatusManager,
    ) -> DispatchReport {
        debug_assert_eq!(self.phase, DispatchPhase::Idle);

        let mut report = DispatchReport::new(event);
        let active = self.registry.active_for(&actor.unlocks);
        report.modifiers_considered = active.len();

        debug!(
            target: "combat::dispatch",
            event = %event,
            actor = %actor.id,
            modifiers = active.len(),
            "dispatching event"
        );

        let mut queue = VecDeque::new();
        self.dispatch_once(event, ctx, actor, status, &active, &mut report, &mut queue);

        let limit = self.config.max_chained_events;
        let mut processed: u32 = 0;
        while let Some(next) = queue.pop_front() {
            if processed >= limit {
                report.deferred_dropped = queue.len() + 1;
                warn!(
                    target: "combat::dispatch",
                    event = %next.event,
                    actor = %actor.id,
                    limit,
                    dropped = report.deferred_dropped,
                    "chained event limit reached, dropping follow-ups"
                );
                report.failures.push(DispatchFailure {
                    event: next.event,
                    modifier: None,
                    action: None,
                    error: ResolveError::ChainLimitReached {
                        event: next.event,
                        limit,
                    },
                });
                break;
            }
            processed += 1;

            let DeferredEvent { event, mut context } = next;
            trace!(target: "combat::dispatch", event = %event, "running follow-up event");
            self.dispatch_once(
                event,
                &mut context,
                actor,
                status,
                &active,
                &mut report,
                &mut queue,
            );
        }
        report.deferred_processed = processed as usize;
        report
    }

    #[allow(clippy::too_many_arguments)]
    fn dispatch_once(
        &mut self,
        event: EventType,
        ctx: &mut EventContext,
        actor: &mut CombatActor,
        status: &mut dyn StatusManager,
        active: &[Arc<ModifierDefinition>],
        report: &mut DispatchReport,
        queue: &mut VecDeque<DeferredEvent>,
    ) {
        self.nonce += 1;
        self.phase = DispatchPhase::Dispatching(event);

        let mut effects: Vec<(&ModifierDefinition, &Effect)> = active
            .iter()
            .flat_map(|d| d.effects_for(event).map(move |e| (&**d, e)))
            .collect();
        effects.sort_by_key(|(_, e)| Reverse(e.priority));

        let state = self.states.entry(actor.id).or_default();
        let mut env = ResolveEnv::new(
            event,
            status,
            &*self.rng,
            &self.config,
            &self.behaviors,
        )
        .with_seed(self.combat_seed, self.nonce);

        for (index, (definition, effect)) in effects.into_iter().enumerate() {
            let scratch = state.scope(&definition.id);
            if !evaluate_all(&effect.conditions, ctx, actor, scratch, &env, index as u32) {
                trace!(
                    target: "combat::dispatch",
                    modifier = %definition.id,
                    event = %event,
                    "conditions not met"
                );
                continue;
            }
            report.effects_fired += 1;

            for action in effect.ordered_actions() {
                report.actions_run += 1;
                match resolve(action, ctx, actor, scratch, definition, &mut env) {
                    Ok(applied) => trace!(
                        target: "combat::actions",
                        modifier = %definition.id,
                        action = action.kind.name(),
                        applied = ?applied,
                        "action resolved"
                    ),
                    Err(error) => {
                        warn!(
                            target: "combat::actions",
                            modifier = %definition.id,
                            action = action.kind.name(),
                            event = %event,
                            code = error.error_code(),
                            severity = error.severity().as_str(),
                            "action skipped: {error}"
                        );
                        report.failures.push(DispatchFailure {
                            event,
                            modifier: Some(definition.id.clone()),
                            action: Some(action.kind.name()),
                            error,
                        });
                    }
                }
            }
        }

        queue.extend(env.take_deferred());
        for change in actor.stacks.drain_changes() {
            for follow_up in stack_events(&change) {
                if active.iter().any(|d| d.listens_to(follow_up)) {
                    queue.push_back(DeferredEvent {
                        event: follow_up,
                        context: ctx.follow_up().with_stack_change(change),
                    });
                }
            }
        }

        self.phase = DispatchPhase::Idle;
    }
}

/// Follow-up events raised by a stack transition.
fn stack_events(change: &StackChange) -> impl Iterator<Item = EventType> {
    [
        (change.gained(), EventType::OnStackGained),
        (change.depleted(), EventType::OnStackDepleted),
        (change.reached_max(), EventType::OnStackMaxed),
    ]
    .into_iter()
    .filter_map(|(raised, event)| raised.then_some(event))
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("modifiers", &self.registry.len())
            .field("behaviors", &self.behaviors)
            .field("config", &self.config)
            .field("combat_seed", &self.combat_seed)
            .field("nonce", &self.nonce)
            .field("phase", &self.phase)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Action, ActionKind};
    use crate::stacks::StackKind;
    use crate::status::StatusLedger;

    fn dispatcher_with(definition: ModifierDefinition) -> EventDispatcher {
        EventDispatcher::new(ModifierRegistry::from_definitions([definition]))
    }

    #[test]
    fn phase_returns_to_idle() {
        let mut dispatcher = dispatcher_with(ModifierDefinition::new("noop", "Noop"));
        let mut actor = CombatActor::player(30.0, 3.0).with_unlocks(["Noop"]);
        let mut status = StatusLedger::new();
        dispatcher.process_event(
            EventType::OnTurnStart,
            &mut EventContext::new(),
            &mut actor,
            &mut status,
        );
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
        assert_eq!(dispatcher.nonce(), 1);
    }

    #[test]
    fn higher_priority_effects_run_first() {
        let definition = ModifierDefinition::new("order", "Order")
            .with_effect(
                Effect::new(EventType::OnCardPlayed)
                    .then(ActionKind::ModifyDamageMultiplier { multiplier: 2.0 }),
            )
            .with_effect(
                Effect::new(EventType::OnCardPlayed)
                    .with_priority(5)
                    .then(ActionKind::SetStacks { stack: StackKind::Focus, value: 1 })
                    .then(Action::ordered(ActionKind::AddFlatDamage { amount: 3.0 }, -1)),
            );
        let mut dispatcher = dispatcher_with(definition);
        let mut actor = CombatActor::player(30.0, 3.0).with_unlocks(["Order"]);
        let mut status = StatusLedger::new();
        let mut ctx = EventContext::new();

        let report =
            dispatcher.process_event(EventType::OnCardPlayed, &mut ctx, &mut actor, &mut status);
        assert_eq!(report.effects_fired, 2);
        assert_eq!(report.actions_run, 3);
        assert_eq!(ctx.damage, Some(3.0));
        assert_eq!(ctx.damage_multiplier, 2.0);
        assert!(report.is_clean());
    }

    #[test]
    fn stack_transitions_become_follow_up_events() {
        let definition = ModifierDefinition::new("maxed", "Maxed")
            .with_effect(
                Effect::new(EventType::OnCardPlayed)
                    .then(ActionKind::AddStacks { stack: StackKind::ArcaneCharge, amount: 4 }),
            )
            .with_effect(
                Effect::new(EventType::OnStackMaxed)
                    .then(ActionKind::ClearStacks { stack: StackKind::ArcaneCharge })
                    .then(ActionKind::AddGuard { amount: 10.0 }),
            );
        let mut dispatcher = dispatcher_with(definition);
        let mut actor = CombatActor::player(30.0, 3.0).with_unlocks(["Maxed"]);
        let mut status = StatusLedger::new();

        let report = dispatcher.process_event(
            EventType::OnCardPlayed,
            &mut EventContext::new(),
            &mut actor,
            &mut status,
        );
        assert_eq!(report.deferred_processed, 1);
        assert_eq!(actor.stacks.get_stacks(StackKind::ArcaneCharge), 0);
        assert_eq!(actor.guard.current, 10.0);
    }

    #[test]
    fn inactive_actor_runs_nothing() {
        let definition = ModifierDefinition::new("gated", "Gated").with_effect(
            Effect::new(EventType::OnCardPlayed).then(ActionKind::DrawCards { count: 1 }),
        );
        let mut dispatcher = dispatcher_with(definition);
        let mut actor = CombatActor::player(30.0, 3.0).with_unlocks(["Gatedx"]);
        let mut status = StatusLedger::new();
        let mut ctx = EventContext::new();

        let report =
            dispatcher.process_event(EventType::OnCardPlayed, &mut ctx, &mut actor, &mut status);
        assert_eq!(report.modifiers_considered, 0);
        assert_eq!(ctx.cards_to_draw, 0);
    }
}

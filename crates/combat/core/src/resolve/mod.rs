//! Condition evaluation and action resolution.
//!
//! This module provides:
//! - `ResolveEnv`: collaborators injected into every handler
//! - `conditions`: pure predicates over context, actor and modifier state
//! - `actions`: one handler per action kind
//! - `behaviors`: named special-case behaviors keyed by modifier id
//!
//! Handlers never call back into the dispatcher. Follow-up events are queued
//! on the environment and drained by the dispatcher after the current
//! dispatch returns.

pub mod actions;
pub mod behaviors;
pub mod conditions;

pub use actions::{Applied, resolve};
pub use behaviors::{BehaviorTable, ModifierBehavior};
pub use conditions::{evaluate, evaluate_all};

use crate::actor::{ActorId, CombatActor};
use crate::config::CombatConfig;
use crate::error::ResolveError;
use crate::modifier::{ContextKey, EventContext, EventType, Subject};
use crate::rng::{RngOracle, compute_seed, condition_stream, derive_seed, slot};
use crate::status::StatusManager;

/// A follow-up event queued during dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredEvent {
    pub event: EventType,
    pub context: EventContext,
}

/// Collaborators and dispatch-wide values passed to every handler.
pub struct ResolveEnv<'a> {
    /// Event currently being dispatched.
    pub event: EventType,
    pub status: &'a mut dyn StatusManager,
    pub rng: &'a dyn RngOracle,
    pub config: &'a CombatConfig,
    pub behaviors: &'a BehaviorTable,
    pub combat_seed: u64,
    /// Dispatch sequence number.
    pub nonce: u64,
    deferred: Vec<DeferredEvent>,
}

impl<'a> ResolveEnv<'a> {
    pub fn new(
        event: EventType,
        status: &'a mut dyn StatusManager,
        rng: &'a dyn RngOracle,
        config: &'a CombatConfig,
        behaviors: &'a BehaviorTable,
    ) -> Self {
        Self {
            event,
            status,
            rng,
            config,
            behaviors,
            combat_seed: 0,
            nonce: 0,
            deferred: Vec::new(),
        }
    }

    pub fn with_seed(mut self, combat_seed: u64, nonce: u64) -> Self {
        self.combat_seed = combat_seed;
        self.nonce = nonce;
        self
    }

    /// Roll in `[0, 100)` for `actor` at `slot`.
    pub fn roll(&self, actor: ActorId, slot: u32) -> f64 {
        self.rng
            .roll_percent(compute_seed(self.combat_seed, self.nonce, actor, slot))
    }

    /// Roll in `[0, 100)` for condition `condition_index` of effect
    /// `effect_index` in this dispatch.
    pub fn roll_condition(
        &self,
        actor: ActorId,
        effect_index: u32,
        condition_index: u32,
    ) -> f64 {
        let seed = compute_seed(self.combat_seed, self.nonce, actor, slot::CONDITION);
        self.rng
            .roll_percent(derive_seed(seed, condition_stream(effect_index, condition_index)))
    }

    /// Queues `event` to run after the current dispatch.
    pub fn defer(&mut self, event: EventType, context: EventContext) {
        self.deferred.push(DeferredEvent { event, context });
    }

    pub fn deferred(&self) -> &[DeferredEvent] {
        &self.deferred
    }

    pub fn take_deferred(&mut self) -> Vec<DeferredEvent> {
        std::mem::take(&mut self.deferred)
    }
}

/// Resolves which actor a subject refers to in this event.
pub fn subject_actor(
    subject: Subject,
    ctx: &EventContext,
    actor: &CombatActor,
) -> Result<ActorId, ResolveError> {
    match subject {
        Subject::Owner => Ok(actor.id),
        Subject::Target => ctx.target.ok_or(ResolveError::MissingTarget),
        Subject::Source => ctx.source.ok_or(ResolveError::MissingContext {
            key: ContextKey::Source,
        }),
    }
}

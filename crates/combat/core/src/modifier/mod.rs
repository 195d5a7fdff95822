//! Modifier data model.
//!
//! A [`ModifierDefinition`] bundles [`Effect`]s; each effect reacts to one
//! [`EventType`], gates on AND-combined [`Condition`]s and runs [`Action`]s in
//! execution order. Definitions are immutable and shared; mutable data lives
//! in the per-dispatch [`EventContext`] and the per-combat [`ModifierState`].

pub mod action;
pub mod condition;
pub mod context;
pub mod definition;
pub mod event;
pub mod state;

pub use action::{Action, ActionKind, Magnitude, Surge};
pub use condition::{Comparison, Condition, ConditionKind, Subject};
pub use context::{
    ContextKey, EchoRequest, ElementalDamage, EventContext, ExtraHit, PendingDamage,
};
pub use definition::{Effect, ModifierDefinition};
pub use event::EventType;
pub use state::{ModifierScratch, ModifierState, StateValue};

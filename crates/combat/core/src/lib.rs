//! Deterministic rules core for turn-based card combat.
//!
//! `combat-core` resolves what happens when a combat event occurs: which
//! data-defined modifiers are active for an actor, whether their conditions
//! hold, and what their actions change. It owns no I/O and no scheduling;
//! callers drive turns, hand in collaborators and read results back.
//!
//! - [`stacks`]: capped per-actor resource counters
//! - [`damage`]: the damage formula, critical rolls and resistances
//! - [`modifier`]: definitions, event context and persistent modifier state
//! - [`resolve`]: condition evaluation, action handlers and named behaviors
//! - [`dispatch`]: the registry and the event dispatcher
pub mod actor;
pub mod card;
pub mod config;
pub mod damage;
pub mod dispatch;
pub mod error;
pub mod modifier;
pub mod resolve;
pub mod rng;
pub mod stacks;
pub mod status;

pub use actor::{
    ActorId, ActorKind, Attributes, CombatActor, DamageTaken, DerivedStats, Guard, Meter,
    Resistances, Stagger, StatDelta, StatKind,
};
pub use card::{
    AttributeScaling, CardCategory, CardDescriptor, CardTags, CardType, Embossing, WeaponProfile,
};
pub use config::CombatConfig;
pub use damage::{
    CardAttack, CardDamage, DamageCalculation, DamageModifierSet, DamageModifiers, DamageType,
    apply_resistance, calculate_card_damage, calculate_card_damage_with_roll, calculate_damage,
    calculate_with_roll, mitigate,
};
pub use dispatch::{
    DispatchFailure, DispatchPhase, DispatchReport, EventDispatcher, ModifierRegistry,
    matches_unlock,
};
pub use error::{ErrorSeverity, GameError, ResolveError};
pub use modifier::{
    Action, ActionKind, Comparison, Condition, ConditionKind, ContextKey, Effect, EventContext,
    EventType, Magnitude, ModifierDefinition, ModifierScratch, ModifierState, Subject, Surge,
};
pub use resolve::{Applied, BehaviorTable, ModifierBehavior, ResolveEnv};
pub use rng::{FixedRoll, PcgRng, RngOracle, compute_seed};
pub use stacks::{StackChange, StackCounter, StackKind, StackObserver, StackProfile, StackStore};
pub use status::{StatusEffect, StatusEffectKind, StatusLedger, StatusManager};

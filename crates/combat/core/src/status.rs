//! Status effect collaborator.
//!
//! The rules core never owns status effects. It talks to a [`StatusManager`]
//! passed in by the caller; [`StatusLedger`] is the in-memory implementation
//! used by the combat session and by tests.
//!
//! # Turn-based Duration
//!
//! Durations are countdowns in turns. The caller advances them exactly once
//! per turn boundary through [`StatusLedger::advance_turn`]; nothing in the
//! core sleeps or schedules.

use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::actor::ActorId;
use crate::config::CombatConfig;

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    Bleed,
    Burn,
    Poison,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Takes more card damage; magnitude in percent.
    Vulnerable,
    /// Deals less card damage; magnitude in percent.
    Weakened,
    Chilled,
    Shocked,
    /// Skips its next action.
    Stunned,

    // ========================================================================
    // Buffs
    // ========================================================================
    Fortified,
    Hasted,
    Regenerating,
    Empowered,
}

/// A single status effect instance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub magnitude: f64,
    /// Turns remaining; `None` lasts until removed.
    pub remaining_turns: Option<u32>,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, magnitude: f64, turns: u32) -> Self {
        Self {
            kind,
            magnitude,
            remaining_turns: Some(turns),
        }
    }

    pub fn permanent(kind: StatusEffectKind, magnitude: f64) -> Self {
        Self {
            kind,
            magnitude,
            remaining_turns: None,
        }
    }
}

/// Interface the core uses to read and attach status effects.
pub trait StatusManager {
    /// Whether this manager holds status state for `actor`.
    fn tracks(&self, actor: ActorId) -> bool;

    /// Attaches an effect. Returns false when the actor is untracked or full.
    fn add_status_effect(&mut self, actor: ActorId, effect: StatusEffect) -> bool;

    /// Removes every instance of `kind`. Returns true if anything was removed.
    fn remove_status_effect(&mut self, actor: ActorId, kind: StatusEffectKind) -> bool;

    fn has_status_effect(&self, actor: ActorId, kind: StatusEffectKind) -> bool;

    /// Sum of magnitudes over every instance of `kind`.
    fn total_magnitude(&self, actor: ActorId, kind: StatusEffectKind) -> f64;
}

type EffectList = ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>;

/// In-memory status manager with a fixed number of slots per actor.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger {
    actors: HashMap<ActorId, EffectList>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `actor`. Effects cannot be attached to untracked actors.
    pub fn register(&mut self, actor: ActorId) {
        self.actors.entry(actor).or_default();
    }

    /// Builder: track several actors.
    pub fn with_actors(mut self, actors: impl IntoIterator<Item = ActorId>) -> Self {
        for actor in actors {
            self.register(actor);
        }
        self
    }

    /// Drops all status state of a removed actor.
    pub fn forget(&mut self, actor: ActorId) {
        self.actors.remove(&actor);
    }

    pub fn effects(&self, actor: ActorId) -> &[StatusEffect] {
        self.actors
            .get(&actor)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Counts down every timed effect on `actor` by one turn and removes the
    /// ones that ran out. Returns the kinds that expired.
    pub fn advance_turn(&mut self, actor: ActorId) -> Vec<StatusEffectKind> {
        let Some(list) = self.actors.get_mut(&actor) else {
            return Vec::new();
        };

        let mut expired = Vec::new();
        list.retain(|effect| match effect.remaining_turns.as_mut() {
            Some(turns) => {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(effect.kind);
                    false
                } else {
                    true
                }
            }
            None => true,
        });
        expired
    }
}

impl StatusManager for StatusLedger {
    fn tracks(&self, actor: ActorId) -> bool {
        self.actors.contains_key(&actor)
    }

    fn add_status_effect(&mut self, actor: ActorId, effect: StatusEffect) -> bool {
        let Some(list) = self.actors.get_mut(&actor) else {
            return false;
        };
        list.try_push(effect).is_ok()
    }

    fn remove_status_effect(&mut self, actor: ActorId, kind: StatusEffectKind) -> bool {
        let Some(list) = self.actors.get_mut(&actor) else {
            return false;
        };
        let before = list.len();
        list.retain(|e| e.kind != kind);
        list.len() != before
    }

    fn has_status_effect(&self, actor: ActorId, kind: StatusEffectKind) -> bool {
        self.effects(actor).iter().any(|e| e.kind == kind)
    }

    fn total_magnitude(&self, actor: ActorId, kind: StatusEffectKind) -> f64 {
        self.effects(actor)
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.magnitude)
            .sum()
    }
}

//! Per-dispatch event context.
//!
//! An [`EventContext`] is created fresh by the caller for every event, mutated
//! by actions during dispatch and read back explicitly afterwards. Nothing in
//! it survives the dispatch; state that must persist lives in
//! [`super::ModifierState`].

use crate::actor::{ActorId, ActorKind};
use crate::card::CardDescriptor;
use crate::damage::DamageType;
use crate::stacks::StackChange;

/// Names of context values actions may read, used in data and diagnostics.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextKey {
    Damage,
    /// Damage just prevented (absorbed by guard or resisted).
    DamageReduced,
    DamageMultiplier,
    Turn,
    /// Current count of the stack that changed.
    StackCount,
    Card,
    Source,
    Target,
    DamageType,
}

/// An additional hit dealing a fraction of the card's damage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraHit {
    pub damage_fraction: f64,
}

/// Flat damage of another type added to the current hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementalDamage {
    pub damage_type: DamageType,
    pub amount: f64,
}

/// Request to duplicate cards carrying a persistent tag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EchoRequest {
    pub tag: String,
    pub copies: u32,
}

/// Damage an action wants dealt to another actor; applied by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingDamage {
    pub target: ActorId,
    pub amount: f64,
    pub damage_type: DamageType,
}

/// Transient values for one event dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct EventContext {
    /// Card being resolved, if the event came from a card.
    pub card: Option<CardDescriptor>,
    /// Actor that caused the event (the attacker for damage taken).
    pub source: Option<ActorId>,
    pub target: Option<ActorId>,
    pub target_kind: Option<ActorKind>,
    pub damage_type: Option<DamageType>,
    /// Damage amount so far; flat bonuses accumulate here.
    pub damage: Option<f64>,
    pub damage_reduced: Option<f64>,
    /// Generic multiplier folded in as a "more" modifier.
    pub damage_multiplier: f64,
    /// Increased damage fractions contributed by actions.
    pub increased_damage: Vec<f64>,
    /// More damage fractions contributed by actions.
    pub more_damage: Vec<f64>,
    pub added_elemental_damage: Vec<ElementalDamage>,
    pub extra_hits: Vec<ExtraHit>,
    pub is_critical: bool,
    pub crit_chance_bonus: f64,
    pub turn: u32,
    pub stack_change: Option<StackChange>,
    pub cards_to_draw: u32,
    pub cards_to_discard: u32,
    /// Persistent tags to attach to the resolving card.
    pub card_tags: Vec<String>,
    pub echoes: Vec<EchoRequest>,
    pub pending_damage: Vec<PendingDamage>,
}

impl Default for EventContext {
    fn default() -> Self {
        Self {
            card: None,
            source: None,
            target: None,
            target_kind: None,
            damage_type: None,
            damage: None,
            damage_reduced: None,
            damage_multiplier: 1.0,
            increased_damage: Vec::new(),
            more_damage: Vec::new(),
            added_elemental_damage: Vec::new(),
            extra_hits: Vec::new(),
            is_critical: false,
            crit_chance_bonus: 0.0,
            turn: 0,
            stack_change: None,
            cards_to_draw: 0,
            cards_to_discard: 0,
            card_tags: Vec::new(),
            echoes: Vec::new(),
            pending_damage: Vec::new(),
        }
    }
}

impl EventContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a card being played.
    pub fn for_card(card: CardDescriptor) -> Self {
        Self {
            damage_type: Some(card.damage_type),
            card: Some(card),
            ..Self::default()
        }
    }

    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_target(mut self, target: ActorId, kind: ActorKind) -> Self {
        self.target = Some(target);
        self.target_kind = Some(kind);
        self
    }

    pub fn with_source(mut self, source: ActorId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_damage(mut self, amount: f64, damage_type: DamageType) -> Self {
        self.damage = Some(amount);
        self.damage_type = Some(damage_type);
        self
    }

    pub fn with_damage_reduced(mut self, amount: f64) -> Self {
        self.damage_reduced = Some(amount);
        self
    }

    pub fn with_stack_change(mut self, change: StackChange) -> Self {
        self.stack_change = Some(change);
        self
    }

    /// Context for an event chained off this one: keeps who is involved and
    /// the turn, drops every accumulated value.
    pub fn follow_up(&self) -> Self {
        Self {
            source: self.source,
            target: self.target,
            target_kind: self.target_kind,
            turn: self.turn,
            ..Self::default()
        }
    }

    /// Reads a numeric context value.
    pub fn value(&self, key: ContextKey) -> Option<f64> {
        match key {
            ContextKey::Damage => self.damage,
            ContextKey::DamageReduced => self.damage_reduced,
            ContextKey::DamageMultiplier => Some(self.damage_multiplier),
            ContextKey::Turn => Some(self.turn as f64),
            ContextKey::StackCount => self.stack_change.map(|c| c.current as f64),
            ContextKey::Card
            | ContextKey::Source
            | ContextKey::Target
            | ContextKey::DamageType => None,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.card.as_ref().is_some_and(CardDescriptor::is_attack)
    }

    pub fn is_spell(&self) -> bool {
        self.card.as_ref().is_some_and(CardDescriptor::is_spell)
    }

    /// Adds flat damage, starting from zero when no amount is present yet.
    pub fn add_damage(&mut self, amount: f64) {
        *self.damage.get_or_insert(0.0) += amount;
    }

    /// `1 + Σ extra hit fractions`.
    pub fn hit_multiplier(&self) -> f64 {
        1.0 + self
            .extra_hits
            .iter()
            .map(|h| h.damage_fraction)
            .sum::<f64>()
    }

    /// Number of hits including the original one.
    pub fn hit_count(&self) -> usize {
        1 + self.extra_hits.len()
    }
}

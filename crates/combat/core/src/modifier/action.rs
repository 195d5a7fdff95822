//! Action definitions.
//!
//! Each [`ActionKind`] variant carries its own typed parameters. Percent
//! parameters are written in percent points (`25.0` means 25%) and converted
//! to fractions when folded into damage.

use crate::actor::{StatDelta, StatKind};
use crate::damage::DamageType;
use crate::stacks::StackKind;
use crate::status::StatusEffectKind;

use super::condition::Subject;
use super::context::ContextKey;
use super::event::EventType;

/// How the magnitude of an applied status effect is obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    Fixed(f64),
    /// `context[key] × scale`; fails when the key is absent.
    FromContext { key: ContextKey, scale: f64 },
    /// `owner stacks × per_stack`.
    FromStacks { stack: StackKind, per_stack: f64 },
}

/// A scripted burst: damage to the target, a resource cost on the owner and
/// a stack grant, applied together.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surge {
    pub damage: f64,
    pub damage_type: DamageType,
    /// Health paid, in percent of max health.
    #[cfg_attr(feature = "serde", serde(default))]
    pub health_cost_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: f64,
    pub stack: StackKind,
    pub stacks: u32,
}

/// One action kind with its strongly-typed parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    // ========================================================================
    // Stacks
    // ========================================================================
    AddStacks { stack: StackKind, amount: u32 },
    RemoveStacks { stack: StackKind, amount: u32 },
    SetStacks { stack: StackKind, value: u32 },
    ClearStacks { stack: StackKind },
    /// Adjusts the stack's bonus maximum by `delta`.
    ModifyStackMax { stack: StackKind, delta: i32 },

    // ========================================================================
    // Damage (written into the event context)
    // ========================================================================
    AddFlatDamage { amount: f64 },
    AddPercentDamage { percent: f64 },
    AddMorePercentDamage { percent: f64 },
    AddElementalDamage { damage_type: DamageType, amount: f64 },
    AddExtraHit { damage_fraction: f64 },
    ModifyDamageMultiplier { multiplier: f64 },
    AddCritChance { percent: f64 },

    // ========================================================================
    // Status effects
    // ========================================================================
    ApplyStatus {
        status: StatusEffectKind,
        magnitude: Magnitude,
        /// Duration in turns; `None` is permanent.
        #[cfg_attr(feature = "serde", serde(default))]
        turns: Option<u32>,
        #[cfg_attr(feature = "serde", serde(default))]
        subject: Subject,
    },
    RemoveStatus {
        status: StatusEffectKind,
        #[cfg_attr(feature = "serde", serde(default))]
        subject: Subject,
    },

    // ========================================================================
    // Actor
    // ========================================================================
    ModifyStat { stat: StatKind, delta: StatDelta },
    AddGuard { amount: f64 },
    AddMana { amount: f64 },
    /// Positive heals, negative costs health (bypassing guard).
    ModifyHealthPercent { percent: f64 },

    // ========================================================================
    // Cards (requests read back by the caller)
    // ========================================================================
    DrawCards { count: u32 },
    DiscardCards { count: u32 },
    TagCard { tag: String },
    EchoTaggedCards { tag: String, copies: u32 },

    // ========================================================================
    // Composite
    // ========================================================================
    Surge(Surge),
    /// Queues a follow-up event after the current dispatch returns.
    TriggerEvent { event: EventType },
    /// Runs the behavior registered under the owning modifier's id.
    Behavior,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddStacks { .. } => "add_stacks",
            Self::RemoveStacks { .. } => "remove_stacks",
            Self::SetStacks { .. } => "set_stacks",
            Self::ClearStacks { .. } => "clear_stacks",
            Self::ModifyStackMax { .. } => "modify_stack_max",
            Self::AddFlatDamage { .. } => "add_flat_damage",
            Self::AddPercentDamage { .. } => "add_percent_damage",
            Self::AddMorePercentDamage { .. } => "add_more_percent_damage",
            Self::AddElementalDamage { .. } => "add_elemental_damage",
            Self::AddExtraHit { .. } => "add_extra_hit",
            Self::ModifyDamageMultiplier { .. } => "modify_damage_multiplier",
            Self::AddCritChance { .. } => "add_crit_chance",
            Self::ApplyStatus { .. } => "apply_status",
            Self::RemoveStatus { .. } => "remove_status",
            Self::ModifyStat { .. } => "modify_stat",
            Self::AddGuard { .. } => "add_guard",
            Self::AddMana { .. } => "add_mana",
            Self::ModifyHealthPercent { .. } => "modify_health_percent",
            Self::DrawCards { .. } => "draw_cards",
            Self::DiscardCards { .. } => "discard_cards",
            Self::TagCard { .. } => "tag_card",
            Self::EchoTaggedCards { .. } => "echo_tagged_cards",
            Self::Surge(_) => "surge",
            Self::TriggerEvent { .. } => "trigger_event",
            Self::Behavior => "behavior",
        }
    }
}

/// An action plus its position within the effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub kind: ActionKind,
    /// Actions run in ascending order; ties keep definition order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub execution_order: i32,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            execution_order: 0,
        }
    }

    pub fn ordered(kind: ActionKind, execution_order: i32) -> Self {
        Self {
            kind,
            execution_order,
        }
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Self::new(kind)
    }
}

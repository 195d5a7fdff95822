//! Modifier definitions loaded from external data.

use super::action::Action;
use super::condition::Condition;
use super::event::EventType;

/// One event-triggered rule of a modifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub event_type: EventType,
    /// AND-combined.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
    /// Higher priority effects run first within one dispatch.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
}

impl Effect {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            conditions: Vec::new(),
            actions: Vec::new(),
            priority: 0,
        }
    }

    pub fn when(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn then(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Actions in ascending execution order, stable for ties.
    pub fn ordered_actions(&self) -> Vec<&Action> {
        let mut actions: Vec<&Action> = self.actions.iter().collect();
        actions.sort_by_key(|a| a.execution_order);
        actions
    }
}

/// An immutable, data-defined rule bundle unlocked through progression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierDefinition {
    pub id: String,
    /// Progression name that activates this modifier.
    pub linked_unlock_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub effects: Vec<Effect>,
}

impl ModifierDefinition {
    pub fn new(id: impl Into<String>, linked_unlock_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            linked_unlock_name: linked_unlock_name.into(),
            description: String::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn listens_to(&self, event: EventType) -> bool {
        self.effects.iter().any(|e| e.event_type == event)
    }

    pub fn effects_for(&self, event: EventType) -> impl Iterator<Item = &Effect> + '_ {
        self.effects.iter().filter(move |e| e.event_type == event)
    }
}

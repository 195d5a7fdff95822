//! Modifier registry: which definitions an actor's unlocks activate.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::modifier::ModifierDefinition;

/// Whether an unlocked progression name activates a definition linked to
/// `linked`.
///
/// Matches exactly, or as a numbered variant: `Foo_1` and `Foo_12` activate
/// `Foo`; `Foobar`, `Foo_` and `Foo_x` do not.
pub fn matches_unlock(unlock: &str, linked: &str) -> bool {
    if linked.is_empty() {
        return false;
    }
    if unlock == linked {
        return true;
    }
    unlock
        .strip_prefix(linked)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
}

/// Immutable modifier definitions shared across combats.
#[derive(Clone, Debug, Default)]
pub struct ModifierRegistry {
    definitions: Vec<Arc<ModifierDefinition>>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ModifierDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Adds a definition. A definition with the same id is replaced.
    pub fn register(&mut self, definition: ModifierDefinition) {
        let definition = Arc::new(definition);
        if let Some(existing) = self
            .definitions
            .iter_mut()
            .find(|d| d.id == definition.id)
        {
            warn!(
                target: "combat::registry",
                modifier = %definition.id,
                "duplicate modifier id, replacing earlier definition"
            );
            *existing = definition;
            return;
        }
        self.definitions.push(definition);
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ModifierDefinition>> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ModifierDefinition>> + '_ {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions activated by `unlocks`, in registration order.
    pub fn active_for(&self, unlocks: &[String]) -> Vec<Arc<ModifierDefinition>> {
        let active: Vec<_> = self
            .definitions
            .iter()
            .filter(|d| {
                unlocks
                    .iter()
                    .any(|unlock| matches_unlock(unlock, &d.linked_unlock_name))
            })
            .cloned()
            .collect();

        debug!(
            target: "combat::registry",
            unlocks = unlocks.len(),
            active = active.len(),
            "resolved active modifiers"
        );
        active
    }
}

//! Persistent per-modifier state.
//!
//! Values survive across events for the whole combat and are cleared at
//! combat start. Every modifier gets its own [`ModifierScratch`], so two
//! modifiers using the same key never collide.

use std::collections::{BTreeSet, HashMap};

/// Value stored under one scratch key.
#[derive(Clone, Debug, PartialEq)]
pub enum StateValue {
    Count(i64),
    Flag(bool),
    Text(String),
    Set(BTreeSet<String>),
}

/// Key/value store owned by a single modifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierScratch {
    values: HashMap<String, StateValue>,
}

impl ModifierScratch {
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    /// Integer value, zero when absent or of another type.
    pub fn count(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(StateValue::Count(value)) => *value,
            _ => 0,
        }
    }

    pub fn set_count(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), StateValue::Count(value));
    }

    /// Adds one and returns the new count.
    pub fn increment(&mut self, key: &str) -> i64 {
        let next = self.count(key) + 1;
        self.set_count(key, next);
        next
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(StateValue::Flag(true)))
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_owned(), StateValue::Flag(value));
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(StateValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .insert(key.to_owned(), StateValue::Text(value.into()));
    }

    pub fn contains_member(&self, key: &str, member: &str) -> bool {
        match self.values.get(key) {
            Some(StateValue::Set(set)) => set.contains(member),
            _ => false,
        }
    }

    /// Inserts into the set under `key`. Returns false if already present.
    pub fn insert_member(&mut self, key: &str, member: impl Into<String>) -> bool {
        let entry = self
            .values
            .entry(key.to_owned())
            .or_insert_with(|| StateValue::Set(BTreeSet::new()));
        if !matches!(entry, StateValue::Set(_)) {
            *entry = StateValue::Set(BTreeSet::new());
        }
        match entry {
            StateValue::Set(set) => set.insert(member.into()),
            _ => false,
        }
    }

    pub fn member_count(&self, key: &str) -> usize {
        match self.values.get(key) {
            Some(StateValue::Set(set)) => set.len(),
            _ => 0,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<StateValue> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// State of every modifier active on one actor, namespaced by modifier id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierState {
    scopes: HashMap<String, ModifierScratch>,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch space of `modifier_id`, created on first use.
    pub fn scope(&mut self, modifier_id: &str) -> &mut ModifierScratch {
        self.scopes.entry(modifier_id.to_owned()).or_default()
    }

    pub fn get(&self, modifier_id: &str) -> Option<&ModifierScratch> {
        self.scopes.get(modifier_id)
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.values().all(ModifierScratch::is_empty)
    }
}

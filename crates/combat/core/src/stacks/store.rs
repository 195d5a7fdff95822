//! Per-actor stack storage.

use std::collections::{BTreeMap, VecDeque};

use crate::config::CombatConfig;

use super::counter::{StackChange, StackCounter};
use super::kind::StackKind;

/// Receives stack change notifications.
pub trait StackObserver {
    fn on_stack_changed(&mut self, change: &StackChange);
}

impl<F: FnMut(&StackChange)> StackObserver for F {
    fn on_stack_changed(&mut self, change: &StackChange) {
        self(change)
    }
}

/// All stack counters owned by one actor.
///
/// Counters are created lazily on first access. Every effective mutation is
/// appended to a journal; observers receive the journal through
/// [`StackStore::notify`], and the dispatcher drains it to schedule
/// follow-up events.
///
/// The journal keeps at most [`CombatConfig::MAX_STACK_JOURNAL`] entries.
/// Stores that are never dispatched on (enemies, caller-side bookkeeping)
/// should be drained by the caller; otherwise the oldest entries are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackStore {
    counters: BTreeMap<StackKind, StackCounter>,
    #[cfg_attr(feature = "serde", serde(skip))]
    journal: VecDeque<StackChange>,
}

impl StackStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter_mut(&mut self, kind: StackKind) -> &mut StackCounter {
        self.counters
            .entry(kind)
            .or_insert_with(|| StackCounter::new(kind))
    }

    fn record(&mut self, change: Option<StackChange>) -> Option<StackChange> {
        if let Some(change) = change {
            self.push_change(change);
        }
        change
    }

    fn push_change(&mut self, change: StackChange) {
        if self.journal.len() == CombatConfig::MAX_STACK_JOURNAL {
            self.journal.pop_front();
        }
        self.journal.push_back(change);
    }

    pub fn add_stacks(&mut self, kind: StackKind, amount: u32) -> Option<StackChange> {
        let change = self.counter_mut(kind).add(amount);
        self.record(change)
    }

    pub fn remove_stacks(&mut self, kind: StackKind, amount: u32) -> Option<StackChange> {
        let change = self.counter_mut(kind).remove(amount);
        self.record(change)
    }

    pub fn set_stacks(&mut self, kind: StackKind, value: u32) -> Option<StackChange> {
        let change = self.counter_mut(kind).set(value);
        self.record(change)
    }

    pub fn clear_stacks(&mut self, kind: StackKind) -> Option<StackChange> {
        let change = self.counter_mut(kind).clear();
        self.record(change)
    }

    pub fn set_bonus_max(&mut self, kind: StackKind, bonus: i32) -> Option<StackChange> {
        let change = self.counter_mut(kind).set_bonus_max(bonus);
        self.record(change)
    }

    /// Adds `delta` to the current bonus maximum.
    pub fn modify_bonus_max(&mut self, kind: StackKind, delta: i32) -> Option<StackChange> {
        let bonus = self.bonus_max(kind).saturating_add(delta);
        self.set_bonus_max(kind, bonus)
    }

    pub fn get_stacks(&self, kind: StackKind) -> u32 {
        self.counters.get(&kind).map_or(0, StackCounter::current)
    }

    pub fn has_stacks(&self, kind: StackKind) -> bool {
        self.get_stacks(kind) > 0
    }

    pub fn max_stacks(&self, kind: StackKind) -> u32 {
        self.counters
            .get(&kind)
            .map_or(kind.profile().base_max, StackCounter::max)
    }

    pub fn bonus_max(&self, kind: StackKind) -> i32 {
        self.counters.get(&kind).map_or(0, |c| c.bonus_max)
    }

    pub fn counter(&self, kind: StackKind) -> Option<&StackCounter> {
        self.counters.get(&kind)
    }

    /// Combat-start reset: every counter back to zero with no bonus capacity.
    pub fn reset_all(&mut self) {
        let changes: Vec<_> = self
            .counters
            .values_mut()
            .filter_map(StackCounter::reset)
            .collect();
        for change in changes {
            self.push_change(change);
        }
    }

    /// Clears counters whose profile is scoped to a single turn.
    pub fn reset_turn_scoped(&mut self) {
        let changes: Vec<_> = self
            .counters
            .values_mut()
            .filter(|c| c.kind.profile().resets_on_turn_start)
            .filter_map(StackCounter::clear)
            .collect();
        for change in changes {
            self.push_change(change);
        }
    }

    /// Product of every kind's damage multiplier at its current count.
    pub fn damage_multiplier(&self) -> f64 {
        self.counters
            .values()
            .map(|c| c.kind.profile().damage_multiplier(c.current()))
            .product()
    }

    pub fn speed_bonus(&self) -> f64 {
        self.counters
            .values()
            .map(|c| c.kind.profile().speed_bonus(c.current()))
            .sum()
    }

    pub fn crit_chance_bonus(&self) -> f64 {
        self.counters
            .values()
            .map(|c| c.kind.profile().crit_chance_bonus(c.current()))
            .sum()
    }

    /// Iterates over counters with a non-zero value.
    pub fn active(&self) -> impl Iterator<Item = &StackCounter> + '_ {
        self.counters.values().filter(|c| c.current() > 0)
    }

    /// Removes and returns all recorded changes, oldest first.
    pub fn drain_changes(&mut self) -> Vec<StackChange> {
        self.journal.drain(..).collect()
    }

    /// Number of changes waiting in the journal.
    pub fn pending_changes(&self) -> usize {
        self.journal.len()
    }

    /// Delivers all recorded changes to `observer` and clears the journal.
    pub fn notify(&mut self, observer: &mut impl StackObserver) {
        for change in self.journal.drain(..) {
            observer.on_stack_changed(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_reads_as_zero() {
        let store = StackStore::new();
        assert_eq!(store.get_stacks(StackKind::Corruption), 0);
        assert_eq!(store.max_stacks(StackKind::Corruption), 10);
    }

    #[test]
    fn notifies_only_effective_changes() {
        let mut store = StackStore::new();
        store.add_stacks(StackKind::Flow, 2);
        store.remove_stacks(StackKind::Corruption, 3); // already zero
        store.add_stacks(StackKind::Flow, 10);
        store.add_stacks(StackKind::Flow, 1); // already full

        let mut seen = Vec::new();
        store.notify(&mut |change: &StackChange| seen.push((change.previous, change.current)));
        assert_eq!(seen, vec![(0, 2), (2, 5)]);
        assert!(store.drain_changes().is_empty());
    }

    #[test]
    fn derived_multiplier_combines_kinds() {
        let mut store = StackStore::new();
        store.add_stacks(StackKind::Corruption, 5); // +15%
        store.add_stacks(StackKind::Flow, 2); // +10%
        let expected = 1.15 * 1.10;
        assert!((store.damage_multiplier() - expected).abs() < 1e-9);
        assert_eq!(store.speed_bonus(), 4.0);
    }

    #[test]
    fn turn_reset_only_touches_turn_scoped_kinds() {
        let mut store = StackStore::new();
        store.add_stacks(StackKind::Fortitude, 4);
        store.add_stacks(StackKind::Flow, 3);
        store.drain_changes();

        store.reset_turn_scoped();
        assert_eq!(store.get_stacks(StackKind::Fortitude), 0);
        assert_eq!(store.get_stacks(StackKind::Flow), 3);
        assert_eq!(store.drain_changes().len(), 1);
    }

    #[test]
    fn reset_all_drops_bonus_capacity() {
        let mut store = StackStore::new();
        store.set_bonus_max(StackKind::BattleRhythm, 2);
        store.add_stacks(StackKind::BattleRhythm, 5);
        store.reset_all();
        assert_eq!(store.get_stacks(StackKind::BattleRhythm), 0);
        assert_eq!(store.max_stacks(StackKind::BattleRhythm), 3);
    }

    #[test]
    fn undrained_journal_keeps_only_latest_changes() {
        let mut store = StackStore::new();
        for _ in 0..10_000 {
            store.add_stacks(StackKind::Flow, 1);
            store.remove_stacks(StackKind::Flow, 1);
        }
        store.add_stacks(StackKind::Flow, 3);
        assert_eq!(store.pending_changes(), CombatConfig::MAX_STACK_JOURNAL);

        let changes = store.drain_changes();
        assert_eq!(changes.len(), CombatConfig::MAX_STACK_JOURNAL);
        let last = changes.last().unwrap();
        assert_eq!((last.previous, last.current), (0, 3));
        assert_eq!(store.pending_changes(), 0);
    }
}

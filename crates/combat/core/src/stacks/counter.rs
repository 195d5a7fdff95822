//! A single capped stack counter.

use super::kind::StackKind;

/// One resource counter: `0 ≤ current ≤ max()` holds after every call.
///
/// Out-of-range requests are clamped, never rejected. Each mutator returns the
/// resulting [`StackChange`] only when the clamped value differs from the
/// previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackCounter {
    pub kind: StackKind,
    pub base_max: u32,
    pub bonus_max: i32,
    current: u32,
}

/// Observable transition of a stack counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackChange {
    pub kind: StackKind,
    pub previous: u32,
    pub current: u32,
    pub max: u32,
}

impl StackChange {
    pub fn delta(&self) -> i64 {
        self.current as i64 - self.previous as i64
    }

    pub fn gained(&self) -> bool {
        self.current > self.previous
    }

    /// The counter went from non-zero to zero.
    pub fn depleted(&self) -> bool {
        self.previous > 0 && self.current == 0
    }

    /// The counter just reached its cap.
    pub fn reached_max(&self) -> bool {
        self.max > 0 && self.current == self.max && self.previous < self.max
    }
}

impl StackCounter {
    /// Creates an empty counter using the kind's base maximum.
    pub fn new(kind: StackKind) -> Self {
        Self {
            kind,
            base_max: kind.profile().base_max,
            bonus_max: 0,
            current: 0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Effective cap: `base_max + bonus_max`, never below zero.
    pub fn max(&self) -> u32 {
        (self.base_max as i64 + self.bonus_max as i64).clamp(0, u32::MAX as i64) as u32
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max()
    }

    pub fn add(&mut self, amount: u32) -> Option<StackChange> {
        self.set(self.current.saturating_add(amount))
    }

    pub fn remove(&mut self, amount: u32) -> Option<StackChange> {
        self.set(self.current.saturating_sub(amount))
    }

    pub fn clear(&mut self) -> Option<StackChange> {
        self.set(0)
    }

    /// Sets the counter, clamping to `[0, max()]`.
    pub fn set(&mut self, value: u32) -> Option<StackChange> {
        let previous = self.current;
        self.current = value.min(self.max());
        self.change_from(previous)
    }

    /// Replaces the bonus maximum and re-clamps the current value.
    pub fn set_bonus_max(&mut self, bonus: i32) -> Option<StackChange> {
        let previous = self.current;
        self.bonus_max = bonus;
        self.current = self.current.min(self.max());
        self.change_from(previous)
    }

    /// Combat-start reset: zero count and no bonus capacity.
    pub fn reset(&mut self) -> Option<StackChange> {
        let previous = self.current;
        self.bonus_max = 0;
        self.current = 0;
        self.change_from(previous)
    }

    fn change_from(&self, previous: u32) -> Option<StackChange> {
        (previous != self.current).then(|| StackChange {
            kind: self.kind,
            previous,
            current: self.current,
            max: self.max(),
        })
    }
}

//! Stack system - generic per-actor resource counters.
//!
//! Every stack is a `{kind, base_max, bonus_max, current}` counter with the
//! invariant `0 ≤ current ≤ base_max + bonus_max`. Mutations clamp instead of
//! failing, and a change is reported only when the clamped value actually
//! moved.
//!
//! Derived values (damage multiplier, speed, critical chance) are computed
//! from the current count through the kind's [`StackProfile`] on every read.

mod counter;
mod kind;
mod store;

pub use counter::{StackChange, StackCounter};
pub use kind::{StackKind, StackProfile};
pub use store::{StackObserver, StackStore};

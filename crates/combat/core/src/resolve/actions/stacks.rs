//! Stack mutations on the owning actor.

use crate::actor::CombatActor;
use crate::stacks::StackKind;

use super::Applied;

pub(super) fn add(actor: &mut CombatActor, kind: StackKind, amount: u32) -> Applied {
    Applied::from_stack_change(actor.stacks.add_stacks(kind, amount))
}

pub(super) fn remove(actor: &mut CombatActor, kind: StackKind, amount: u32) -> Applied {
    Applied::from_stack_change(actor.stacks.remove_stacks(kind, amount))
}

pub(super) fn set(actor: &mut CombatActor, kind: StackKind, value: u32) -> Applied {
    Applied::from_stack_change(actor.stacks.set_stacks(kind, value))
}

pub(super) fn clear(actor: &mut CombatActor, kind: StackKind) -> Applied {
    Applied::from_stack_change(actor.stacks.clear_stacks(kind))
}

/// Shifts the bonus maximum; the current count is clamped to the new cap.
pub(super) fn modify_max(actor: &mut CombatActor, kind: StackKind, delta: i32) -> Applied {
    Applied::from_stack_change(actor.stacks.modify_bonus_max(kind, delta))
}

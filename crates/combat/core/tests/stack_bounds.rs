use combat_core::{StackKind, StackStore};
use proptest::prelude::*;
use strum::IntoEnumIterator;

#[derive(Clone, Debug)]
enum Op {
    Add(u32),
    Remove(u32),
    SetBonusMax(i32),
    Set(u32),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..50).prop_map(Op::Add),
        (0u32..50).prop_map(Op::Remove),
        (-30i32..30).prop_map(Op::SetBonusMax),
        (0u32..80).prop_map(Op::Set),
        Just(Op::Clear),
    ]
}

fn kind() -> impl Strategy<Value = StackKind> {
    let kinds: Vec<_> = StackKind::iter().collect();
    proptest::sample::select(kinds)
}

proptest! {
    #[test]
    fn current_stays_within_bounds(kind in kind(), ops in proptest::collection::vec(op(), 1..64)) {
        let mut store = StackStore::new();
        for op in ops {
            let before = store.get_stacks(kind);
            let change = match op {
                Op::Add(n) => store.add_stacks(kind, n),
                Op::Remove(n) => store.remove_stacks(kind, n),
                Op::SetBonusMax(b) => store.set_bonus_max(kind, b),
                Op::Set(v) => store.set_stacks(kind, v),
                Op::Clear => store.clear_stacks(kind),
            };

            let current = store.get_stacks(kind);
            let cap = (kind.profile().base_max as i64 + store.bonus_max(kind) as i64).max(0) as u32;
            prop_assert!(current <= cap, "{current} > {cap}");
            prop_assert_eq!(store.max_stacks(kind), cap);

            // a change is reported exactly when the value moved
            prop_assert_eq!(change.is_some(), current != before);
        }
    }
}

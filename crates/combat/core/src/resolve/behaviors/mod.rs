//! Named modifier behaviors.
//!
//! A behavior is special-case logic that generic actions cannot express. It
//! is registered under the id of the modifier it belongs to and runs when
//! that modifier's effect contains an `ActionKind::Behavior` action. A
//! behavior only sees the event context, its owner and its own scratch
//! state, so it never depends on the order of unrelated modifiers.

mod battle_rhythm;
mod blood_price;
mod flow_state;
mod momentum;

pub use battle_rhythm::BattleRhythm;
pub use blood_price::BloodPrice;
pub use flow_state::FlowState;
pub use momentum::RelentlessMomentum;

use std::collections::HashMap;
use std::sync::Arc;

use crate::actor::CombatActor;
use crate::error::ResolveError;
use crate::modifier::{EventContext, ModifierScratch};

use super::{Applied, ResolveEnv};

/// Special-case logic attached to a modifier id.
pub trait ModifierBehavior: Send + Sync {
    /// Modifier id this behavior is registered under.
    fn id(&self) -> &'static str;

    fn apply(
        &self,
        ctx: &mut EventContext,
        actor: &mut CombatActor,
        state: &mut ModifierScratch,
        env: &mut ResolveEnv<'_>,
    ) -> Result<Applied, ResolveError>;
}

/// Behaviors by modifier id.
#[derive(Clone, Default)]
pub struct BehaviorTable {
    handlers: HashMap<&'static str, Arc<dyn ModifierBehavior>>,
}

impl BehaviorTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with every built-in behavior.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(Arc::new(BattleRhythm));
        table.register(Arc::new(FlowState));
        table.register(Arc::new(RelentlessMomentum));
        table.register(Arc::new(BloodPrice));
        table
    }

    /// Registers `behavior`, replacing any behavior with the same id.
    pub fn register(&mut self, behavior: Arc<dyn ModifierBehavior>) {
        self.handlers.insert(behavior.id(), behavior);
    }

    pub fn get(&self, id: &str) -> Option<&dyn ModifierBehavior> {
        self.handlers.get(id).map(|b| b.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered ids (for debugging).
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}

impl std::fmt::Debug for BehaviorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("BehaviorTable").field("ids", &ids).finish()
    }
}

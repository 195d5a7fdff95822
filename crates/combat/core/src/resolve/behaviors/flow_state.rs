//! Flow State: alternating between attacks and spells builds Flow.

use crate::actor::CombatActor;
use crate::error::ResolveError;
use crate::modifier::{ContextKey, EventContext, EventType, ModifierScratch};
use crate::resolve::{Applied, ModifierBehavior, ResolveEnv};
use crate::stacks::StackKind;

const LAST_CATEGORY: &str = "last_category";

/// Gains one Flow stack whenever the played card's category differs from
/// the previous card's. The last category carries over between turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlowState;

impl ModifierBehavior for FlowState {
    fn id(&self) -> &'static str {
        "flow_state"
    }

    fn apply(
        &self,
        ctx: &mut EventContext,
        actor: &mut CombatActor,
        state: &mut ModifierScratch,
        env: &mut ResolveEnv<'_>,
    ) -> Result<Applied, ResolveError> {
        if env.event != EventType::OnCardPlayed {
            return Ok(Applied::Nothing);
        }
        let card = ctx.card.as_ref().ok_or(ResolveError::MissingContext {
            key: ContextKey::Card,
        })?;
        let category = card.category();
        let category: &str = category.as_ref();

        let switched = state
            .text(LAST_CATEGORY)
            .is_some_and(|last| last != category);
        state.set_text(LAST_CATEGORY, category);

        if switched {
            Ok(Applied::from_stack_change(
                actor.stacks.add_stacks(StackKind::Flow, 1),
            ))
        } else {
            Ok(Applied::Behavior(self.id()))
        }
    }
}

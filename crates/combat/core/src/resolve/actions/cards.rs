//! Card requests. The core has no deck; these are written into the event
//! context for the caller to carry out.

use crate::error::ResolveError;
use crate::modifier::{ContextKey, EchoRequest, EventContext};

use super::Applied;

pub(super) fn draw(ctx: &mut EventContext, count: u32) -> Applied {
    ctx.cards_to_draw = ctx.cards_to_draw.saturating_add(count);
    Applied::Context
}

pub(super) fn discard(ctx: &mut EventContext, count: u32) -> Applied {
    ctx.cards_to_discard = ctx.cards_to_discard.saturating_add(count);
    Applied::Context
}

/// Marks the resolving card with a persistent tag.
pub(super) fn tag(ctx: &mut EventContext, tag: &str) -> Result<Applied, ResolveError> {
    let card = ctx.card.as_mut().ok_or(ResolveError::MissingContext {
        key: ContextKey::Card,
    })?;
    if card.has_persistent_tag(tag) {
        return Ok(Applied::Nothing);
    }
    card.persistent_tags.push(tag.to_owned());
    ctx.card_tags.push(tag.to_owned());
    Ok(Applied::Context)
}

pub(super) fn echo(
    ctx: &mut EventContext,
    tag: &str,
    copies: u32,
) -> Result<Applied, ResolveError> {
    if copies == 0 {
        return Err(ResolveError::InvalidParameter {
            name: "copies",
            reason: "echo needs at least one copy".into(),
        });
    }
    ctx.echoes.push(EchoRequest {
        tag: tag.to_owned(),
        copies,
    });
    Ok(Applied::Context)
}

//! Status effect attachment through the injected status manager.

use tracing::debug;

use crate::actor::CombatActor;
use crate::error::ResolveError;
use crate::modifier::{EventContext, Magnitude, Subject};
use crate::resolve::{ResolveEnv, subject_actor};
use crate::status::{StatusEffect, StatusEffectKind};

use super::Applied;

const COLLABORATOR: &str = "status manager";

fn magnitude_of(
    magnitude: Magnitude,
    ctx: &EventContext,
    actor: &CombatActor,
) -> Result<f64, ResolveError> {
    match magnitude {
        Magnitude::Fixed(value) => Ok(value),
        Magnitude::FromContext { key, scale } => ctx
            .value(key)
            .map(|value| value * scale)
            .ok_or(ResolveError::MissingContext { key }),
        Magnitude::FromStacks { stack, per_stack } => {
            Ok(actor.stacks.get_stacks(stack) as f64 * per_stack)
        }
    }
}

pub(super) fn apply(
    ctx: &EventContext,
    actor: &CombatActor,
    env: &mut ResolveEnv<'_>,
    kind: StatusEffectKind,
    magnitude: Magnitude,
    turns: Option<u32>,
    subject: Subject,
) -> Result<Applied, ResolveError> {
    let target = subject_actor(subject, ctx, actor)?;
    let magnitude = magnitude_of(magnitude, ctx, actor)?;
    if magnitude <= 0.0 {
        return Ok(Applied::Nothing);
    }
    if !env.status.tracks(target) {
        return Err(ResolveError::CollaboratorUnavailable {
            actor: target,
            collaborator: COLLABORATOR,
        });
    }

    let effect = match turns {
        Some(turns) => StatusEffect::new(kind, magnitude, turns),
        None => StatusEffect::permanent(kind, magnitude),
    };
    if !env.status.add_status_effect(target, effect) {
        debug!(
            target: "combat::actions",
            actor = %target,
            status = %kind,
            "status list full, effect dropped"
        );
        return Ok(Applied::Nothing);
    }

    Ok(Applied::StatusApplied {
        actor: target,
        kind,
        magnitude,
    })
}

pub(super) fn remove(
    ctx: &EventContext,
    actor: &CombatActor,
    env: &mut ResolveEnv<'_>,
    kind: StatusEffectKind,
    subject: Subject,
) -> Result<Applied, ResolveError> {
    let target = subject_actor(subject, ctx, actor)?;
    if !env.status.tracks(target) {
        return Err(ResolveError::CollaboratorUnavailable {
            actor: target,
            collaborator: COLLABORATOR,
        });
    }

    if env.status.remove_status_effect(target, kind) {
        Ok(Applied::StatusRemoved {
            actor: target,
            kind,
        })
    } else {
        Ok(Applied::Nothing)
    }
}

//! Event dispatch.
//!
//! The [`ModifierRegistry`] decides which definitions an actor's unlocks
//! activate; the [`EventDispatcher`] routes each event to their matching
//! effects and drains follow-up events afterwards.

mod dispatcher;
mod registry;
mod report;

pub use dispatcher::{DispatchPhase, EventDispatcher};
pub use registry::{ModifierRegistry, matches_unlock};
pub use report::{DispatchFailure, DispatchReport};

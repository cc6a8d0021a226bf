pub mod core;
pub mod feedback;

use praatje_framework::loader::HandlerSet;

use crate::context::Services;

/// Callback bindings for every definition shipped under `interactions/`.
pub fn handlers() -> HandlerSet<Services> {
    let set = HandlerSet::new();
    let set = core::handlers(set);
    feedback::handlers(set)
}

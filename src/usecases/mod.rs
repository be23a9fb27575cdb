//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod chat_session;
pub mod chat_turn;
pub mod check_batch;
pub mod context;
pub mod contracts;
pub mod domain_context;
pub mod extract;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}

//! Domain layer: core entities and business rules.

pub mod availability;
pub mod chat;
pub mod clock;
pub mod name;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}

//! Infrastructure layer: config, logging, persistence, and OS integrations.

pub mod config;
pub mod contracts;
pub mod domain_cache;
pub mod error;
pub mod logging;
pub mod secrets;
pub mod storage_layout;
#[cfg(test)]
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}

//! Domain availability lookup service integration.

mod client;

pub use client::WhoisXmlClient;

/// Returns the whois module name for smoke checks.
pub fn module_name() -> &'static str {
    "whois"
}

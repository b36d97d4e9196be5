//! `BuildConfig` — The ordered rule list plus the build-target tag
//!
//! The host bundler constructs one of these per output bundle, hands it to
//! [`transform`](crate::transform) exactly once, then consumes it read-only
//! for the rest of the build.

use crate::ModuleRule;
use serde::{Deserialize, Serialize};

/// Build-target tag of the server bundle. Every other tag ("client",
/// "modern", ...) is treated as a client-side target.
pub const SERVER_TARGET: &str = "server";

/// The slice of the host bundler's configuration this crate operates on.
///
/// `rules` is order-sensitive: the host applies every rule whose predicate
/// matches, and a `oneOf` inside a rule resolves first-match-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Which output bundle is being configured.
    pub name: String,

    /// The ordered module-rule list.
    #[serde(default)]
    pub rules: Vec<ModuleRule>,
}

impl BuildConfig {
    /// Create an empty configuration for the given build target.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Is this the server bundle?
    #[must_use]
    pub fn is_server_target(&self) -> bool {
        self.name == SERVER_TARGET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_target_detection() {
        assert!(BuildConfig::new("server").is_server_target());
        assert!(!BuildConfig::new("client").is_server_target());
        assert!(!BuildConfig::new("modern").is_server_target());
    }

    #[test]
    fn rules_default_to_empty() {
        let config: BuildConfig = serde_json::from_value(json!({ "name": "client" })).unwrap();
        assert!(config.rules.is_empty());
    }
}

//! Composer settings.

use serde::{Deserialize, Serialize};

/// Settings that change how fragments are merged and checked.
///
/// Deserializable so hosts can ship it alongside their own configuration;
/// missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use mosaic::compose::ComposerConfig;
///
/// let config = ComposerConfig::default().require_declared_events(false);
/// assert!(config.allow_wildcard_source);
/// assert!(!config.require_declared_events);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Treat a transition from `"*"` as leaving every state
    pub allow_wildcard_source: bool,

    /// Reject transitions whose event no trigger declares
    pub require_declared_events: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            allow_wildcard_source: true,
            require_declared_events: true,
        }
    }
}

impl ComposerConfig {
    pub fn allow_wildcard_source(mut self, allow: bool) -> Self {
        self.allow_wildcard_source = allow;
        self
    }

    pub fn require_declared_events(mut self, require: bool) -> Self {
        self.require_declared_events = require;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let config = ComposerConfig::default();
        assert!(config.allow_wildcard_source);
        assert!(config.require_declared_events);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ComposerConfig =
            serde_json::from_str(r#"{ "allow_wildcard_source": false }"#).unwrap();

        assert!(!config.allow_wildcard_source);
        assert!(config.require_declared_events);
    }
}

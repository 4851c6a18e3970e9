//! Process-wide switches for the validation engine.
//!
//! A [`ModelConfig`] is read once when a [`Validator`](crate::validation::Validator)
//! is created, so a build always sees a consistent snapshot even if another
//! thread installs a new configuration concurrently.

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;

const ENV_CHECK_REFERENCE_TYPES: &str = "ATRIUS_MODEL_CHECK_REFERENCE_TYPES";
const ENV_CHECK_CONTROL_CHARS: &str = "ATRIUS_MODEL_CHECK_CONTROL_CHARS";
const ENV_REQUIRE_REFERENCE_TYPE: &str = "ATRIUS_MODEL_REQUIRE_REFERENCE_TYPE";
const ENV_MAX_STRING_LENGTH: &str = "ATRIUS_MODEL_MAX_STRING_LENGTH";

/// Maximum length of a FHIR string value (1 MiB).
pub const DEFAULT_MAX_STRING_LENGTH: usize = 1_048_576;

static CURRENT: Lazy<ArcSwap<ModelConfig>> =
    Lazy::new(|| ArcSwap::from_pointee(ModelConfig::from_env()));

/// Validation switches.
///
/// ```
/// use atrius_fhir_model::config::ModelConfig;
///
/// let config = ModelConfig::from_json(r#"{ "requireReferenceType": true }"#).unwrap();
/// assert!(config.require_reference_type);
/// assert!(config.check_reference_types);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    /// Check reference target types against per-field allow-lists.
    pub check_reference_types: bool,
    /// Reject control characters (other than tab, CR and LF) in string values.
    pub check_control_chars: bool,
    /// Strict reference mode: a reference with neither a `type` nor a parsable
    /// literal reference fails the target-type check instead of passing.
    pub require_reference_type: bool,
    pub max_string_length: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            check_reference_types: true,
            check_control_chars: true,
            require_reference_type: false,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}

impl ModelConfig {
    /// Parses a JSON configuration document; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `ATRIUS_MODEL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = parse_var(&lookup, ENV_CHECK_REFERENCE_TYPES) {
            config.check_reference_types = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_CHECK_CONTROL_CHARS) {
            config.check_control_chars = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_REQUIRE_REFERENCE_TYPE) {
            config.require_reference_type = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MAX_STRING_LENGTH) {
            config.max_string_length = v;
        }
        config
    }

    /// Snapshot of the process-wide configuration.
    pub fn current() -> Arc<ModelConfig> {
        CURRENT.load_full()
    }

    /// Replaces the process-wide configuration. Builds already in progress
    /// keep the snapshot they started with.
    pub fn install(config: ModelConfig) {
        info!(?config, "Installing model configuration");
        CURRENT.store(Arc::new(config));
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring unparsable value '{}' for {}", raw, key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::default();
        assert!(config.check_reference_types);
        assert!(config.check_control_chars);
        assert!(!config.require_reference_type);
        assert_eq!(config.max_string_length, DEFAULT_MAX_STRING_LENGTH);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ModelConfig::from_json(r#"{"checkReferenceTypes": false}"#).unwrap();
        assert!(!config.check_reference_types);
        assert!(config.check_control_chars);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ModelConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_REQUIRE_REFERENCE_TYPE, "true"),
            (ENV_MAX_STRING_LENGTH, "64"),
            (ENV_CHECK_CONTROL_CHARS, "maybe"),
        ]
        .into_iter()
        .collect();
        let config = ModelConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert!(config.require_reference_type);
        assert_eq!(config.max_string_length, 64);
        // unparsable value falls back to the default
        assert!(config.check_control_chars);
    }
}

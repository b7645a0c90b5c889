//! AI extraction service configuration.

use serde::{Deserialize, Serialize};
use tender_core::enums::ResetPolicy;

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Base URL of an OpenAI-compatible API (e.g. `https://api.openai.com`).
    #[serde(default)]
    pub base_url: String,

    /// Model name sent with every request.
    #[serde(default)]
    pub model: String,

    /// Bearer token. Optional for local gateways.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// What happens to previously extracted fields when a run fails.
    #[serde(default)]
    pub reset_policy: ResetPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            model: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl ExtractionConfig {
    /// Check if the config has the minimum required fields to call the service.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.model.trim().is_empty()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ExtractionConfig::default();
        assert!(!config.is_configured());
        assert!(!config.has_api_key());
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.reset_policy, ResetPolicy::ResetToDefaults);
    }

    #[test]
    fn configured_without_api_key() {
        let config = ExtractionConfig {
            base_url: "http://localhost:11434".into(),
            model: "llama3".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(!config.has_api_key());
    }
}

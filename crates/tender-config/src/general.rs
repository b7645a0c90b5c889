//! General application configuration.

use serde::{Deserialize, Serialize};
use tender_core::enums::Role;
use tender_core::identity::ContractorIdentity;

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Contractor the CLI acts as when `--as` is not given.
    #[serde(default)]
    pub yoj_id: String,

    /// Role of the acting identity.
    #[serde(default)]
    pub role: Role,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            yoj_id: String::new(),
            role: Role::Contractor,
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// Whether an acting contractor is configured.
    pub fn is_configured(&self) -> bool {
        !self.yoj_id.trim().is_empty()
    }

    /// Identity built from the configured contractor, if any.
    pub fn identity(&self) -> Option<ContractorIdentity> {
        self.is_configured().then(|| ContractorIdentity {
            yoj_id: self.yoj_id.trim().to_string(),
            role: self.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.yoj_id.is_empty());
        assert_eq!(config.role, Role::Contractor);
        assert_eq!(config.default_limit, 20);
        assert!(config.identity().is_none());
    }

    #[test]
    fn identity_trims_yoj_id() {
        let config = GeneralConfig {
            yoj_id: " YOJ7 ".into(),
            role: Role::Admin,
            ..Default::default()
        };
        let identity = config.identity().unwrap();
        assert_eq!(identity.yoj_id, "YOJ7");
        assert!(identity.is_admin());
    }
}

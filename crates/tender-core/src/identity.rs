use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::time::{Timestamp, now_ist};

/// Authenticated contractor identity for cross-crate passing.
///
/// Supplied by the session/auth collaborator; the core never authenticates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContractorIdentity {
    /// Contractor account ID; scopes every per-contractor record.
    pub yoj_id: String,
    pub role: Role,
}

impl ContractorIdentity {
    #[must_use]
    pub fn contractor(yoj_id: impl Into<String>) -> Self {
        Self {
            yoj_id: yoj_id.into(),
            role: Role::Contractor,
        }
    }

    #[must_use]
    pub fn admin(yoj_id: impl Into<String>) -> Self {
        Self {
            yoj_id: yoj_id.into(),
            role: Role::Admin,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Everything a handler knows about the request it is serving.
///
/// Built once per command and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub identity: ContractorIdentity,
    /// Clock reading for the whole request, so every record written by one
    /// command carries the same timestamp.
    pub now: Timestamp,
}

impl RequestContext {
    #[must_use]
    pub fn new(identity: ContractorIdentity) -> Self {
        Self {
            identity,
            now: now_ist(),
        }
    }

    #[must_use]
    pub fn at(identity: ContractorIdentity, now: Timestamp) -> Self {
        Self { identity, now }
    }

    #[must_use]
    pub fn yoj_id(&self) -> &str {
        &self.identity.yoj_id
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.identity.is_admin()
    }
}

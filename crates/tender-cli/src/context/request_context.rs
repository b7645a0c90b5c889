use anyhow::bail;
use tender_config::TenderConfig;
use tender_core::identity::{ContractorIdentity, RequestContext};

/// Build the per-command request context.
///
/// `--as` wins over `general.yoj_id`. Acting as someone other than the
/// configured contractor never carries the configured role.
pub fn request_context(
    config: &TenderConfig,
    acting_as: Option<&str>,
) -> anyhow::Result<RequestContext> {
    let configured = config.general.identity();
    let identity = match (acting_as.map(str::trim), configured) {
        (Some(""), _) => bail!("--as needs a YOJ ID"),
        (Some(yoj), Some(identity)) if identity.yoj_id == yoj => identity,
        (Some(yoj), _) => ContractorIdentity::contractor(yoj),
        (None, Some(identity)) => identity,
        (None, None) => bail!(
            "no contractor configured: set general.yoj_id in .tender/config.toml or pass --as <YOJ_ID>"
        ),
    };
    tracing::debug!(yoj_id = %identity.yoj_id, role = %identity.role, "request context");
    Ok(RequestContext::new(identity))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tender_core::enums::Role;

    use super::*;

    fn configured(yoj: &str, role: Role) -> TenderConfig {
        let mut config = TenderConfig::default();
        config.general.yoj_id = yoj.to_string();
        config.general.role = role;
        config
    }

    #[test]
    fn uses_configured_identity() {
        let ctx = request_context(&configured("YOJ1", Role::Admin), None).unwrap();
        assert_eq!(ctx.yoj_id(), "YOJ1");
        assert!(ctx.is_admin());
    }

    #[test]
    fn acting_as_someone_else_is_a_plain_contractor() {
        let ctx = request_context(&configured("YOJ1", Role::Admin), Some("YOJ2")).unwrap();
        assert_eq!(ctx.yoj_id(), "YOJ2");
        assert!(!ctx.is_admin());
    }

    #[test]
    fn acting_as_self_keeps_role() {
        let ctx = request_context(&configured("YOJ1", Role::Admin), Some("YOJ1")).unwrap();
        assert!(ctx.is_admin());
    }

    #[test]
    fn missing_identity_is_an_error() {
        let err = request_context(&TenderConfig::default(), None).unwrap_err();
        assert!(err.to_string().contains("general.yoj_id"));
        assert!(request_context(&TenderConfig::default(), Some("  ")).is_err());
    }
}

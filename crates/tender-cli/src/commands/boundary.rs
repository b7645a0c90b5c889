//! Error → flash conversion at the command boundary.

use tender_config::ConfigError;
use tender_core::errors::{ErrorKind, ValidationError};
use tender_core::responses::{Flash, FlashLevel};
use tender_extract::ExtractionError;
use tender_schema::SchemaError;
use tender_store::StoreError;

use crate::cli::GlobalFlags;
use crate::output;

fn error_flash(message: impl Into<String>) -> Flash {
    Flash {
        level: FlashLevel::Error,
        message: message.into(),
        field: None,
    }
}

/// Classify an error and pick the message the user sees.
///
/// `None` means no crate error is in the chain: a usage error raised by the
/// CLI itself, shown as is.
pub fn classify(error: &anyhow::Error) -> (Option<ErrorKind>, Flash) {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<StoreError>() {
            let flash = match err {
                StoreError::Validation(invalid) => Flash::from_validation(invalid),
                StoreError::NotFound { .. } | StoreError::Assemble(_) => error_flash(err.to_string()),
                other => Flash::for_error_kind(other.kind()),
            };
            return (Some(err.kind()), flash);
        }
        if let Some(invalid) = cause.downcast_ref::<ValidationError>() {
            return (Some(ErrorKind::Validation), Flash::from_validation(invalid));
        }
        if let Some(err) = cause.downcast_ref::<ExtractionError>() {
            return (Some(err.kind()), Flash::for_error_kind(err.kind()));
        }
        if let Some(err) = cause.downcast_ref::<ConfigError>() {
            return (Some(ErrorKind::Validation), error_flash(err.to_string()));
        }
        if let Some(err) = cause.downcast_ref::<SchemaError>() {
            return (Some(err.kind()), error_flash(err.to_string()));
        }
    }
    (None, error_flash(format!("{error:#}")))
}

/// Log an error with its kind and print the flash on stderr.
pub fn report(error: &anyhow::Error, flags: &GlobalFlags) {
    let (kind, flash) = classify(error);
    let kind_name = kind.map_or("usage", ErrorKind::as_str);
    match kind {
        Some(ErrorKind::Storage | ErrorKind::Internal) => {
            tracing::error!(kind = kind_name, error = %format!("{error:#}"), "command failed");
        }
        _ => tracing::warn!(kind = kind_name, error = %format!("{error:#}"), "command failed"),
    }

    output::flash(&flash, flags);
    if flags.verbose && matches!(kind, Some(ErrorKind::Storage | ErrorKind::Internal)) {
        eprintln!("{error:?}");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn validation_keeps_the_field() {
        let error = anyhow::Error::new(StoreError::invalid("tax.pan", "invalid PAN"));
        let (kind, flash) = classify(&error);
        assert_eq!(kind, Some(ErrorKind::Validation));
        assert_eq!(flash.field.as_deref(), Some("tax.pan"));
        assert_eq!(flash.message, "invalid PAN");
    }

    #[test]
    fn storage_failure_hides_the_path() {
        let io = std::io::Error::other("disk full");
        let error = anyhow::Error::new(StoreError::io("/srv/data/contractors/YOJ1/profile.json", io))
            .context("failed to save profile");
        let (kind, flash) = classify(&error);
        assert_eq!(kind, Some(ErrorKind::Storage));
        assert!(!flash.message.contains("/srv"));
    }

    #[test]
    fn not_found_names_the_record() {
        let error = anyhow::Error::new(StoreError::not_found("pack", "pck-9"));
        let (kind, flash) = classify(&error);
        assert_eq!(kind, Some(ErrorKind::NotFound));
        assert_eq!(flash.message, "pack not found: pck-9");
    }

    #[test]
    fn extraction_failure_offers_retry() {
        let error = anyhow::Error::new(ExtractionError::NotConfigured);
        let (kind, flash) = classify(&error);
        assert_eq!(kind, Some(ErrorKind::ExternalService));
        assert!(flash.message.contains("try again"));
    }

    #[test]
    fn usage_errors_pass_through() {
        let error = anyhow::anyhow!("expected KEY=VALUE, got 'firm.name'");
        let (kind, flash) = classify(&error);
        assert_eq!(kind, None);
        assert_eq!(flash.message, "expected KEY=VALUE, got 'firm.name'");
    }
}

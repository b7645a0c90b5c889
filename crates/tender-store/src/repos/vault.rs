//! Document vault repository. Files are soft-deleted only.

use serde_json::json;
use tender_core::entities::VaultFile;
use tender_core::enums::{EntityType, TrailOp};
use tender_core::identity::RequestContext;
use tender_core::ids::{PREFIX_VAULT, validate_record_id};

use crate::error::StoreError;
use crate::helpers::require_text;
use crate::layout::Collection;
use crate::service::TenderService;

/// Metadata for a file the upload collaborator has already stored.
#[derive(Debug, Clone, Default)]
pub struct NewVaultFile {
    pub title: String,
    pub doc_type: String,
    pub tags: Vec<String>,
    pub stored_path: String,
}

impl TenderService {
    pub fn add_vault_file(
        &self,
        ctx: &RequestContext,
        input: NewVaultFile,
    ) -> Result<VaultFile, StoreError> {
        let yoj = self.scope(ctx)?;
        require_text("title", &input.title)?;
        require_text("stored_path", &input.stored_path)?;

        let mut tags: Vec<String> = Vec::new();
        for tag in input.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let file = VaultFile {
            file_id: self.fresh_id(&Collection::Vault.dir(yoj), PREFIX_VAULT)?,
            owner_yoj_id: yoj.to_string(),
            title: input.title.trim().to_string(),
            doc_type: input.doc_type.trim().to_string(),
            tags,
            stored_path: input.stored_path,
            uploaded_at: ctx.now,
            deleted_at: None,
        };
        self.save_indexed(
            ctx,
            &Collection::Vault.dir(yoj),
            EntityType::Vault,
            &file,
            TrailOp::Create,
            None,
        )?;
        Ok(file)
    }

    pub fn get_vault_file(&self, ctx: &RequestContext, file_id: &str) -> Result<VaultFile, StoreError> {
        let yoj = self.scope(ctx)?;
        validate_record_id("file_id", file_id)?;
        self.load::<VaultFile>(&Collection::Vault.dir(yoj).record(file_id))?
            .filter(|file| file.owner_yoj_id == yoj)
            .ok_or_else(|| StoreError::not_found("vault file", file_id))
    }

    /// Vault files in index order (newest first).
    ///
    /// Index rows whose detail record is gone are skipped with a warning;
    /// `check_index` reports them.
    pub fn list_vault(
        &self,
        ctx: &RequestContext,
        include_deleted: bool,
    ) -> Result<Vec<VaultFile>, StoreError> {
        let yoj = self.scope(ctx)?;
        let dir = Collection::Vault.dir(yoj);
        let mut files = Vec::new();
        for entry in self.store().list_index(&dir.index())? {
            match self.load::<VaultFile>(&dir.record(&entry.id))? {
                Some(file) if include_deleted || file.is_live() => files.push(file),
                Some(_) => {}
                None => tracing::warn!(id = %entry.id, "vault index lists a missing file"),
            }
        }
        Ok(files)
    }

    /// Soft-delete a vault file. Deleting twice is a no-op.
    pub fn delete_vault_file(
        &self,
        ctx: &RequestContext,
        file_id: &str,
    ) -> Result<VaultFile, StoreError> {
        let mut file = self.get_vault_file(ctx, file_id)?;
        if !file.is_live() {
            return Ok(file);
        }
        file.deleted_at = Some(ctx.now);
        let yoj = self.scope(ctx)?;
        self.save_indexed(
            ctx,
            &Collection::Vault.dir(yoj),
            EntityType::Vault,
            &file,
            TrailOp::Delete,
            Some(json!({ "deleted_at": ctx.now })),
        )?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tender_core::errors::ErrorKind;

    use super::NewVaultFile;
    use crate::test_support::helpers::{contractor, contractor_later, test_service};

    fn pan_card() -> NewVaultFile {
        NewVaultFile {
            title: "PAN Card".into(),
            doc_type: "pan_card".into(),
            tags: vec!["Tax".into(), "tax".into(), " ".into()],
            stored_path: "uploads/pan.pdf".into(),
        }
    }

    #[test]
    fn add_normalizes_tags() {
        let svc = test_service();
        let file = svc.add_vault_file(&contractor("YOJ1"), pan_card()).unwrap();
        assert!(file.file_id.starts_with("vlt-"));
        assert_eq!(file.tags, vec!["tax"]);
    }

    #[test]
    fn soft_delete_hides_from_live_listing() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let file = svc.add_vault_file(&ctx, pan_card()).unwrap();
        let later = contractor_later("YOJ1", 5);
        let deleted = svc.delete_vault_file(&later, &file.file_id).unwrap();
        assert_eq!(deleted.deleted_at, Some(later.now));

        assert!(svc.list_vault(&ctx, false).unwrap().is_empty());
        assert_eq!(svc.list_vault(&ctx, true).unwrap().len(), 1);
        // Stored record is kept.
        assert!(!svc.get_vault_file(&ctx, &file.file_id).unwrap().is_live());
    }

    #[test]
    fn other_contractors_cannot_see_file() {
        let svc = test_service();
        let file = svc.add_vault_file(&contractor("YOJ1"), pan_card()).unwrap();
        let err = svc.get_vault_file(&contractor("YOJ2"), &file.file_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn title_is_required() {
        let svc = test_service();
        let input = NewVaultFile {
            title: " ".into(),
            ..pan_card()
        };
        let err = svc.add_vault_file(&contractor("YOJ1"), input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

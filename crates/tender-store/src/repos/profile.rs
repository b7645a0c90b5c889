//! Contractor profile repository.

use tender_core::entities::ContractorProfile;
use tender_core::enums::{EntityType, TrailOp};
use tender_core::identity::RequestContext;
use tender_docs::registry::FieldRegistry;

use crate::error::StoreError;
use crate::layout::profile_path;
use crate::service::TenderService;

impl TenderService {
    /// The acting contractor's profile, or an empty one if never saved.
    pub fn get_profile(&self, ctx: &RequestContext) -> Result<ContractorProfile, StoreError> {
        let yoj = self.scope(ctx)?;
        Ok(self
            .load(&profile_path(yoj))?
            .unwrap_or_else(|| ContractorProfile::new(yoj)))
    }

    /// Validate every mapped field and replace the stored profile.
    pub fn save_profile(
        &self,
        ctx: &RequestContext,
        mut profile: ContractorProfile,
    ) -> Result<ContractorProfile, StoreError> {
        let yoj = self.scope(ctx)?;
        let registry = FieldRegistry::standard();
        for spec in registry.fields().values() {
            if let Some(field) = spec.profile_source {
                registry.validate_value(&spec.key, &profile.field_value(field))?;
            }
        }

        let path = profile_path(yoj);
        let op = if self.store().read_record(&path)?.is_some() {
            TrailOp::Update
        } else {
            TrailOp::Create
        };
        profile.yoj_id = yoj.to_string();
        profile.updated_at = Some(ctx.now);
        self.save_single(ctx, &path, EntityType::Profile, yoj, &profile, op, None)?;
        Ok(profile)
    }

    /// Set one profile attribute through its placeholder key
    /// (e.g. `firm.name`, `tax.pan`).
    pub fn set_profile_field(
        &self,
        ctx: &RequestContext,
        key: &str,
        value: &str,
    ) -> Result<ContractorProfile, StoreError> {
        let registry = FieldRegistry::standard();
        let field = registry
            .profile_source(key)
            .ok_or_else(|| StoreError::invalid(key, "is not a profile field"))?;
        registry.validate_value(key, value)?;

        let mut profile = self.get_profile(ctx)?;
        profile.set_field_value(field, value.trim().to_string());
        self.save_profile(ctx, profile)
    }
}

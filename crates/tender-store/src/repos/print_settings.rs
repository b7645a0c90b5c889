//! Letterhead print settings repository.

use tender_core::entities::PrintSettings;
use tender_core::enums::{EntityType, TrailOp};
use tender_core::identity::RequestContext;

use crate::error::StoreError;
use crate::helpers::encode;
use crate::layout::print_settings_path;
use crate::service::TenderService;
use crate::updates::print_settings::{MAX_LETTERHEAD_MM, PrintSettingsUpdate};

impl TenderService {
    /// Stored settings, or the defaults (letterhead off, 35mm/20mm reserved).
    pub fn get_print_settings(&self, ctx: &RequestContext) -> Result<PrintSettings, StoreError> {
        let yoj = self.scope(ctx)?;
        Ok(self
            .load(&print_settings_path(yoj))?
            .unwrap_or_else(|| PrintSettings::new(yoj)))
    }

    pub fn save_print_settings(
        &self,
        ctx: &RequestContext,
        update: &PrintSettingsUpdate,
    ) -> Result<PrintSettings, StoreError> {
        for (field, mm) in [
            ("header_height_mm", update.header_height_mm),
            ("footer_height_mm", update.footer_height_mm),
        ] {
            if mm.is_some_and(|mm| mm > MAX_LETTERHEAD_MM) {
                return Err(StoreError::invalid(
                    field,
                    format!("must be at most {MAX_LETTERHEAD_MM} mm"),
                ));
            }
        }

        let mut settings = self.get_print_settings(ctx)?;
        let op = if settings.updated_at.is_some() {
            TrailOp::Update
        } else {
            TrailOp::Create
        };
        update.apply_to(&mut settings);
        settings.updated_at = Some(ctx.now);

        let yoj = self.scope(ctx)?;
        self.save_single(
            ctx,
            &print_settings_path(yoj),
            EntityType::PrintSettings,
            yoj,
            &settings,
            op,
            Some(encode(update)?),
        )?;
        Ok(settings)
    }
}

//! Template repository.
//!
//! Global templates are visible to every contractor and editable only by an
//! admin. Contractor templates are private to their owner.

use std::collections::HashSet;

use tender_core::entities::{IndexEntry, Template, TemplateTable};
use tender_core::enums::{BodyFormat, EntityType, TemplateScope, TrailOp};
use tender_core::identity::RequestContext;
use tender_core::ids::{PREFIX_TEMPLATE, validate_record_id};

use crate::error::StoreError;
use crate::helpers::{encode, require_text};
use crate::layout::{Collection, CollectionPath};
use crate::service::TenderService;
use crate::updates::template::TemplateUpdate;

#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub scope: TemplateScope,
    pub title: String,
    pub category: String,
    pub description: String,
    pub body: String,
    pub format: BodyFormat,
    pub tables: Vec<TemplateTable>,
}

impl NewTemplate {
    /// A contractor-scoped template with no tables.
    pub fn contractor(title: impl Into<String>, body: impl Into<String>, format: BodyFormat) -> Self {
        Self {
            scope: TemplateScope::Contractor,
            title: title.into(),
            category: String::new(),
            description: String::new(),
            body: body.into(),
            format,
            tables: Vec::new(),
        }
    }
}

fn check_tables(tables: &[TemplateTable]) -> Result<(), StoreError> {
    let mut keys = HashSet::new();
    for table in tables {
        if table.key.trim().is_empty() {
            return Err(StoreError::invalid("tables", "table key must not be empty"));
        }
        if !keys.insert(table.key.as_str()) {
            return Err(StoreError::invalid(
                "tables",
                format!("table '{}' is defined twice", table.key),
            ));
        }
        if table.columns.is_empty() {
            return Err(StoreError::invalid(
                "tables",
                format!("table '{}' needs at least one column", table.key),
            ));
        }
    }
    Ok(())
}

fn check_template(template: &Template) -> Result<(), StoreError> {
    require_text("title", &template.title)?;
    require_text("body", &template.body)?;
    check_tables(&template.tables)
}

impl TenderService {
    fn template_dir(&self, ctx: &RequestContext, scope: TemplateScope) -> Result<CollectionPath, StoreError> {
        let yoj = self.scope(ctx)?;
        Ok(match scope {
            TemplateScope::Global => Collection::GlobalTemplates.dir(yoj),
            TemplateScope::Contractor => Collection::Templates.dir(yoj),
        })
    }

    /// The contractor's own templates followed by the global ones.
    pub fn list_templates(&self, ctx: &RequestContext) -> Result<Vec<IndexEntry>, StoreError> {
        let own = self.store().list_index(&self.template_dir(ctx, TemplateScope::Contractor)?.index())?;
        let global = self.store().list_index(&self.template_dir(ctx, TemplateScope::Global)?.index())?;
        let mut seen = HashSet::new();
        Ok(own
            .into_iter()
            .chain(global)
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect())
    }

    /// Look a template up among the contractor's own, then the global ones.
    pub fn get_template(&self, ctx: &RequestContext, id: &str) -> Result<Template, StoreError> {
        validate_record_id("template_id", id)?;
        let yoj = self.scope(ctx)?;
        let own_path = self.template_dir(ctx, TemplateScope::Contractor)?.record(id);
        if let Some(template) = self.load::<Template>(&own_path)?
            && template.is_owned_by(yoj)
        {
            return Ok(template);
        }
        let global_path = self.template_dir(ctx, TemplateScope::Global)?.record(id);
        self.load::<Template>(&global_path)?
            .filter(|template| template.scope == TemplateScope::Global)
            .ok_or_else(|| StoreError::not_found("template", id))
    }

    pub fn create_template(
        &self,
        ctx: &RequestContext,
        input: NewTemplate,
    ) -> Result<Template, StoreError> {
        let yoj = self.scope(ctx)?;
        if input.scope == TemplateScope::Global && !ctx.is_admin() {
            return Err(StoreError::invalid(
                "scope",
                "only an admin can create global templates",
            ));
        }

        let template = Template {
            id: self.fresh_id(&self.template_dir(ctx, input.scope)?, PREFIX_TEMPLATE)?,
            scope: input.scope,
            owner_yoj_id: (input.scope == TemplateScope::Contractor).then(|| yoj.to_string()),
            title: input.title.trim().to_string(),
            category: input.category.trim().to_string(),
            description: input.description.trim().to_string(),
            body: input.body,
            format: input.format,
            tables: input.tables,
            created_at: ctx.now,
            updated_at: ctx.now,
        };
        check_template(&template)?;
        self.save_indexed(
            ctx,
            &self.template_dir(ctx, template.scope)?,
            EntityType::Template,
            &template,
            TrailOp::Create,
            None,
        )?;
        Ok(template)
    }

    /// Fetch a template the acting user may modify.
    fn editable_template(&self, ctx: &RequestContext, id: &str) -> Result<Template, StoreError> {
        let template = self.get_template(ctx, id)?;
        match template.scope {
            TemplateScope::Global if !ctx.is_admin() => Err(StoreError::invalid(
                "template_id",
                "global templates are read-only",
            )),
            TemplateScope::Global | TemplateScope::Contractor => Ok(template),
        }
    }

    pub fn update_template(
        &self,
        ctx: &RequestContext,
        id: &str,
        update: &TemplateUpdate,
    ) -> Result<Template, StoreError> {
        let mut template = self.editable_template(ctx, id)?;
        if update.is_empty() {
            return Ok(template);
        }
        update.apply_to(&mut template);
        check_template(&template)?;
        template.updated_at = ctx.now;
        self.save_indexed(
            ctx,
            &self.template_dir(ctx, template.scope)?,
            EntityType::Template,
            &template,
            TrailOp::Update,
            Some(encode(update)?),
        )?;
        Ok(template)
    }

    /// Remove a template. Documents already generated from it are kept.
    pub fn delete_template(&self, ctx: &RequestContext, id: &str) -> Result<(), StoreError> {
        let template = self.editable_template(ctx, id)?;
        self.remove_indexed(
            ctx,
            &self.template_dir(ctx, template.scope)?,
            EntityType::Template,
            &template.id,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tender_core::entities::{TableColumn, TemplateTable};
    use tender_core::enums::{BodyFormat, TemplateScope};
    use tender_core::errors::ErrorKind;

    use super::NewTemplate;
    use crate::test_support::helpers::{admin, contractor, test_service};
    use crate::updates::template::TemplateUpdateBuilder;

    fn letter() -> NewTemplate {
        NewTemplate::contractor("Cover Letter", "Dear {{dept}},", BodyFormat::Text)
    }

    fn global_affidavit() -> NewTemplate {
        NewTemplate {
            scope: TemplateScope::Global,
            ..NewTemplate::contractor("Affidavit", "I, {{firm.proprietor}}", BodyFormat::Html)
        }
    }

    #[test]
    fn contractor_sees_own_and_global() {
        let svc = test_service();
        let mine = svc.create_template(&contractor("YOJ1"), letter()).unwrap();
        let global = svc.create_template(&admin("ADMIN1"), global_affidavit()).unwrap();
        svc.create_template(&contractor("YOJ2"), letter()).unwrap();

        let ids: Vec<String> = svc
            .list_templates(&contractor("YOJ1"))
            .unwrap()
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec![mine.id, global.id]);
    }

    #[test]
    fn contractor_cannot_create_global() {
        let svc = test_service();
        let err = svc.create_template(&contractor("YOJ1"), global_affidavit()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn global_templates_are_read_only_for_contractors() {
        let svc = test_service();
        let global = svc.create_template(&admin("ADMIN1"), global_affidavit()).unwrap();
        let update = TemplateUpdateBuilder::new().title("Mine now").build();
        let err = svc
            .update_template(&contractor("YOJ1"), &global.id, &update)
            .unwrap_err();
        assert!(err.to_string().contains("read-only"));
        assert!(svc.delete_template(&contractor("YOJ1"), &global.id).is_err());

        let updated = svc.update_template(&admin("ADMIN1"), &global.id, &update).unwrap();
        assert_eq!(updated.title, "Mine now");
    }

    #[test]
    fn foreign_template_is_not_found() {
        let svc = test_service();
        let mine = svc.create_template(&contractor("YOJ1"), letter()).unwrap();
        let err = svc.get_template(&contractor("YOJ2"), &mine.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn delete_removes_listing() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let mine = svc.create_template(&ctx, letter()).unwrap();
        svc.delete_template(&ctx, &mine.id).unwrap();
        assert!(svc.list_templates(&ctx).unwrap().is_empty());
        assert_eq!(svc.get_template(&ctx, &mine.id).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn duplicate_table_keys_are_rejected() {
        let svc = test_service();
        let table = TemplateTable {
            key: "works".into(),
            title: String::new(),
            columns: vec![TableColumn::new("name", "Name of Work")],
            row_template: None,
        };
        let input = NewTemplate {
            tables: vec![table.clone(), table],
            ..letter()
        };
        let err = svc.create_template(&contractor("YOJ1"), input).unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn blank_body_is_rejected() {
        let svc = test_service();
        let input = NewTemplate::contractor("Empty", "  ", BodyFormat::Text);
        let err = svc.create_template(&contractor("YOJ1"), input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

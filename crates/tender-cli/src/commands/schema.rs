use tender_core::responses::Flash;
use tender_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::commands::shared::respond::respond;

/// Handle `tndr schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let Some(name) = args.type_name.as_deref() else {
        return respond(&registry.list(), None, flags);
    };
    match registry.get(name) {
        Some(schema) => respond(schema, None, flags),
        None => {
            let names = registry.list().join(", ");
            respond(
                &serde_json::Value::Null,
                Some(Flash::warning(format!("unknown schema '{name}'; known: {names}"))),
                flags,
            )?;
            anyhow::bail!("unknown schema '{name}'")
        }
    }
}

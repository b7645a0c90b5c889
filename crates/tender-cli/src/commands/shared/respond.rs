use serde::Serialize;
use tender_core::responses::Flash;

use crate::cli::GlobalFlags;
use crate::output;

/// Print response data on stdout and an optional flash on stderr.
pub fn respond<T: Serialize>(data: &T, flash: Option<Flash>, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(data, flags.format)?;
    if let Some(flash) = flash {
        output::flash(&flash, flags);
    }
    Ok(())
}

/// Keep the first `limit` rows of a list response.
pub fn limited<T>(mut rows: Vec<T>, limit: usize) -> Vec<T> {
    rows.truncate(limit);
    rows
}

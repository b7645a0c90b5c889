//! Lazily compiled regular expressions.
//!
//! Patterns are constants; a pattern that fails to compile yields `None` and
//! the caller degrades to "no match" instead of panicking.

use std::sync::OnceLock;

use regex::Regex;

pub(crate) fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(pattern, error = %e, "invalid built-in pattern");
            None
        }
    })
    .as_ref()
}

//! Pricing/BOQ/SOR content policy.
//!
//! Annexures and documents whose label names a pricing format are never
//! generated; the composer prints a named warning in their place.

use std::sync::OnceLock;

use regex::Regex;

use crate::html;
use crate::patterns::cached;

static RESTRICTED: OnceLock<Option<Regex>> = OnceLock::new();

const RESTRICTED_PATTERN: &str = r"(?i)\b(boq|bill\s+of\s+quantit(?:y|ies)|schedule\s+of\s+rates?|sor|price\s+bid|financial\s+bid|price\s+schedule|rate\s+analysis|pricing)\b";

/// Whether a label names a restricted pricing format.
#[must_use]
pub fn is_restricted(label: &str) -> bool {
    cached(&RESTRICTED, RESTRICTED_PATTERN).is_some_and(|re| re.is_match(label))
}

/// Warning block printed instead of a restricted document's body.
#[must_use]
pub fn restricted_notice(label: &str) -> String {
    format!(
        "<div class=\"restricted-warning\"><strong>{}</strong> is a pricing format and is \
         not generated. Attach the department's original format, filled in by hand.</div>",
        html::escape(label)
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("BOQ")]
    #[case("Annexure-C: Bill of Quantities")]
    #[case("Schedule of Rates")]
    #[case("schedule of rate")]
    #[case("SOR (2024-25)")]
    #[case("Price Bid")]
    #[case("Financial bid format")]
    #[case("Price Schedule")]
    #[case("Rate Analysis")]
    #[case("Pricing details")]
    fn flags_pricing_labels(#[case] label: &str) {
        assert!(is_restricted(label), "{label} should be restricted");
    }

    #[rstest]
    #[case("Affidavit")]
    #[case("Sorting list")]
    #[case("Technical bid")]
    #[case("Boqueron Works")]
    fn leaves_other_labels(#[case] label: &str) {
        assert!(!is_restricted(label), "{label} should not be restricted");
    }

    #[test]
    fn notice_escapes_label() {
        let notice = restricted_notice("BOQ <draft>");
        assert!(notice.contains("BOQ &lt;draft&gt;"));
        assert!(notice.starts_with("<div class=\"restricted-warning\">"));
    }
}

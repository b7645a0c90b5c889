//! Vault-suggestion heuristic.
//!
//! For every required checklist item that has no evidence yet, pick the live
//! vault file whose title, tags and document type best overlap the item's
//! title and category. Suggestions are advisory; nothing is attached here.

use std::collections::BTreeSet;

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use serde::Serialize;
use tender_core::entities::{ChecklistItem, Pack, VaultFile};

use crate::assemble::missing_required;

/// Words that say nothing about which document is meant.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "any", "as", "by", "copy", "doc", "document", "documents", "for", "from",
    "in", "of", "on", "or", "the", "to", "with",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaultSuggestion {
    pub item_id: String,
    pub file_id: String,
    /// Title of the suggested vault file.
    pub title: String,
    /// Share of the item's keywords found on the file, in `[0, 1]`.
    pub confidence: f64,
    /// The overlapping keywords.
    pub matched: Vec<String>,
}

fn keywords<'a>(parts: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    parts
        .into_iter()
        .flat_map(|part| part.split(|c: char| !c.is_alphanumeric()))
        .map(str::to_lowercase)
        .filter(|word| !word.is_empty() && !STOPWORDS.contains(&word.as_str()))
        .collect()
}

fn item_keywords(item: &ChecklistItem) -> BTreeSet<String> {
    keywords([item.title.as_str(), item.category.as_str()])
}

fn file_keywords(file: &VaultFile) -> BTreeSet<String> {
    keywords(
        [file.title.as_str(), file.doc_type.as_str()]
            .into_iter()
            .chain(file.tags.iter().map(String::as_str)),
    )
}

fn haystack(file: &VaultFile) -> String {
    let mut parts = vec![file.title.clone(), file.doc_type.replace('_', " ")];
    parts.extend(file.tags.iter().cloned());
    parts.join(" ")
}

fn ratio(part: usize, whole: usize) -> f64 {
    let part = u32::try_from(part).unwrap_or(u32::MAX);
    let whole = u32::try_from(whole).unwrap_or(u32::MAX);
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}

/// Suggest at most one vault file per unsatisfied required item.
///
/// Candidates below `threshold` confidence are dropped. Equal confidence is
/// broken by a fuzzy match of the item title against the file, then by
/// vault order.
#[must_use]
pub fn suggest_vault(pack: &Pack, vault: &[VaultFile], threshold: f64) -> Vec<VaultSuggestion> {
    let live: Vec<(&VaultFile, BTreeSet<String>)> = vault
        .iter()
        .filter(|file| file.is_live())
        .map(|file| (file, file_keywords(file)))
        .collect();
    if live.is_empty() {
        return Vec::new();
    }

    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let mut suggestions = Vec::new();

    for item_id in missing_required(pack) {
        let Some(item) = pack.checklist_item(&item_id) else {
            continue;
        };
        let wanted = item_keywords(item);
        if wanted.is_empty() {
            continue;
        }
        let pattern = Pattern::parse(&item.title, CaseMatching::Smart, Normalization::Smart);

        let mut best: Option<(f64, u32, &VaultFile, Vec<String>)> = None;
        for (file, have) in &live {
            let matched: Vec<String> = wanted.intersection(have).cloned().collect();
            let confidence = ratio(matched.len(), wanted.len());
            if confidence <= 0.0 || confidence < threshold {
                continue;
            }
            let text = Utf32String::from(haystack(file));
            let fuzzy = pattern.score(text.slice(..), &mut matcher).unwrap_or(0);
            let better = best.as_ref().is_none_or(|(best_conf, best_fuzzy, _, _)| {
                confidence > *best_conf
                    || ((confidence - *best_conf).abs() < f64::EPSILON && fuzzy > *best_fuzzy)
            });
            if better {
                best = Some((confidence, fuzzy, file, matched));
            }
        }

        if let Some((confidence, _, file, matched)) = best {
            tracing::debug!(
                item_id = %item.item_id,
                file_id = %file.file_id,
                confidence,
                "vault suggestion"
            );
            suggestions.push(VaultSuggestion {
                item_id: item.item_id.clone(),
                file_id: file.file_id.clone(),
                title: file.title.clone(),
                confidence,
                matched,
            });
        }
    }

    suggestions
}

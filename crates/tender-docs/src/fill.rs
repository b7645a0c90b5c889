//! Template substitution engine.
//!
//! Tokens are `{{key}}` and `{{table:key}}`; whitespace inside the braces is
//! allowed, the key itself may contain `[A-Za-z0-9_.-]`. Anything else that
//! looks like a token (unterminated braces, spaces inside a key) is copied
//! through verbatim. Filling never fails.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tender_core::entities::{TableRow, TemplateTable};

use crate::html;
use crate::patterns::cached;

/// Printed where a placeholder has no value.
pub const DEFAULT_BLANK_MARKER: &str = "__________";

/// Invisible separator placed between doubled braces in text output.
const WORD_JOINER: char = '\u{2060}';

const TOKEN_PATTERN: &str = r"\{\{\s*(table:)?([A-Za-z0-9_.\-]+)\s*\}\}";

static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();

fn token_regex() -> Option<&'static Regex> {
    cached(&TOKEN, TOKEN_PATTERN)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOptions {
    /// Escape substituted values and emit HTML tables.
    pub is_html: bool,
    pub blank_marker: String,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            is_html: false,
            blank_marker: DEFAULT_BLANK_MARKER.to_string(),
        }
    }
}

impl FillOptions {
    #[must_use]
    pub fn html() -> Self {
        Self {
            is_html: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn text() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_blank_marker(mut self, marker: impl Into<String>) -> Self {
        self.blank_marker = marker.into();
        self
    }
}

/// Result of a fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filled {
    pub body: String,
    /// Keys that printed as blanks, first appearance order. Table keys are
    /// reported as `table:<key>`.
    pub missing: Vec<String>,
}

/// Scalar placeholder keys in first-appearance order, deduplicated.
#[must_use]
pub fn scan_keys(body: &str) -> Vec<String> {
    scan(body, false)
}

/// Table placeholder keys in first-appearance order, deduplicated.
#[must_use]
pub fn scan_table_keys(body: &str) -> Vec<String> {
    scan(body, true)
}

fn scan(body: &str, tables: bool) -> Vec<String> {
    let Some(re) = token_regex() else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    re.captures_iter(body)
        .filter(|caps| caps.get(1).is_some() == tables)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str().to_string()))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

struct MissingLog {
    keys: Vec<String>,
    seen: HashSet<String>,
}

impl MissingLog {
    fn new() -> Self {
        Self {
            keys: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn record(&mut self, key: String) {
        if self.seen.insert(key.clone()) {
            self.keys.push(key);
        }
    }
}

/// Substitute every recognised token in `body`.
///
/// Tokens are consumed in a single pass, so substituted text is never
/// re-scanned.
#[must_use]
pub fn fill(
    body: &str,
    values: &BTreeMap<String, String>,
    tables: &BTreeMap<String, Vec<TableRow>>,
    table_defs: &[TemplateTable],
    options: &FillOptions,
) -> Filled {
    let Some(re) = token_regex() else {
        return Filled {
            body: body.to_string(),
            missing: Vec::new(),
        };
    };

    let mut missing = MissingLog::new();
    let rendered = re.replace_all(body, |caps: &Captures<'_>| {
        let key = caps.get(2).map_or("", |m| m.as_str());
        if caps.get(1).is_some() {
            expand_table(key, tables, table_defs, values, options, &mut missing)
        } else {
            scalar(key, values, options, &mut missing)
        }
    });

    Filled {
        body: rendered.into_owned(),
        missing: missing.keys,
    }
}

fn scalar(
    key: &str,
    values: &BTreeMap<String, String>,
    options: &FillOptions,
    missing: &mut MissingLog,
) -> String {
    match values.get(key).filter(|v| !v.trim().is_empty()) {
        Some(value) if options.is_html => html::escape(value),
        Some(value) => inert(value),
        None => {
            missing.record(key.to_string());
            options.blank_marker.clone()
        }
    }
}

fn expand_table(
    key: &str,
    tables: &BTreeMap<String, Vec<TableRow>>,
    table_defs: &[TemplateTable],
    values: &BTreeMap<String, String>,
    options: &FillOptions,
    missing: &mut MissingLog,
) -> String {
    let Some(def) = table_defs.iter().find(|def| def.key == key) else {
        tracing::debug!(table = key, "no definition for table placeholder");
        missing.record(format!("table:{key}"));
        return options.blank_marker.clone();
    };

    let rows = tables.get(key).map_or(&[][..], Vec::as_slice);
    if rows.is_empty() {
        missing.record(format!("table:{key}"));
    }

    let columns: Vec<&str> = def.columns.iter().map(|c| c.key.as_str()).collect();
    let mut rendered_rows = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let cells = row_cells(row, &columns, index);
        rendered_rows.push(render_row(def, &cells, values, options, missing));
    }

    if options.is_html {
        html_table(def, &rendered_rows)
    } else {
        text_table(def, &rendered_rows)
    }
}

/// Cell values for one row, restricted to the configured columns, with the
/// derived `sno` and `amount` columns filled in when blank.
fn row_cells(row: &TableRow, columns: &[&str], index: usize) -> BTreeMap<String, String> {
    let mut cells: BTreeMap<String, String> = columns
        .iter()
        .map(|column| {
            let value = row.get(*column).cloned().unwrap_or_default();
            ((*column).to_string(), value)
        })
        .collect();

    if let Some(sno) = cells.get_mut("sno") {
        if sno.trim().is_empty() {
            *sno = (index + 1).to_string();
        }
    }

    let derived_amount = match (row.get("qty"), row.get("rate")) {
        (Some(qty), Some(rate)) => parse_number(qty)
            .zip(parse_number(rate))
            .map(|(q, r)| format!("{:.2}", q * r)),
        _ => None,
    };
    if let (Some(amount), Some(derived)) = (cells.get_mut("amount"), derived_amount) {
        if amount.trim().is_empty() {
            *amount = derived;
        }
    }

    cells
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Text-mode counterpart of HTML escaping: split every `{{` and `}}` so
/// substituted text cannot form a token on a later fill.
fn inert(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev = None;
    for c in raw.chars() {
        if (c == '{' || c == '}') && prev == Some(c) {
            out.push(WORD_JOINER);
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn render_row(
    def: &TemplateTable,
    cells: &BTreeMap<String, String>,
    values: &BTreeMap<String, String>,
    options: &FillOptions,
    missing: &mut MissingLog,
) -> String {
    let Some(row_template) = &def.row_template else {
        return default_row(def, cells, options);
    };
    let Some(re) = token_regex() else {
        return row_template.clone();
    };
    re.replace_all(row_template, |caps: &Captures<'_>| {
        let key = caps.get(2).map_or("", |m| m.as_str());
        if caps.get(1).is_some() {
            // Nested tables are not expanded; the token is consumed.
            missing.record(format!("table:{key}"));
            return options.blank_marker.clone();
        }
        match cells.get(key) {
            Some(cell) if options.is_html => html::escape(cell),
            Some(cell) => inert(cell),
            None => scalar(key, values, options, missing),
        }
    })
    .into_owned()
}

fn default_row(def: &TemplateTable, cells: &BTreeMap<String, String>, options: &FillOptions) -> String {
    let values = def
        .columns
        .iter()
        .map(|column| cells.get(&column.key).map_or("", String::as_str));
    if options.is_html {
        let mut row = String::from("<tr>");
        for value in values {
            let _ = write!(row, "<td>{}</td>", html::escape(value));
        }
        row.push_str("</tr>");
        row
    } else {
        values.map(inert).collect::<Vec<_>>().join(" | ")
    }
}

fn html_table(def: &TemplateTable, rows: &[String]) -> String {
    let mut out = String::from("<table class=\"tpl-table\">");
    if !def.title.trim().is_empty() {
        let _ = write!(out, "<caption>{}</caption>", html::escape(&def.title));
    }
    out.push_str("<thead><tr>");
    for column in &def.columns {
        let _ = write!(out, "<th>{}</th>", html::escape(&column.label));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str(row);
    }
    out.push_str("</tbody></table>");
    out
}

fn text_table(def: &TemplateTable, rows: &[String]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    if !def.title.trim().is_empty() {
        lines.push(inert(&def.title));
    }
    lines.push(
        def.columns
            .iter()
            .map(|column| inert(&column.label))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    lines.extend(rows.iter().cloned());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tender_core::entities::TableColumn;

    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn row(pairs: &[(&str, &str)]) -> TableRow {
        values(pairs)
    }

    fn items_table(row_template: Option<&str>) -> TemplateTable {
        TemplateTable {
            key: "items".into(),
            title: String::new(),
            columns: vec![
                TableColumn::new("sno", "S.No."),
                TableColumn::new("description", "Description"),
                TableColumn::new("qty", "Qty"),
                TableColumn::new("rate", "Rate"),
                TableColumn::new("amount", "Amount"),
            ],
            row_template: row_template.map(String::from),
        }
    }

    #[test]
    fn dear_dept_example() {
        let filled = fill(
            "Dear {{dept}}, Firm: {{firm.name}}",
            &values(&[("dept", "PWD")]),
            &BTreeMap::new(),
            &[],
            &FillOptions::text(),
        );
        assert_eq!(filled.body, "Dear PWD, Firm: __________");
        assert_eq!(filled.missing, vec!["firm.name".to_string()]);
    }

    #[test]
    fn missing_keys_recorded_once_in_order() {
        let filled = fill(
            "{{b}} {{a}} {{b}} {{ a }}",
            &BTreeMap::new(),
            &BTreeMap::new(),
            &[],
            &FillOptions::text(),
        );
        assert_eq!(filled.missing, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn html_values_are_escaped() {
        let filled = fill(
            "<p>{{firm.name}}</p>",
            &values(&[("firm.name", "A & B <Builders> {{dept}}")]),
            &BTreeMap::new(),
            &[],
            &FillOptions::html(),
        );
        assert_eq!(
            filled.body,
            "<p>A &amp; B &lt;Builders&gt; &#123;&#123;dept&#125;&#125;</p>"
        );
        assert!(filled.missing.is_empty());
    }

    #[rstest]
    #[case("Total {x} and {{firm.name")]
    #[case("{{ bad key }} stays")]
    #[case("{{}} and }} {{ and {{{")]
    #[case("function() { return {a: 1}; }")]
    fn malformed_tokens_are_left_verbatim(#[case] body: &str) {
        let filled = fill(body, &BTreeMap::new(), &BTreeMap::new(), &[], &FillOptions::html());
        assert_eq!(filled.body, body);
        assert!(filled.missing.is_empty());
    }

    #[test]
    fn custom_blank_marker() {
        let filled = fill(
            "PAN: {{tax.pan}}",
            &BTreeMap::new(),
            &BTreeMap::new(),
            &[],
            &FillOptions::text().with_blank_marker("......"),
        );
        assert_eq!(filled.body, "PAN: ......");
    }

    #[test]
    fn filling_twice_changes_nothing() {
        let body = "<p>{{dept}} / {{firm.name}} / {x}</p>{{table:items}}";
        let vals = values(&[("dept", "PWD <Roads>")]);
        let tables = BTreeMap::from([(
            "items".to_string(),
            vec![row(&[("description", "Cement {{bags}}"), ("qty", "2"), ("rate", "350")])],
        )]);
        let defs = [items_table(None)];
        let once = fill(body, &vals, &tables, &defs, &FillOptions::html());
        let twice = fill(&once.body, &vals, &tables, &defs, &FillOptions::html());
        assert_eq!(once.body, twice.body);
        assert!(twice.missing.is_empty());
    }

    #[test]
    fn text_fill_twice_changes_nothing() {
        let body = "Firm: {{firm.name}}\n{{table:items}}\n{{table:notes}}";
        let vals = values(&[("dept", "PWD"), ("firm.name", "Acme {{dept}}")]);
        let tables = BTreeMap::from([
            (
                "items".to_string(),
                vec![row(&[("description", "Cement {{dept}}"), ("qty", "2"), ("rate", "350")])],
            ),
            ("notes".to_string(), vec![row(&[("qty", "{{{dept}}}")])]),
        ]);
        let mut notes = items_table(Some("Note: {{qty}}"));
        notes.key = "notes".into();
        let defs = [items_table(None), notes];

        let once = fill(body, &vals, &tables, &defs, &FillOptions::text());
        assert!(!once.body.contains("{{"));
        assert!(!once.body.contains("}}"));
        assert!(once.body.starts_with("Firm: Acme {\u{2060}{dept}\u{2060}}"));

        let twice = fill(&once.body, &vals, &tables, &defs, &FillOptions::text());
        assert_eq!(once.body, twice.body);
        assert!(twice.missing.is_empty());
    }

    #[test]
    fn inert_splits_doubled_braces_only() {
        assert_eq!(inert("{a} {{b}}"), "{a} {\u{2060}{b}\u{2060}}");
        assert_eq!(inert("{{{"), "{\u{2060}{\u{2060}{");
        assert_eq!(inert("plain"), "plain");
    }

    #[rstest]
    #[case("inf")]
    #[case("NaN")]
    #[case("infinity")]
    #[case("1e400")]
    fn non_finite_quantities_leave_amount_blank(#[case] qty: &str) {
        let tables = BTreeMap::from([(
            "items".to_string(),
            vec![row(&[("description", "Sand"), ("qty", qty), ("rate", "10")])],
        )]);
        let filled = fill(
            "{{table:items}}",
            &BTreeMap::new(),
            &tables,
            &[items_table(None)],
            &FillOptions::text(),
        );
        assert_eq!(filled.body.lines().nth(1), Some(format!("1 | Sand | {qty} | 10 | ").as_str()));
    }

    #[test]
    fn table_rows_repeat_in_input_order() {
        let rows: Vec<TableRow> = ["alpha", "beta", "gamma", "delta"]
            .iter()
            .map(|d| row(&[("description", d)]))
            .collect();
        let tables = BTreeMap::from([("items".to_string(), rows)]);
        let filled = fill(
            "{{table:items}}",
            &BTreeMap::new(),
            &tables,
            &[items_table(Some("<tr class=\"r\"><td>{{sno}}</td><td>{{description}}</td></tr>"))],
            &FillOptions::html(),
        );
        assert_eq!(filled.body.matches("<tr class=\"r\">").count(), 4);
        let positions: Vec<usize> = ["alpha", "beta", "gamma", "delta"]
            .iter()
            .map(|d| filled.body.find(d).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(filled.body.contains("<td>4</td><td>delta</td>"));
    }

    #[test]
    fn derived_amount_and_serial() {
        let tables = BTreeMap::from([(
            "items".to_string(),
            vec![
                row(&[("description", "Sand"), ("qty", "2.5"), ("rate", "1,200")]),
                row(&[("description", "Labour"), ("qty", "3"), ("rate", "x")]),
                row(&[("description", "Fixed"), ("qty", "1"), ("rate", "10"), ("amount", "99")]),
            ],
        )]);
        let filled = fill(
            "{{table:items}}",
            &BTreeMap::new(),
            &tables,
            &[items_table(None)],
            &FillOptions::text(),
        );
        let lines: Vec<&str> = filled.body.lines().collect();
        assert_eq!(
            lines,
            vec![
                "S.No. | Description | Qty | Rate | Amount",
                "1 | Sand | 2.5 | 1,200 | 3000.00",
                "2 | Labour | 3 | x | ",
                "3 | Fixed | 1 | 10 | 99",
            ]
        );
    }

    #[test]
    fn row_fields_outside_columns_are_ignored() {
        let table = TemplateTable {
            key: "items".into(),
            title: "Works".into(),
            columns: vec![TableColumn::new("description", "Description")],
            row_template: None,
        };
        let tables = BTreeMap::from([(
            "items".to_string(),
            vec![row(&[("description", "Drain"), ("secret", "hidden")])],
        )]);
        let filled = fill("{{table:items}}", &BTreeMap::new(), &tables, &[table], &FillOptions::html());
        assert!(!filled.body.contains("hidden"));
        assert!(filled.body.contains("<caption>Works</caption>"));
        assert!(filled.body.contains("<td>Drain</td>"));
    }

    #[test]
    fn unknown_table_prints_blank_and_is_missing() {
        let filled = fill(
            "Rows: {{table:extras}}",
            &BTreeMap::new(),
            &BTreeMap::new(),
            &[],
            &FillOptions::text(),
        );
        assert_eq!(filled.body, "Rows: __________");
        assert_eq!(filled.missing, vec!["table:extras".to_string()]);
    }

    #[test]
    fn empty_table_keeps_header_and_is_missing() {
        let filled = fill(
            "{{table:items}}",
            &BTreeMap::new(),
            &BTreeMap::new(),
            &[items_table(None)],
            &FillOptions::html(),
        );
        assert!(filled.body.contains("<tbody></tbody>"));
        assert_eq!(filled.missing, vec!["table:items".to_string()]);
    }

    #[test]
    fn row_template_falls_back_to_scalar_values() {
        let tables = BTreeMap::from([("items".to_string(), vec![row(&[("qty", "4")])])]);
        let filled = fill(
            "{{table:items}}",
            &values(&[("unit", "bags")]),
            &tables,
            &[items_table(Some("{{qty}} {{unit}} {{grade}}"))],
            &FillOptions::text(),
        );
        assert!(filled.body.ends_with("4 bags __________"));
        assert_eq!(filled.missing, vec!["grade".to_string()]);
    }

    #[test]
    fn scans_scalar_and_table_keys_separately() {
        let body = "{{a}} {{table:t1}} {{ b }} {{a}} {{table:t1}} {{table:t2}}";
        assert_eq!(scan_keys(body), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(scan_table_keys(body), vec!["t1".to_string(), "t2".to_string()]);
    }
}

//! Rendering collaborator seam.
//!
//! The composer produces HTML sections; a [`DocumentRenderer`] turns them
//! into something printable. PDF engines live outside this workspace and
//! plug in through the same trait.

use std::fmt::Write as _;

use serde::Serialize;
use tender_core::enums::{Orientation, PageSize};

use crate::compose::ComposedDocument;
use crate::error::RenderError;
use crate::html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
}

impl RenderOptions {
    /// Use the page setup the document was composed with.
    #[must_use]
    pub const fn from_document(doc: &ComposedDocument) -> Self {
        Self {
            page_size: doc.page_size,
            orientation: doc.orientation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Html(String),
    Pdf(Vec<u8>),
}

impl Rendered {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Html(html) => html.as_bytes(),
            Self::Pdf(bytes) => bytes,
        }
    }
}

pub trait DocumentRenderer {
    /// Render the whole document.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the renderer cannot produce output.
    fn render(&self, doc: &ComposedDocument, options: &RenderOptions)
    -> Result<Rendered, RenderError>;

    /// First page of each section, aligned with `doc.sections`.
    fn start_pages(&self, doc: &ComposedDocument) -> Vec<u32>;
}

/// Emits one HTML page for the browser's print dialog.
///
/// Every section starts on a new sheet. Without a layout engine the renderer
/// counts one sheet per section.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrintRenderer;

const PRINT_CSS: &str = "body{font-family:serif;font-size:12pt;margin:0}\
.pack-section{break-after:page;page-break-after:always}\
.pack-section:last-child{break-after:auto;page-break-after:auto}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #000;padding:4px;vertical-align:top}\
.restricted-warning{border:2px solid #b00;padding:8px;color:#b00}\
.placeholder{color:#666;font-style:italic}";

impl DocumentRenderer for BrowserPrintRenderer {
    fn render(
        &self,
        doc: &ComposedDocument,
        options: &RenderOptions,
    ) -> Result<Rendered, RenderError> {
        let title = doc
            .toc_entries
            .first()
            .or_else(|| doc.sections.first().map(|section| &section.title))
            .map_or_else(String::new, |title| html::escape(title));

        let mut out = String::from("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
        let _ = write!(
            out,
            "<title>{title}</title><style>@page{{size:{} {};margin:10mm}}{PRINT_CSS}</style></head><body>\n",
            options.page_size.css_name(),
            options.orientation,
        );
        for section in &doc.sections {
            out.push_str(&section.html);
            out.push('\n');
        }
        out.push_str("</body></html>\n");
        Ok(Rendered::Html(out))
    }

    fn start_pages(&self, doc: &ComposedDocument) -> Vec<u32> {
        (1..).take(doc.sections.len()).collect()
    }
}

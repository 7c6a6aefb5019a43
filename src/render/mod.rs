//! HTML rendering with autoescaping tera templates.

use crate::db::{ROW_LIMIT, TypeState};
use crate::error::PageError;
use serde::Serialize;
use tera::{Context, Tera};

const RESULT_TEMPLATE: &str = include_str!("templates/result.html");
const ERROR_TEMPLATE: &str = include_str!("templates/error.html");

/// Served at `/style.css`; both pages link to it.
pub const STYLESHEET: &str = include_str!("templates/style.css");

// Names must keep the `.html` suffix so tera escapes every interpolated value.
const RESULT_NAME: &str = "result.html";
const ERROR_NAME: &str = "error.html";

#[derive(Serialize)]
struct RowView<'a> {
    id: String,
    abbreviation: &'a str,
    name: &'a str,
}

impl<'a> From<&'a TypeState> for RowView<'a> {
    fn from(row: &'a TypeState) -> Self {
        Self {
            id: row.id.to_string(),
            abbreviation: row.abbreviation.as_deref().unwrap_or_default(),
            name: row.name.as_deref().unwrap_or_default(),
        }
    }
}

pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (RESULT_NAME, RESULT_TEMPLATE),
            (ERROR_NAME, ERROR_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// Render the result table. Rows keep query order; at most [`ROW_LIMIT`] are shown.
    pub fn render_results(&self, rows: &[TypeState]) -> Result<String, PageError> {
        let rows: Vec<RowView<'_>> = rows.iter().take(ROW_LIMIT).map(RowView::from).collect();
        let mut context = Context::new();
        context.insert("rows", &rows);
        Ok(self.tera.render(RESULT_NAME, &context)?)
    }

    /// Render a complete error document for `err`.
    pub fn render_error(&self, err: &PageError) -> Result<String, PageError> {
        let mut context = Context::new();
        context.insert("status", &err.status().as_u16());
        context.insert("code", err.code());
        context.insert("message", &err.to_string());
        Ok(self.tera.render(ERROR_NAME, &context)?)
    }
}

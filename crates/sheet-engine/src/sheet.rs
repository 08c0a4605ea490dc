//! Sign-up sheet assembly
//!
//! Widens the parsed roster into the full eight-column table payload,
//! picks the row height, and hands everything to the embedded Typst
//! template through `sys.inputs`.

use std::collections::HashMap;

use chrono::Local;
use serde_json::{json, Value};

use crate::compiler::{self, EngineError};
use crate::layout::{self, COLUMN_HEADERS, COLUMN_PERCENTS};
use crate::roster::{parse_roster, RosterEntry};

/// Sign-up sheet template, embedded at compile time.
const SHEET_TEMPLATE: &str = include_str!("../templates/roster_sheet.typ");

/// Title prefix; the sheet date is appended at render time.
const TITLE_PREFIX: &str = "Daftar Pemain Mabar RBG";

/// Visual styling for the sheet.
///
/// Passed explicitly into assembly rather than living as module-level
/// defaults, so layout rules can be exercised in isolation.
#[derive(Debug, Clone)]
pub struct SheetStyle {
    /// Title font size in points.
    pub title_size_pt: f64,
    /// Body font size in points, applied to every cell.
    pub body_size_pt: f64,
    /// Grid stroke width in points, on every cell border.
    pub grid_pt: f64,
    /// Header row background fill as a hex color.
    pub header_fill: String,
    /// Extra bottom padding on the header row only, in points.
    pub header_pad_pt: f64,
    /// Page margins in points.
    pub margin_top_pt: f64,
    pub margin_bottom_pt: f64,
    pub margin_side_pt: f64,
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            title_size_pt: 14.0,
            body_size_pt: 10.0,
            grid_pt: 0.5,
            header_fill: "#f0f0f0".to_string(),
            header_pad_pt: 5.0,
            margin_top_pt: 20.0,
            margin_bottom_pt: 20.0,
            margin_side_pt: 30.0,
        }
    }
}

/// A rendered sign-up sheet.
#[derive(Debug, Clone)]
pub struct RenderedSheet {
    /// The PDF byte stream.
    pub pdf: Vec<u8>,
    /// Number of pages the layout engine produced.
    pub page_count: usize,
}

/// Render raw form text into a PDF sheet dated today.
pub fn render_sheet_sync(text: &str) -> Result<RenderedSheet, EngineError> {
    render_dated(text, &SheetStyle::default(), &today())
}

/// Async render with a compile timeout, dated today.
#[cfg(feature = "server")]
pub async fn render_sheet(text: &str, timeout_ms: u64) -> Result<RenderedSheet, EngineError> {
    let inputs = template_inputs(&parse_roster(text), &SheetStyle::default(), &today());
    let (pdf, page_count) =
        compiler::compile_source(SHEET_TEMPLATE.to_string(), inputs, timeout_ms).await?;
    Ok(RenderedSheet { pdf, page_count })
}

/// Render with the sheet date pinned.
///
/// The public entry points stamp the generation instant; tests pin a
/// fixed date instead.
pub fn render_dated(
    text: &str,
    style: &SheetStyle,
    date: &str,
) -> Result<RenderedSheet, EngineError> {
    let inputs = template_inputs(&parse_roster(text), style, date);
    let (pdf, page_count) = compiler::compile_source_sync(SHEET_TEMPLATE.to_string(), inputs)?;
    Ok(RenderedSheet { pdf, page_count })
}

/// The sheet date in `DD-MM-YYYY`, taken at render time.
pub fn today() -> String {
    Local::now().format("%d-%m-%Y").to_string()
}

/// Table payload: each entry widened with six trailing no-value cells
/// for the game, payment, and remark columns. The marker is JSON
/// `null`, never the empty string, so the template can tell "no value"
/// from a deliberately blank string.
fn table_rows(entries: &[RosterEntry]) -> Vec<Value> {
    entries
        .iter()
        .map(|entry| {
            let mut row = vec![json!(entry.index), json!(entry.name)];
            row.extend(std::iter::repeat(Value::Null).take(COLUMN_HEADERS.len() - 2));
            Value::Array(row)
        })
        .collect()
}

/// Everything the template reads from `sys.inputs`.
fn template_inputs(
    entries: &[RosterEntry],
    style: &SheetStyle,
    date: &str,
) -> HashMap<String, Value> {
    let mut inputs = HashMap::new();
    inputs.insert(
        "title".to_string(),
        json!(format!("{} {}", TITLE_PREFIX, date)),
    );
    inputs.insert("headers".to_string(), json!(COLUMN_HEADERS));
    inputs.insert("col_percents".to_string(), json!(COLUMN_PERCENTS));
    inputs.insert("rows".to_string(), Value::Array(table_rows(entries)));
    inputs.insert(
        "row_height_pt".to_string(),
        json!(layout::row_height_for(entries.len())),
    );
    inputs.insert(
        "style".to_string(),
        json!({
            "title_size_pt": style.title_size_pt,
            "body_size_pt": style.body_size_pt,
            "grid_pt": style.grid_pt,
            "header_fill": style.header_fill,
            "header_pad_pt": style.header_pad_pt,
            "margin_top_pt": style.margin_top_pt,
            "margin_bottom_pt": style.margin_bottom_pt,
            "margin_side_pt": style.margin_side_pt,
        }),
    );
    inputs
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_table_rows_widened_with_null_cells() {
        let entries = parse_roster("1. Alice\n2. Bob\n");
        let rows = table_rows(&entries);

        assert_eq!(rows.len(), 2);
        let first = rows[0].as_array().unwrap();
        assert_eq!(first.len(), COLUMN_HEADERS.len());
        assert_eq!(first[0], json!("1"));
        assert_eq!(first[1], json!("Alice"));
        for cell in &first[2..] {
            assert_eq!(cell, &Value::Null);
        }
    }

    #[test]
    fn test_template_inputs_title_and_height() {
        let entries = parse_roster("1. Alice");
        let inputs = template_inputs(&entries, &SheetStyle::default(), "07-03-2026");

        assert_eq!(
            inputs["title"],
            json!("Daftar Pemain Mabar RBG 07-03-2026")
        );
        assert_eq!(inputs["row_height_pt"], json!(25.0));
        assert_eq!(inputs["headers"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_render_small_roster() {
        let sheet = render_dated("1. Alice\n2. Bob\n", &SheetStyle::default(), "07-03-2026")
            .expect("render should succeed");

        assert!(sheet.pdf.starts_with(b"%PDF"));
        assert_eq!(sheet.page_count, 1);
    }

    #[test]
    fn test_render_empty_roster_is_header_only() {
        let sheet = render_dated("\n3 NoDot\n", &SheetStyle::default(), "07-03-2026")
            .expect("render should succeed");

        assert!(sheet.pdf.starts_with(b"%PDF"));
        assert_eq!(sheet.page_count, 1);
    }

    #[test]
    fn test_render_is_repeatable_for_fixed_date() {
        let style = SheetStyle::default();
        let a = render_dated("1. Alice", &style, "07-03-2026").unwrap();
        let b = render_dated("1. Alice", &style, "07-03-2026").unwrap();

        // Byte identity is not guaranteed (the library stamps metadata
        // timestamps), but the structure must match.
        assert_eq!(a.page_count, b.page_count);
        assert_eq!(a.pdf.len(), b.pdf.len());
    }

    #[test]
    fn test_today_format() {
        let date = today();
        // DD-MM-YYYY
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[2], b'-');
        assert_eq!(date.as_bytes()[5], b'-');
    }
}

//! Table geometry for the sign-up sheet
//!
//! The sheet targets a single A4 page for typical rosters. Row height
//! is an approximation derived from the page budget, not a measurement
//! of rendered content.

/// A4 page height in points.
pub const PAGE_HEIGHT_PT: f64 = 842.0;

/// Margin assumed by the height budget: one inch top and bottom.
/// Deliberately independent of the margins the template actually sets.
pub const BUDGET_MARGIN_PT: f64 = 72.0;

/// Minimum row height in points.
pub const MIN_ROW_HEIGHT_PT: f64 = 12.0;

/// Maximum row height in points.
pub const MAX_ROW_HEIGHT_PT: f64 = 25.0;

/// Column headers, in table order.
pub const COLUMN_HEADERS: [&str; 8] = [
    "Nomor",
    "Nama",
    "Game 1",
    "Game 2",
    "Game 3",
    "Game 4",
    "Total Bayar",
    "Keterangan",
];

/// Column widths as percentages of the usable page width. Sums to 100.
pub const COLUMN_PERCENTS: [u32; 8] = [8, 22, 10, 10, 10, 10, 15, 15];

/// Uniform row height for a table of `row_count` data entries.
///
/// Divides the page budget by the row count plus two (slack for the
/// header row and padding), clamped to `[12, 25]` points. The same
/// height is applied to every row, header included. `row_count = 0`
/// yields `available / 2`, well above the maximum, so it clamps to 25.
pub fn row_height_for(row_count: usize) -> f64 {
    let available = PAGE_HEIGHT_PT - 2.0 * BUDGET_MARGIN_PT;
    let ideal = available / (row_count as f64 + 2.0);
    ideal.clamp(MIN_ROW_HEIGHT_PT, MAX_ROW_HEIGHT_PT)
}

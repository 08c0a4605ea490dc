//! Roster parsing
//!
//! The form submits one player per line as `"<number>. <name>"`. The
//! number and name are whatever sits before/after the first period,
//! so `"12. Budi S."` keeps the trailing initial intact.

/// One parsed roster line.
///
/// `index` is carried as text; nothing requires it to be numeric and
/// it is display-only downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub index: String,
    pub name: String,
}

/// Parse raw form text into roster entries, preserving input order.
///
/// A line is kept only when it contains a period and both halves
/// around the first period are non-empty after trimming. Anything
/// else (blank lines, lines without a period, lines missing a half)
/// is skipped silently rather than failing the whole roster.
pub fn parse_roster(text: &str) -> Vec<RosterEntry> {
    text.trim().lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<RosterEntry> {
    let (index, name) = line.split_once('.')?;
    let index = index.trim();
    let name = name.trim();

    if index.is_empty() || name.is_empty() {
        return None;
    }

    Some(RosterEntry {
        index: index.to_string(),
        name: name.to_string(),
    })
}

//! Mabar sign-up sheet rendering engine
//!
//! This crate turns a newline-delimited roster of `"number. name"`
//! entries into a formatted tabular PDF, compiled entirely in memory
//! via Typst:
//! - Line parsing into ordered roster entries
//! - Row-height sizing so the table fits a page budget
//! - Document assembly against an embedded sheet template
//!
//! # Feature Flags
//!
//! - `server` (default): Enables async `render_sheet` with timeout (requires tokio)

pub mod compiler;
pub mod layout;
pub mod roster;
pub mod sheet;
pub mod world;

pub use compiler::EngineError;
pub use roster::{parse_roster, RosterEntry};

// Always export sync version
pub use sheet::{render_dated, render_sheet_sync, RenderedSheet, SheetStyle};

// Export async version only with server feature
#[cfg(feature = "server")]
pub use sheet::render_sheet;

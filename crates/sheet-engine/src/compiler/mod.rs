//! Typst compilation wrapper with timeout and error handling

pub mod errors;
pub mod render;

pub use errors::{Diagnostic, EngineError};
pub use render::compile_source_sync;

#[cfg(feature = "server")]
pub use render::compile_source;

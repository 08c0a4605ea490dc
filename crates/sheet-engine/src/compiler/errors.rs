//! Error types for in-memory compilation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single diagnostic from the layout engine, message text verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable error message
    pub message: String,
    /// Helpful hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Engine-side errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("compilation failed: {}", join_messages(.0))]
    Compile(Vec<Diagnostic>),

    #[error("compilation timeout after {0}ms")]
    Timeout(u64),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("invalid template input: {0}")]
    InvalidInput(String),

    #[error("internal engine error: {0}")]
    Internal(String),
}

fn join_messages(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

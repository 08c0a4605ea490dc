//! Core rendering logic
//!
//! Compiles a Typst source with injected inputs and exports the result
//! as PDF bytes. The async variant wraps the sync path in a blocking
//! task with a timeout.

use std::collections::HashMap;

use typst::diag::{Severity, SourceDiagnostic};

use super::errors::{Diagnostic, EngineError};
use crate::world::VirtualWorld;

/// Compile Typst source to PDF bytes, returning the page count.
pub fn compile_source_sync(
    source: String,
    inputs: HashMap<String, serde_json::Value>,
) -> Result<(Vec<u8>, usize), EngineError> {
    let world = VirtualWorld::new(source, inputs)?;

    let warned = typst::compile(&world);
    for warning in &warned.warnings {
        tracing::warn!("typst warning: {}", warning.message);
    }

    let document = match warned.output {
        Ok(document) => document,
        Err(diagnostics) => {
            let errors = collect_errors(&diagnostics);
            if errors.is_empty() {
                // Err with warnings only should not happen, but keep the
                // error path total.
                return Err(EngineError::Compile(vec![Diagnostic::new(
                    "compilation failed with unknown error",
                )]));
            }
            return Err(EngineError::Compile(errors));
        }
    };

    let pdf = typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
        .map_err(|e| EngineError::Export(format!("{:?}", e)))?;

    Ok((pdf, document.pages.len()))
}

/// Compile with a timeout, off the async runtime's worker threads.
#[cfg(feature = "server")]
pub async fn compile_source(
    source: String,
    inputs: HashMap<String, serde_json::Value>,
    timeout_ms: u64,
) -> Result<(Vec<u8>, usize), EngineError> {
    let result = tokio::time::timeout(
        std::time::Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || compile_source_sync(source, inputs)),
    )
    .await;

    match result {
        Ok(Ok(compiled)) => compiled,
        Ok(Err(join_error)) => Err(EngineError::Internal(format!(
            "compilation task panicked: {}",
            join_error
        ))),
        Err(_elapsed) => Err(EngineError::Timeout(timeout_ms)),
    }
}

/// Extract error-severity diagnostics, keeping hints when present.
fn collect_errors(diagnostics: &[SourceDiagnostic]) -> Vec<Diagnostic> {
    diagnostics
        .iter()
        .filter(|diag| matches!(diag.severity, Severity::Error))
        .map(|diag| {
            let mut error = Diagnostic::new(diag.message.to_string());
            if !diag.hints.is_empty() {
                let hint = diag
                    .hints
                    .iter()
                    .map(|h| h.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                error = error.with_hint(hint);
            }
            error
        })
        .collect()
}

//! Diagnostics forwarded to `tracing`

use super::{Diagnostic, Diagnostics, Level};

/// Default sink: emits each diagnostic as a structured `tracing` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        let path = diagnostic
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let operation = diagnostic.operation;

        match diagnostic.level {
            Level::Debug => {
                tracing::debug!(operation, path = %path, "{}", diagnostic.message)
            }
            Level::Warn => {
                tracing::warn!(operation, path = %path, "{}", diagnostic.message)
            }
            Level::Error => {
                tracing::error!(operation, path = %path, "{}", diagnostic.message)
            }
        }
    }
}

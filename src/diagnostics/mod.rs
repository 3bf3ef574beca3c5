//! Pluggable diagnostics sink
//!
//! Every warning and error path in `FileStore` reports through a
//! [`Diagnostics`] handle instead of a global logger.

mod recording;
mod traits;
mod tracing_sink;

pub use recording::RecordingDiagnostics;
pub use traits::{Diagnostic, Diagnostics, Level};
pub use tracing_sink::TracingDiagnostics;

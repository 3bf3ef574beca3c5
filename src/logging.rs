//! Process-wide `tracing` subscriber for the CLI

use crate::{Error, Result};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static LOGGING_INIT: Once = Once::new();

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Repeated calls are no-ops once initialization has run.
pub fn init_logging() -> Result<()> {
    let mut init_result = Ok(());

    LOGGING_INIT.call_once(|| {
        init_result = tracing_subscriber::fmt()
            .with_env_filter(default_env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| Error::Config(format!("failed to initialize logging: {}", e)));
    });

    init_result
}

fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn test_init_logging_is_idempotent() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_ok());
    }
}

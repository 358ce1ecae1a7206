use thiserror::Error;

use multistart_args::{ParseError, SchemaError};

/// Top-level error for the launcher binary.
///
/// Parse failures pass their usage-block payload through unchanged; everything else
/// carries its own context.
#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to start '{command}': {source}")]
    Start {
        command: String,
        source: std::io::Error,
    },

    #[cfg(windows)]
    #[error(transparent)]
    Platform(#[from] crate::platform::PlatformError),
}

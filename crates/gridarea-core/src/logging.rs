#![forbid(unsafe_code)]

//! Logging glue.
//!
//! Libraries in this workspace log through `tracing` behind a `tracing`
//! feature so that consumers who never install a subscriber pay nothing.
//! Binaries call [`init`] once at startup.
//!
//! Filtering follows `RUST_LOG` (`EnvFilter`); when it is unset the
//! `default_directive` passed to [`init`] applies.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

/// Output format for [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Text,
    /// One JSON object per record. Needs the `tracing-json` feature;
    /// falls back to text without it.
    Json,
}

impl LogFormat {
    /// Parse `text` or `json` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Install a global subscriber writing to stderr.
///
/// Returns `false` if a subscriber was already installed.
#[cfg(feature = "tracing-subscriber")]
pub fn init(format: LogFormat, default_directive: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        #[cfg(feature = "tracing-json")]
        LogFormat::Json => builder.json().try_init().is_ok(),
        _ => builder.try_init().is_ok(),
    }
}

//! Structured logging for the cod squad Android build tools
//!
//! Installs a `tracing` subscriber that writes to stderr so that stdout stays
//! reserved for command output (including `--json` documents).

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over [`TelemetryConfig::log_level`].
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level {:?}: {}", config.log_level, e))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target),
            )
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON lines
    pub json: bool,
    /// Include the event target (module path)
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Build from a configured base level and the `-v`/`-q` flags
    ///
    /// Each `-v` raises the level one step from the configured base; `-q`
    /// limits output to errors.
    pub fn from_verbosity(base_level: &str, verbose: u8, quiet: bool, json: bool) -> Self {
        let log_level = if quiet {
            "error".to_string()
        } else {
            match verbose {
                0 => base_level.to_string(),
                1 => "info".to_string(),
                2 => "debug".to_string(),
                _ => "trace".to_string(),
            }
        };

        Self {
            log_level,
            json,
            show_target: verbose >= 2,
        }
    }
}

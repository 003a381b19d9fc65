//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

const CANDIDATES: [&str; 3] = [".codsquad.toml", "codsquad.toml", ".config/codsquad.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, or discover one in the current directory,
    /// or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::discover(Path::new(".")),
        }
    }

    /// Look for a configuration file under `dir`, using defaults if none exists
    pub fn discover(dir: &Path) -> Result<Self> {
        match find_config_file(dir) {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Load a specific file; a missing file is an error
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config_not_found(path));
        }
        Ok(Self {
            schema: load_config_file(path)?,
            path: Some(path.to_path_buf()),
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|p| p.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}", path.display())).with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}", path.display()),
        )
        .with_source(e)
    })
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|e| {
            Error::new(
                ErrorCode::ConfigValidationError,
                format!("Cannot expand path {}: {}", raw, e),
            )
        })
}

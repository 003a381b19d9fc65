//! Core utilities for the cod squad Android build tools
//!
//! This crate provides shared functionality used by the Android tooling:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Process execution**: Running external commands such as the Gradle wrapper
//! - **Configuration**: TOML-based configuration with defaults for every key
//!
//! # Example
//!
//! ```rust,no_run
//! use codsquad_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("relocating the {} package", config.schema.relocate.variant);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}

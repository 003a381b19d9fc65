//! Terminal output helpers for the cod squad Android build tools
//!
//! - Status messages
//! - Size and duration formatting
//! - Spinners for long-running Gradle tasks

#![warn(missing_docs)]

pub mod output;
pub mod progress;

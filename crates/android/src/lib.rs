//! Android build integration for the cod squad Flutter app
//!
//! This crate provides:
//! - Project layout conventions (Gradle outputs, Flutter output directory)
//! - Post-build artifact relocation
//! - Task completion hooks keyed by Gradle task name
//! - Gradle wrapper integration
//! - The Android build descriptor and its validation

#![warn(missing_docs)]

pub mod descriptor;
pub mod gradle;
pub mod hooks;
pub mod layout;
pub mod relocate;

pub use hooks::{TaskHook, TaskHooks};
pub use layout::{BuildVariant, ProjectLayout};
pub use relocate::{ArtifactRelocator, RelocationOutcome};

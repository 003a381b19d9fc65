//! Project layout conventions
//!
//! Gradle writes packages to `<module-build-dir>/outputs/apk/<variant>/`,
//! while the Flutter tool expects them in
//! `<project-root>/../build/app/outputs/flutter-apk/`.

use codsquad_core::config::{expand_path, ConfigSchema};
use codsquad_core::error::{Error, ErrorCode, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default Flutter output directory, relative to the Android project root
pub const FLUTTER_APK_DIR: &str = "../build/app/outputs/flutter-apk";

/// Android build variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildVariant {
    /// Debug-signed development build
    Debug,
    /// Flutter profile build
    Profile,
    /// Release build
    Release,
}

impl BuildVariant {
    /// Lowercase variant name as used in Gradle output paths
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Debug => "debug",
            BuildVariant::Profile => "profile",
            BuildVariant::Release => "release",
        }
    }

    /// Name of the Gradle task assembling this variant
    pub fn assemble_task(&self) -> String {
        format!("assemble{}", capitalize(self.as_str()))
    }

    /// File name of the package Gradle produces
    pub fn apk_file_name(&self) -> String {
        format!("app-{}.apk", self.as_str())
    }

    /// Package path relative to the module build directory
    pub fn apk_relative_path(&self) -> PathBuf {
        Path::new("outputs")
            .join("apk")
            .join(self.as_str())
            .join(self.apk_file_name())
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildVariant::Debug),
            "profile" => Ok(BuildVariant::Profile),
            "release" => Ok(BuildVariant::Release),
            other => Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("Unknown build variant: {}", other),
            )
            .with_suggestion("Use one of: debug, profile, release")),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolved directories of an Android Gradle project embedded in a Flutter app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    project_root: PathBuf,
    module_build_dir: PathBuf,
    flutter_output_dir: PathBuf,
}

impl ProjectLayout {
    /// Layout with the default `app` module
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_module(project_root, "app")
    }

    /// Layout for a named application module
    pub fn with_module(project_root: impl Into<PathBuf>, module: &str) -> Self {
        let project_root = project_root.into();
        Self {
            module_build_dir: project_root.join(module).join("build"),
            flutter_output_dir: project_root.join(FLUTTER_APK_DIR),
            project_root,
        }
    }

    /// Override the module build directory
    pub fn with_build_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.module_build_dir = self.project_root.join(dir);
        self
    }

    /// Override the Flutter output directory
    pub fn with_flutter_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.flutter_output_dir = self.project_root.join(dir);
        self
    }

    /// Resolve the layout from configuration
    ///
    /// `project_root` overrides `general.project_root` when given. Relative
    /// configured paths are resolved against the project root.
    pub fn from_config(project_root: Option<&Path>, schema: &ConfigSchema) -> Result<Self> {
        let root = match project_root {
            Some(root) => root.to_path_buf(),
            None => expand_path(&schema.general.project_root)?,
        };

        let mut layout = Self::with_module(root, &schema.general.module)
            .with_flutter_output_dir(expand_path(&schema.relocate.target_dir)?);
        if let Some(dir) = &schema.relocate.build_dir {
            layout = layout.with_build_dir(expand_path(dir)?);
        }
        Ok(layout)
    }

    /// Android project root
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build directory of the application module
    pub fn module_build_dir(&self) -> &Path {
        &self.module_build_dir
    }

    /// Directory the Flutter tool reads packages from
    pub fn flutter_output_dir(&self) -> &Path {
        &self.flutter_output_dir
    }

    /// Where Gradle writes the package for `variant`
    pub fn package_path(&self, variant: BuildVariant) -> PathBuf {
        self.module_build_dir.join(variant.apk_relative_path())
    }
}

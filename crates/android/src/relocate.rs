//! Post-build artifact relocation
//!
//! Copies the package produced by an assemble task into the directory the
//! Flutter tool reads from. A missing package is reported, not treated as an
//! error; any I/O failure is.

use crate::hooks::TaskHook;
use crate::layout::{BuildVariant, ProjectLayout};
use codsquad_cli::output::{format_size, Status};
use codsquad_core::config::{expand_path, RelocateConfig};
use codsquad_core::error::{Error, Result, ResultExt};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a relocation run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationOutcome {
    /// The package was copied
    Copied {
        /// Package produced by Gradle
        source: PathBuf,
        /// Copy in the target directory
        target: PathBuf,
        /// Bytes copied
        bytes: u64,
    },
    /// No package existed at the source path
    SourceMissing {
        /// Path that was checked
        source: PathBuf,
    },
}

impl RelocationOutcome {
    /// Whether a copy was made
    pub fn is_copied(&self) -> bool {
        matches!(self, RelocationOutcome::Copied { .. })
    }

    /// Print the outcome as a status line
    pub fn print(&self) {
        match self {
            RelocationOutcome::Copied { bytes, .. } => {
                Status::success(format!("{} ({})", self, format_size(*bytes)));
            }
            RelocationOutcome::SourceMissing { .. } => Status::warning(self),
        }
    }
}

impl fmt::Display for RelocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelocationOutcome::Copied { source, target, .. } => {
                write!(f, "Copied {} to {}", source.display(), target.display())
            }
            RelocationOutcome::SourceMissing { source } => {
                write!(f, "Source APK not found: {}", source.display())
            }
        }
    }
}

/// Copies a built package into another directory after a task completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRelocator {
    task: String,
    source: PathBuf,
    target_dir: PathBuf,
    quiet: bool,
}

impl ArtifactRelocator {
    /// Relocator for an explicit source file and target directory
    pub fn new(
        task: impl Into<String>,
        source: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            task: task.into(),
            source: source.into(),
            target_dir: target_dir.into(),
            quiet: false,
        }
    }

    /// Suppress the status line printed when run as a hook
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Relocator for `variant` following the Flutter conventions of `layout`
    pub fn for_variant(layout: &ProjectLayout, variant: BuildVariant) -> Self {
        Self::new(
            variant.assemble_task(),
            layout.package_path(variant),
            layout.flutter_output_dir(),
        )
    }

    /// Relocator described by the `[relocate]` section
    pub fn from_config(layout: &ProjectLayout, config: &RelocateConfig) -> Result<Self> {
        let variant: BuildVariant = config.variant.parse()?;
        let mut relocator = Self::for_variant(layout, variant);

        if let Some(task) = &config.task {
            relocator.task = task.clone();
        }
        if let Some(source) = &config.source {
            relocator.source = layout.module_build_dir().join(expand_path(source)?);
        }
        Ok(relocator)
    }

    /// Task whose completion triggers the relocation
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Package path checked for existence
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory the package is copied into
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Destination path of the copy; keeps the source file name
    pub fn target_path(&self) -> Result<PathBuf> {
        let file_name = self
            .source
            .file_name()
            .ok_or_else(|| Error::invalid_path(&self.source, "no file name to copy"))?;
        Ok(self.target_dir.join(file_name))
    }

    /// Run the relocation once
    ///
    /// The target directory is created first, whether or not the package
    /// exists. An existing copy is overwritten; other files in the target
    /// directory are left alone.
    pub fn relocate(&self) -> Result<RelocationOutcome> {
        let target = self.target_path()?;

        std::fs::create_dir_all(&self.target_dir)
            .map_err(Error::from)
            .context(format!("Creating {}", self.target_dir.display()))?;

        if !self.source.is_file() {
            warn!(source = %self.source.display(), "Source APK not found");
            return Ok(RelocationOutcome::SourceMissing {
                source: self.source.clone(),
            });
        }

        let bytes = std::fs::copy(&self.source, &target)
            .map_err(Error::from)
            .context(format!(
                "Copying {} to {}",
                self.source.display(),
                target.display()
            ))?;

        info!(
            source = %self.source.display(),
            target = %target.display(),
            bytes,
            "Relocated APK"
        );
        Ok(RelocationOutcome::Copied {
            source: self.source.clone(),
            target,
            bytes,
        })
    }
}

impl TaskHook for ArtifactRelocator {
    fn describe(&self) -> String {
        format!("relocate {}", self.source.display())
    }

    fn run(&self, _task: &str) -> Result<()> {
        let outcome = self.relocate()?;
        if !self.quiet {
            outcome.print();
        }
        Ok(())
    }
}

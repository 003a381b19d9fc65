//! Gradle build system integration
//!
//! Runs tasks through the project's Gradle wrapper and reports completed
//! tasks to the registered [`TaskHooks`].

use crate::hooks::TaskHooks;
use crate::layout::BuildVariant;
use codsquad_core::error::{Error, Result};
use codsquad_core::process::{run_command_in_dir, run_command_streaming_in_dir, CommandResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Wrapper script for the current platform
pub fn wrapper() -> &'static str {
    if cfg!(windows) {
        "gradlew.bat"
    } else {
        "./gradlew"
    }
}

/// Whether `project_dir` contains a Gradle wrapper
pub fn has_wrapper(project_dir: &Path) -> bool {
    let name = wrapper().trim_start_matches("./");
    project_dir.join(name).is_file()
}

/// Run a Gradle task, capturing output
pub fn run_task(project_dir: &Path, task: &str) -> Result<CommandResult> {
    let program = wrapper_path(project_dir)?;
    run_command_in_dir(&program.to_string_lossy(), &[task], project_dir)
}

/// Run a Gradle task with output streamed to the terminal; returns the exit code
pub fn run_task_streaming(project_dir: &Path, task: &str) -> Result<i32> {
    let program = wrapper_path(project_dir)?;
    run_command_streaming_in_dir(&program.to_string_lossy(), &[task], project_dir)
}

/// Clean build artifacts
pub fn clean(project_dir: &Path) -> Result<CommandResult> {
    run_task(project_dir, "clean")
}

/// Absolute path of the wrapper, so it resolves the same from any working directory
fn wrapper_path(project_dir: &Path) -> Result<PathBuf> {
    if has_wrapper(project_dir) {
        let root = std::fs::canonicalize(project_dir)?;
        Ok(root.join(wrapper().trim_start_matches("./")))
    } else {
        Err(Error::gradle(format!(
            "Gradle wrapper not found in {}",
            project_dir.display()
        ))
        .with_suggestion("Run from the android/ directory or pass --project-root"))
    }
}

/// Outcome of an assemble run
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Task that was run
    pub task: String,
    /// Whether Gradle exited successfully
    pub success: bool,
    /// Gradle exit code
    pub exit_code: i32,
    /// Hooks that ran after the task
    pub hooks_fired: usize,
    /// Captured stderr (empty when streaming)
    pub stderr: String,
}

/// Assemble `variant` and, if Gradle succeeds, notify `hooks` that the task completed
///
/// Hooks never run for a failed task. A hook error is returned as-is.
pub fn assemble(
    project_dir: &Path,
    variant: BuildVariant,
    hooks: &TaskHooks,
    stream: bool,
) -> Result<BuildReport> {
    let task = variant.assemble_task();
    info!(task = %task, project = %project_dir.display(), "Running Gradle task");

    let (exit_code, stderr) = if stream {
        (run_task_streaming(project_dir, &task)?, String::new())
    } else {
        let result = run_task(project_dir, &task)?;
        (result.exit_code, result.stderr)
    };

    let success = exit_code == 0;
    let hooks_fired = if success {
        hooks.task_completed(&task)?
    } else {
        warn!(task = %task, exit_code, "Gradle task failed; skipping hooks");
        0
    };

    Ok(BuildReport {
        task,
        success,
        exit_code,
        hooks_fired,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codsquad_core::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_missing_wrapper_is_gradle_error() {
        let dir = TempDir::new().unwrap();
        assert!(!has_wrapper(dir.path()));
        let err = run_task(dir.path(), "assembleDebug").unwrap_err();
        assert_eq!(err.code, ErrorCode::GradleError);
        assert!(err.suggestion.is_some());
    }

    #[cfg(unix)]
    mod fake_wrapper {
        use super::*;
        use crate::layout::ProjectLayout;
        use crate::relocate::ArtifactRelocator;
        use std::os::unix::fs::PermissionsExt;

        /// Write a `gradlew` that fakes `assemble<Variant>` by producing the package
        fn install_wrapper(root: &Path, exit_code: i32) {
            let script = format!(
                "#!/bin/sh\n\
                 case \"$1\" in\n\
                   assemble*)\n\
                     variant=$(echo \"${{1#assemble}}\" | tr '[:upper:]' '[:lower:]')\n\
                     mkdir -p app/build/outputs/apk/$variant\n\
                     printf 'apk-%s' \"$variant\" > app/build/outputs/apk/$variant/app-$variant.apk\n\
                     ;;\n\
                 esac\n\
                 exit {}\n",
                exit_code
            );
            let path = root.join("gradlew");
            std::fs::write(&path, script).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        fn project(exit_code: i32) -> (TempDir, ProjectLayout, TaskHooks) {
            let dir = TempDir::new().unwrap();
            let root = dir.path().join("android");
            std::fs::create_dir_all(&root).unwrap();
            install_wrapper(&root, exit_code);
            let layout = ProjectLayout::new(root);

            let relocator = ArtifactRelocator::for_variant(&layout, BuildVariant::Debug);
            let mut hooks = TaskHooks::new();
            hooks.after(relocator.task().to_string(), relocator);
            (dir, layout, hooks)
        }

        #[test]
        fn test_assemble_debug_relocates_package() {
            let (_dir, layout, hooks) = project(0);

            let report = assemble(layout.project_root(), BuildVariant::Debug, &hooks, false).unwrap();

            assert!(report.success);
            assert_eq!(report.task, "assembleDebug");
            assert_eq!(report.hooks_fired, 1);
            let copied = layout.flutter_output_dir().join("app-debug.apk");
            assert_eq!(std::fs::read_to_string(copied).unwrap(), "apk-debug");
        }

        #[test]
        fn test_assemble_release_does_not_relocate() {
            let (_dir, layout, hooks) = project(0);

            let report = assemble(layout.project_root(), BuildVariant::Release, &hooks, false).unwrap();

            assert!(report.success);
            assert_eq!(report.hooks_fired, 0);
            assert!(layout.package_path(BuildVariant::Release).is_file());
            assert!(!layout.flutter_output_dir().exists());
        }

        #[test]
        fn test_failed_task_skips_hooks() {
            let (_dir, layout, hooks) = project(1);

            let report = assemble(layout.project_root(), BuildVariant::Debug, &hooks, false).unwrap();

            assert!(!report.success);
            assert_eq!(report.exit_code, 1);
            assert_eq!(report.hooks_fired, 0);
            assert!(!layout.flutter_output_dir().exists());
        }
    }
}

//! cod squad Android CLI
//!
//! Build helpers for the Android embedding of the cod squad Flutter app.

use anyhow::Result;
use clap::{Parser, Subcommand};
use codsquad_android::descriptor::{self, Severity};
use codsquad_android::gradle;
use codsquad_android::{ArtifactRelocator, BuildVariant, ProjectLayout, TaskHooks};
use codsquad_cli::output::{format_duration, Status};
use codsquad_cli::progress;
use codsquad_core::config::Config;
use codsquad_core::error::{exit_codes, Error};
use codsquad_core::process;
use codsquad_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "codsquad-android")]
#[command(about = "Build helpers for the cod squad Android app")]
#[command(version)]
struct Cli {
    /// Android project root (the Flutter app's android/ directory)
    #[arg(short, long, global = true, env = "CODSQUAD_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the built package into the Flutter output directory
    Relocate {
        /// Build variant (defaults to the configured one)
        #[arg(long)]
        variant: Option<String>,
    },

    /// Report a completed Gradle task and run its hooks
    Hook {
        /// Name of the task that completed, e.g. assembleDebug
        task: String,
    },

    /// Assemble with Gradle, then run the hooks of the assemble task
    Build {
        /// Build variant (defaults to the configured one)
        #[arg(long)]
        variant: Option<String>,
        /// Clean before building
        #[arg(long)]
        clean: bool,
    },

    /// Show the resolved package and output paths
    Paths {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show and validate the Android build descriptor
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose environment
    Doctor,
}

/// Settings shared by every command
struct Context {
    config: Config,
    layout: ProjectLayout,
    quiet: bool,
    verbose: u8,
}

impl Context {
    fn relocator(&self, variant: Option<&str>) -> codsquad_core::Result<ArtifactRelocator> {
        let mut relocate = self.config.schema.relocate.clone();
        if let Some(variant) = variant {
            relocate.variant = variant.to_string();
            relocate.task = None;
            relocate.source = None;
        }
        Ok(ArtifactRelocator::from_config(&self.layout, &relocate)?.quiet(self.quiet))
    }

    fn hooks(&self) -> codsquad_core::Result<TaskHooks> {
        let relocator = self.relocator(None)?;
        let mut hooks = TaskHooks::new();
        hooks.after(relocator.task().to_string(), relocator);
        Ok(hooks)
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            Status::info(message);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.code.exit_code());
        }
    };

    codsquad_telemetry::init_with_config(TelemetryConfig::from_verbosity(
        &config.schema.logging.level,
        cli.verbose,
        cli.quiet,
        config.schema.logging.json,
    ))?;

    let layout = match ProjectLayout::from_config(cli.project_root.as_deref(), &config.schema) {
        Ok(layout) => layout,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(e.code.exit_code());
        }
    };

    let ctx = Context {
        config,
        layout,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Relocate { variant } => run_relocate(&ctx, variant.as_deref()),
        Commands::Hook { task } => run_hook(&ctx, &task),
        Commands::Build { variant, clean } => run_build(&ctx, variant.as_deref(), clean),
        Commands::Paths { json } => run_paths(&ctx, json),
        Commands::Info { json } => run_info(&ctx, json),
        Commands::Doctor => Ok(run_doctor(&ctx)),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            Status::error(&e.to_string());
            e.code.exit_code()
        }
    };

    std::process::exit(exit_code);
}

fn run_relocate(ctx: &Context, variant: Option<&str>) -> Result<i32, Error> {
    let outcome = ctx.relocator(variant)?.relocate()?;
    if !ctx.quiet {
        outcome.print();
    }
    Ok(exit_codes::SUCCESS)
}

fn run_hook(ctx: &Context, task: &str) -> Result<i32, Error> {
    let hooks = ctx.hooks()?;
    let fired = hooks.task_completed(task)?;
    if fired == 0 {
        ctx.info(&format!("No hooks registered for {}", task));
    }
    Ok(exit_codes::SUCCESS)
}

fn run_build(ctx: &Context, variant: Option<&str>, clean: bool) -> Result<i32, Error> {
    let variant: BuildVariant = variant
        .unwrap_or(&ctx.config.schema.relocate.variant)
        .parse()?;
    let project_dir = ctx.layout.project_root();
    let hooks = ctx.hooks()?;
    let stream = ctx.verbose > 0;

    if clean {
        ctx.info("Cleaning...");
        let result = gradle::clean(project_dir)?;
        if !result.success {
            Status::error("Clean failed");
            eprintln!("{}", result.combined_output());
            return Ok(exit_codes::FAILURE);
        }
    }

    let started = Instant::now();
    let task = variant.assemble_task();
    let spinner = (!stream && !ctx.quiet).then(|| progress::spinner(&format!("Running {}...", task)));

    let report = match gradle::assemble(project_dir, variant, &hooks, stream) {
        Ok(report) => report,
        Err(e) => {
            if let Some(pb) = &spinner {
                progress::finish_error(pb, &task);
            }
            return Err(e);
        }
    };

    if let Some(pb) = &spinner {
        if report.success {
            progress::finish_success(pb, &task);
        } else {
            progress::finish_error(pb, &task);
        }
    }

    if report.success {
        if !ctx.quiet {
            Status::success(&format!(
                "{} succeeded in {}",
                report.task,
                format_duration(started.elapsed())
            ));
        }
        Ok(exit_codes::SUCCESS)
    } else {
        Status::error(&format!("{} failed (exit code {})", report.task, report.exit_code));
        if !report.stderr.is_empty() {
            eprintln!("{}", report.stderr);
        }
        Ok(exit_codes::FAILURE)
    }
}

#[derive(Serialize)]
struct PathsReport {
    task: String,
    source: PathBuf,
    source_exists: bool,
    target_dir: PathBuf,
    target: PathBuf,
}

fn run_paths(ctx: &Context, json: bool) -> Result<i32, Error> {
    let relocator = ctx.relocator(None)?;
    let report = PathsReport {
        task: relocator.task().to_string(),
        source: relocator.source().to_path_buf(),
        source_exists: relocator.source().is_file(),
        target_dir: relocator.target_dir().to_path_buf(),
        target: relocator.target_path()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(exit_codes::SUCCESS);
    }

    Status::header("Relocation");
    Status::field("Trigger task", &report.task);
    Status::field("Source", report.source.display());
    Status::field(
        "Source present",
        if report.source_exists { "yes" } else { "no" },
    );
    Status::field("Target directory", report.target_dir.display());
    Status::field("Target", report.target.display());
    Ok(exit_codes::SUCCESS)
}

#[derive(Serialize)]
struct InfoReport<'a> {
    android: &'a codsquad_core::config::AndroidBuildConfig,
    dependencies: Vec<String>,
    issues: Vec<descriptor::Issue>,
}

fn run_info(ctx: &Context, json: bool) -> Result<i32, Error> {
    let build = &ctx.config.schema.android;
    let issues = descriptor::validate(build);
    let exit_code = if descriptor::has_errors(&issues) {
        exit_codes::VALIDATION_ERROR
    } else {
        exit_codes::SUCCESS
    };

    if json {
        let report = InfoReport {
            android: build,
            dependencies: descriptor::dependencies(build),
            issues,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(exit_code);
    }

    Status::header(&ctx.config.schema.general.project_name);
    Status::field("Namespace", &build.namespace);
    Status::field("Application ID", &build.application_id);
    Status::field(
        "Version",
        format!("{} ({})", build.version_name, build.version_code),
    );
    Status::field(
        "SDK (min/target/compile)",
        format!("{}/{}/{}", build.min_sdk, build.target_sdk, build.compile_sdk),
    );
    Status::field("NDK", &build.ndk_version);
    Status::field("Java", build.java_version);
    Status::field("Release signing", &build.release_signing);
    Status::field("Flutter source", &build.flutter_source);

    Status::subheader("Plugins");
    for plugin in &build.plugins {
        println!("  - {}", plugin);
    }
    Status::subheader("Dependencies");
    for dep in descriptor::dependencies(build) {
        println!("  - {}", dep);
    }

    if !issues.is_empty() {
        println!();
    }
    for issue in &issues {
        match issue.severity {
            Severity::Error => Status::error(&issue.to_string()),
            Severity::Warning => Status::warning(&issue.to_string()),
        }
    }

    Ok(exit_code)
}

fn run_doctor(ctx: &Context) -> i32 {
    println!("{}", "Environment Check".bold());
    println!();

    let project_dir = ctx.layout.project_root();
    let mut healthy = true;

    if gradle::has_wrapper(project_dir) {
        Status::success(&format!("gradle wrapper: {}", project_dir.display()));
    } else {
        Status::error(&format!("gradle wrapper: not found in {}", project_dir.display()));
        healthy = false;
    }

    match process::which_command("java") {
        Some(path) => Status::success(&format!("java: {}", path.display())),
        None => {
            Status::error("java: not found");
            healthy = false;
        }
    }

    for tool in ["flutter", "adb"] {
        match process::which_command(tool) {
            Some(path) => Status::success(&format!("{}: {}", tool, path.display())),
            None => Status::warning(&format!("{}: not found", tool)),
        }
    }

    if healthy {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    }
}

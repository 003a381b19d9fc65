//! Configuration schema definitions
//!
//! Every section is optional in the TOML file; missing keys fall back to the
//! conventions of the Flutter Android embedding.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub relocate: RelocateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub android: AndroidBuildConfig,
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Project name
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Root of the Android Gradle project (the `android/` directory of the Flutter app)
    #[serde(default = "default_project_root")]
    pub project_root: String,

    /// Application module name
    #[serde(default = "default_module")]
    pub module: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            project_root: default_project_root(),
            module: default_module(),
        }
    }
}

fn default_project_name() -> String {
    "cod_squad_app".to_string()
}

fn default_project_root() -> String {
    ".".to_string()
}

fn default_module() -> String {
    "app".to_string()
}

/// Post-build artifact relocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocateConfig {
    /// Build variant whose package is relocated
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Task whose completion triggers relocation (defaults to `assemble<Variant>`)
    #[serde(default)]
    pub task: Option<String>,

    /// Module build directory, relative to the project root (defaults to `<module>/build`)
    #[serde(default)]
    pub build_dir: Option<String>,

    /// Package path relative to the module build directory
    /// (defaults to `outputs/apk/<variant>/app-<variant>.apk`)
    #[serde(default)]
    pub source: Option<String>,

    /// Target directory, relative to the project root
    #[serde(default = "default_target_dir")]
    pub target_dir: String,
}

impl Default for RelocateConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            task: None,
            build_dir: None,
            source: None,
            target_dir: default_target_dir(),
        }
    }
}

fn default_variant() -> String {
    "debug".to_string()
}

fn default_target_dir() -> String {
    "../build/app/outputs/flutter-apk".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of the compact format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Android build descriptor, mirroring the app module's Gradle file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidBuildConfig {
    #[serde(default = "default_application_id")]
    pub namespace: String,

    #[serde(default = "default_application_id")]
    pub application_id: String,

    #[serde(default = "default_compile_sdk")]
    pub compile_sdk: u32,

    #[serde(default = "default_min_sdk")]
    pub min_sdk: u32,

    #[serde(default = "default_target_sdk")]
    pub target_sdk: u32,

    #[serde(default = "default_ndk_version")]
    pub ndk_version: String,

    /// Java source/target compatibility and Kotlin JVM target
    #[serde(default = "default_java_version")]
    pub java_version: u32,

    #[serde(default = "default_true")]
    pub core_library_desugaring: bool,

    #[serde(default = "default_desugar_jdk_libs")]
    pub desugar_jdk_libs: String,

    #[serde(default = "default_version_code")]
    pub version_code: u32,

    #[serde(default = "default_version_name")]
    pub version_name: String,

    /// Signing config used by the release build type
    #[serde(default = "default_release_signing")]
    pub release_signing: String,

    /// Flutter source directory, relative to the module
    #[serde(default = "default_flutter_source")]
    pub flutter_source: String,

    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,

    #[serde(default = "default_firebase_bom")]
    pub firebase_bom: String,

    #[serde(default = "default_firebase_libraries")]
    pub firebase_libraries: Vec<String>,
}

impl Default for AndroidBuildConfig {
    fn default() -> Self {
        Self {
            namespace: default_application_id(),
            application_id: default_application_id(),
            compile_sdk: default_compile_sdk(),
            min_sdk: default_min_sdk(),
            target_sdk: default_target_sdk(),
            ndk_version: default_ndk_version(),
            java_version: default_java_version(),
            core_library_desugaring: true,
            desugar_jdk_libs: default_desugar_jdk_libs(),
            version_code: default_version_code(),
            version_name: default_version_name(),
            release_signing: default_release_signing(),
            flutter_source: default_flutter_source(),
            plugins: default_plugins(),
            firebase_bom: default_firebase_bom(),
            firebase_libraries: default_firebase_libraries(),
        }
    }
}

fn default_application_id() -> String {
    "com.example.cod_squad_app".to_string()
}

fn default_compile_sdk() -> u32 {
    35
}

fn default_min_sdk() -> u32 {
    23
}

fn default_target_sdk() -> u32 {
    34
}

fn default_ndk_version() -> String {
    "27.0.12077973".to_string()
}

fn default_java_version() -> u32 {
    17
}

fn default_true() -> bool {
    true
}

fn default_desugar_jdk_libs() -> String {
    "2.0.4".to_string()
}

fn default_version_code() -> u32 {
    1
}

fn default_version_name() -> String {
    "1.0".to_string()
}

fn default_release_signing() -> String {
    "debug".to_string()
}

fn default_flutter_source() -> String {
    "../..".to_string()
}

fn default_plugins() -> Vec<String> {
    vec![
        "com.android.application",
        "kotlin-android",
        "dev.flutter.flutter-gradle-plugin",
        "com.google.gms.google-services",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_firebase_bom() -> String {
    "33.2.0".to_string()
}

fn default_firebase_libraries() -> Vec<String> {
    vec!["firebase-analytics".to_string()]
}

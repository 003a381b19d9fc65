//! Android build descriptor checks
//!
//! Sanity checks over the `[android]` section, which mirrors the app module's
//! Gradle configuration (SDK levels, identifiers, Java level, dependencies).

use codsquad_core::config::AndroidBuildConfig;
use serde::Serialize;
use std::fmt;

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The build would be rejected or misbehave
    Error,
    /// Allowed, but worth a look
    Warning,
}

/// Single finding about the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// How serious the finding is
    pub severity: Severity,
    /// Descriptor field the finding is about
    pub field: &'static str,
    /// Human-readable explanation
    pub message: String,
}

impl Issue {
    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, field, message: message.into() }
    }

    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, field, message: message.into() }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the descriptor, returning every issue found
pub fn validate(build: &AndroidBuildConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    if build.min_sdk > build.target_sdk {
        issues.push(Issue::error(
            "min_sdk",
            format!("minSdk {} is above targetSdk {}", build.min_sdk, build.target_sdk),
        ));
    }
    if build.target_sdk > build.compile_sdk {
        issues.push(Issue::error(
            "target_sdk",
            format!(
                "targetSdk {} is above compileSdk {}",
                build.target_sdk, build.compile_sdk
            ),
        ));
    }

    if !is_package_name(&build.namespace) {
        issues.push(Issue::error(
            "namespace",
            format!("{:?} is not a valid package name", build.namespace),
        ));
    }
    if !is_package_name(&build.application_id) {
        issues.push(Issue::error(
            "application_id",
            format!("{:?} is not a valid application id", build.application_id),
        ));
    }

    if build.version_code == 0 {
        issues.push(Issue::error("version_code", "versionCode must be at least 1"));
    }
    if build.version_name.trim().is_empty() {
        issues.push(Issue::error("version_name", "versionName is empty"));
    }

    if build.java_version < 8 {
        issues.push(Issue::error(
            "java_version",
            format!("Java {} is below the Android Gradle plugin minimum of 8", build.java_version),
        ));
    }

    if build.release_signing == "debug" {
        issues.push(Issue::warning(
            "release_signing",
            "release builds are signed with the debug key",
        ));
    }
    if build.application_id.starts_with("com.example.") {
        issues.push(Issue::warning(
            "application_id",
            "com.example is reserved and rejected by the Play Store",
        ));
    }

    issues
}

/// Whether any issue is an error
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Dependency coordinates declared by the descriptor, in Gradle notation
pub fn dependencies(build: &AndroidBuildConfig) -> Vec<String> {
    let mut deps = vec![format!(
        "implementation(platform(\"com.google.firebase:firebase-bom:{}\"))",
        build.firebase_bom
    )];
    deps.extend(
        build
            .firebase_libraries
            .iter()
            .map(|lib| format!("implementation(\"com.google.firebase:{}\")", lib)),
    );
    if build.core_library_desugaring {
        deps.push(format!(
            "coreLibraryDesugaring(\"com.android.tools:desugar_jdk_libs:{}\")",
            build.desugar_jdk_libs
        ));
    }
    deps
}

/// Dotted Java package name with at least two segments
fn is_package_name(name: &str) -> bool {
    let segments: Vec<&str> = name.split('.').collect();
    segments.len() >= 2
        && segments.iter().all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor_has_only_warnings() {
        let issues = validate(&AndroidBuildConfig::default());
        assert!(!has_errors(&issues));
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["release_signing", "application_id"]);
    }

    #[test]
    fn test_sdk_ordering() {
        let build = AndroidBuildConfig {
            min_sdk: 35,
            target_sdk: 36,
            compile_sdk: 34,
            ..AndroidBuildConfig::default()
        };
        let issues = validate(&build);
        assert!(has_errors(&issues));
        assert!(issues.iter().any(|i| i.field == "target_sdk"));
        assert!(!issues.iter().any(|i| i.field == "min_sdk"));
    }

    #[test]
    fn test_package_names() {
        assert!(is_package_name("com.example.cod_squad_app"));
        assert!(is_package_name("club.cod_squad"));
        assert!(!is_package_name("codsquad"));
        assert!(!is_package_name("com..app"));
        assert!(!is_package_name("com.1app"));
        assert!(!is_package_name("com.cod-squad"));
    }

    #[test]
    fn test_version_and_java_checks() {
        let build = AndroidBuildConfig {
            version_code: 0,
            version_name: " ".to_string(),
            java_version: 7,
            release_signing: "release".to_string(),
            application_id: "club.codsquad.app".to_string(),
            ..AndroidBuildConfig::default()
        };
        let issues = validate(&build);
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["version_code", "version_name", "java_version"]);
    }

    #[test]
    fn test_dependencies() {
        let deps = dependencies(&AndroidBuildConfig::default());
        assert_eq!(
            deps,
            vec![
                "implementation(platform(\"com.google.firebase:firebase-bom:33.2.0\"))".to_string(),
                "implementation(\"com.google.firebase:firebase-analytics\")".to_string(),
                "coreLibraryDesugaring(\"com.android.tools:desugar_jdk_libs:2.0.4\")".to_string(),
            ]
        );
    }
}

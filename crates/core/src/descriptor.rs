//! Formula descriptor model and TOML authoring format.
//!
//! A descriptor is authored once per release version and consumed
//! read-only at install time; publishing a new version supersedes the
//! old file rather than mutating it, so nothing here exposes mutation.
//!
//! ```toml
//! name = "stock-calc"
//! description = "Stock return calculator"
//! homepage = "https://example.com/stock-calc"
//! version = "1.0.0"
//!
//! [artifacts.macos]
//! url = "https://example.com/stock-calc-x86_64-apple-darwin"
//! sha256 = "..."
//! ```

use crate::platform::Os;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The (download URL, integrity hash) pair for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformArtifact {
    /// Download URL for the prebuilt binary.
    pub url: String,
    /// Expected SHA-256 digest of the download, lowercase hex.
    pub sha256: String,
}

/// Where the downloaded artifact is placed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstallSpec {
    /// File name inside the bin directory. Defaults to the formula name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_name: Option<String>,
}

/// The post-install self-test invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Arguments passed to the installed binary; exit code 0 is success.
    #[serde(default = "default_test_args")]
    pub args: Vec<String>,
}

impl Default for TestSpec {
    fn default() -> Self {
        Self {
            args: default_test_args(),
        }
    }
}

fn default_test_args() -> Vec<String> {
    vec!["--version".to_string()]
}

/// A package descriptor (formula) for one prebuilt CLI tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Tool identifier (e.g., "stock-calc").
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// Project homepage URL.
    pub homepage: String,
    /// Semantic version of the release this formula describes.
    pub version: String,
    /// Artifact per platform key (`macos`, `linux`).
    pub artifacts: BTreeMap<String, PlatformArtifact>,
    /// Install action.
    #[serde(default)]
    pub install: InstallSpec,
    /// Post-install self-test.
    #[serde(default)]
    pub test: TestSpec,
}

impl PackageDescriptor {
    /// Parse a descriptor from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the input is not a valid descriptor.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::parse(e.to_string(), None))
    }

    /// Load and parse a descriptor from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read and
    /// [`Error::Parse`] if its contents are not a valid descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| Error::read(e.to_string(), Some(path.to_path_buf()), e))?;
        toml::from_str(&input).map_err(|e| Error::parse(e.to_string(), Some(path.to_path_buf())))
    }

    /// Resolve the artifact entry for a platform, if declared.
    ///
    /// Lookup goes through [`Os::parse`] so alias keys (`darwin`) match
    /// their canonical platform.
    #[must_use]
    pub fn artifact(&self, os: Os) -> Option<&PlatformArtifact> {
        self.artifacts
            .iter()
            .find(|(key, _)| Os::parse(key) == Some(os))
            .map(|(_, artifact)| artifact)
    }

    /// File name installed into the bin directory.
    #[must_use]
    pub fn bin_name(&self) -> &str {
        self.install.bin_name.as_deref().unwrap_or(&self.name)
    }

    /// Arguments for the post-install self-test.
    #[must_use]
    pub fn test_args(&self) -> &[String] {
        &self.test.args
    }

    /// Validate the descriptor against the authoring rules.
    ///
    /// Checks, in order: non-empty name, semver version, at least one
    /// artifact, known and non-duplicate platform keys, http(s) URLs,
    /// and real SHA-256 digests. Placeholder digests get their own diagnostic so a
    /// half-finished formula fails loudly instead of at download time.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation(
                "formula name is empty",
                "Set the name field to the tool's binary name",
            ));
        }

        semver::Version::parse(&self.version)
            .map_err(|_| Error::invalid_version(self.version.clone()))?;

        if self.artifacts.is_empty() {
            return Err(Error::validation(
                format!("formula '{}' declares no artifacts", self.name),
                "Add at least one [artifacts.macos] or [artifacts.linux] table",
            ));
        }

        let mut seen: Vec<Os> = Vec::new();
        for (key, artifact) in &self.artifacts {
            let Some(os) = Os::parse(key) else {
                return Err(Error::validation(
                    format!("unknown platform key '{key}'"),
                    "Supported platform keys are 'macos' and 'linux'",
                ));
            };

            // Alias keys (`darwin`) must not duplicate a canonical entry,
            // or artifact resolution would silently pick one of the two.
            if seen.contains(&os) {
                return Err(Error::validation(
                    format!("duplicate artifact entry for platform '{os}' (key '{key}')"),
                    "Declare each platform once, using the 'macos' or 'linux' key",
                ));
            }
            seen.push(os);

            if !artifact.url.starts_with("https://") && !artifact.url.starts_with("http://") {
                return Err(Error::validation(
                    format!("artifact URL for '{key}' is not http(s): {}", artifact.url),
                    "Artifact URLs must be absolute http(s) download links",
                ));
            }

            check_sha256(key, &artifact.sha256)?;
        }

        Ok(())
    }
}

/// Check that a declared digest is 64 lowercase hex characters.
///
/// A value containing non-hex characters is reported as a placeholder
/// (the upstream formula ships literal "your-sha256-hash-here" text); a
/// hex value of the wrong length or case as a plain checksum error.
fn check_sha256(platform: &str, value: &str) -> Result<()> {
    let is_hex = |c: char| c.is_ascii_digit() || ('a'..='f').contains(&c);

    if value.chars().any(|c| !c.is_ascii_hexdigit()) {
        return Err(Error::placeholder_checksum(platform, value));
    }
    if value.len() != 64 || !value.chars().all(is_hex) {
        return Err(Error::checksum(platform, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_SHA: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn sample_toml() -> String {
        format!(
            r#"
name = "stock-calc"
description = "Stock return calculator command-line tool"
homepage = "https://github.com/GitHubJiKe/stock-calc"
version = "1.0.0"

[artifacts.macos]
url = "https://example.com/releases/stock-calc-x86_64-apple-darwin"
sha256 = "{GOOD_SHA}"

[artifacts.linux]
url = "https://example.com/releases/stock-calc-x86_64-unknown-linux-gnu"
sha256 = "{GOOD_SHA}"
"#
        )
    }

    fn sample() -> PackageDescriptor {
        PackageDescriptor::from_toml_str(&sample_toml()).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let d = sample();
        assert_eq!(d.name, "stock-calc");
        assert_eq!(d.version, "1.0.0");
        assert_eq!(d.artifacts.len(), 2);
        d.validate().unwrap();
    }

    #[test]
    fn test_defaults() {
        let d = sample();
        assert_eq!(d.bin_name(), "stock-calc");
        assert_eq!(d.test_args(), ["--version"]);
    }

    #[test]
    fn test_explicit_install_and_test_sections() {
        let toml = format!(
            r#"
name = "stock-calc"
description = "desc"
homepage = "https://example.com"
version = "2.1.0"

[artifacts.linux]
url = "https://example.com/bin"
sha256 = "{GOOD_SHA}"

[install]
bin-name = "scalc"

[test]
args = ["version", "--short"]
"#
        );
        let d = PackageDescriptor::from_toml_str(&toml).unwrap();
        assert_eq!(d.bin_name(), "scalc");
        assert_eq!(d.test_args(), ["version", "--short"]);
        d.validate().unwrap();
    }

    #[test]
    fn test_artifact_resolution_per_platform() {
        let d = sample();
        let macos = d.artifact(Os::MacOs).unwrap();
        assert!(macos.url.contains("apple-darwin"));
        let linux = d.artifact(Os::Linux).unwrap();
        assert!(linux.url.contains("linux-gnu"));
    }

    #[test]
    fn test_artifact_resolution_darwin_alias_key() {
        let toml = format!(
            r#"
name = "stock-calc"
description = "desc"
homepage = "https://example.com"
version = "1.0.0"

[artifacts.darwin]
url = "https://example.com/bin"
sha256 = "{GOOD_SHA}"
"#
        );
        let d = PackageDescriptor::from_toml_str(&toml).unwrap();
        d.validate().unwrap();
        assert!(d.artifact(Os::MacOs).is_some());
        assert!(d.artifact(Os::Linux).is_none());
    }

    #[test]
    fn test_artifact_resolution_missing_platform() {
        let mut d = sample();
        d.artifacts.remove("linux");
        assert!(d.artifact(Os::Linux).is_none());
        assert!(d.artifact(Os::MacOs).is_some());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let err = PackageDescriptor::from_toml_str("name = \"x\"").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut d = sample();
        d.name = "  ".to_string();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_version() {
        let mut d = sample();
        d.version = "one-point-oh".to_string();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_artifacts() {
        let mut d = sample();
        d.artifacts.clear();
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("no artifacts"));
    }

    #[test]
    fn test_validate_rejects_unknown_platform_key() {
        let mut d = sample();
        let artifact = d.artifacts["macos"].clone();
        d.artifacts.insert("windows".to_string(), artifact);
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("windows"));
    }

    #[test]
    fn test_validate_rejects_duplicate_platform_via_alias() {
        let mut d = sample();
        let artifact = d.artifacts["macos"].clone();
        d.artifacts.insert("darwin".to_string(), artifact);
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate artifact entry"));
        assert!(err.to_string().contains("macos"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut d = sample();
        d.artifacts.get_mut("macos").unwrap().url = "ftp://example.com/bin".to_string();
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("not http(s)"));
    }

    #[test]
    fn test_validate_rejects_placeholder_sha() {
        let mut d = sample();
        d.artifacts.get_mut("linux").unwrap().sha256 = "your-sha256-hash-here".to_string();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, Error::PlaceholderChecksum { .. }));
        assert!(err.to_string().contains("linux"));
    }

    #[test]
    fn test_validate_rejects_short_hex_sha() {
        let mut d = sample();
        d.artifacts.get_mut("macos").unwrap().sha256 = "abc123".to_string();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, Error::Checksum { .. }));
    }

    #[test]
    fn test_validate_rejects_uppercase_sha() {
        let mut d = sample();
        d.artifacts.get_mut("macos").unwrap().sha256 = GOOD_SHA.to_uppercase();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, Error::Checksum { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock-calc.toml");
        std::fs::write(&path, sample_toml()).unwrap();
        let d = PackageDescriptor::load(&path).unwrap();
        assert_eq!(d.name, "stock-calc");
    }

    #[test]
    fn test_load_missing_file() {
        let err = PackageDescriptor::load(Path::new("/nonexistent/formula.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_descriptor_serializes_to_json() {
        let d = sample();
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"name\":\"stock-calc\""));
        assert!(json.contains("\"macos\""));
    }
}

//! `formulary install` executor.

use crate::cli::CliError;
use formulary_core::{Os, PackageDescriptor};
use formulary_installer::{InstallOptions, Installer};
use std::path::PathBuf;

/// Arguments for the install executor, mirroring the CLI flags.
#[derive(Debug, Default)]
pub struct InstallArgs {
    /// Path to the formula TOML file.
    pub formula: PathBuf,
    /// Override for the install directory.
    pub bin_dir: Option<PathBuf>,
    /// Override for the target platform.
    pub platform: Option<String>,
    /// Skip the post-install self-test.
    pub skip_test: bool,
    /// Overwrite an existing installed binary.
    pub force: bool,
}

/// Run the install pipeline for a formula file.
///
/// # Errors
///
/// Returns a configuration error for an unreadable or invalid formula,
/// an unknown `--platform` value or an unsupported platform, and an
/// install error for download, integrity, filesystem or self-test
/// failures.
pub async fn execute_install(args: InstallArgs) -> Result<String, CliError> {
    let descriptor = PackageDescriptor::load(&args.formula)?;

    let os = match &args.platform {
        Some(value) => Os::parse(value).ok_or_else(|| {
            CliError::config_with_help(
                format!("unknown platform '{value}'"),
                "Supported platforms are 'macos' and 'linux'",
            )
        })?,
        None => Os::current(),
    };

    let mut options = InstallOptions::new()
        .with_force(args.force)
        .with_skip_test(args.skip_test);
    if let Some(bin_dir) = args.bin_dir {
        options = options.with_bin_dir(bin_dir);
    }

    let installed = Installer::new().install(&descriptor, os, &options).await?;

    Ok(format!(
        "Installed {} {} to {} (sha256 {})",
        installed.name,
        installed.version,
        installed.binary_path.display(),
        installed.sha256
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulary_installer::digest;

    const SCRIPT: &[u8] = b"#!/bin/sh\necho 1.0.0\n";

    fn write_formula(dir: &std::path::Path, sha256: &str) -> PathBuf {
        let path = dir.join("stock-calc.toml");
        let toml = format!(
            r#"
name = "stock-calc"
description = "Stock return calculator command-line tool"
homepage = "https://example.com/stock-calc"
version = "1.0.0"

[artifacts.linux]
url = "https://example.com/releases/stock-calc"
sha256 = "{sha256}"
"#
        );
        std::fs::write(&path, toml).unwrap();
        path
    }

    #[tokio::test]
    async fn test_unknown_platform_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let formula = write_formula(dir.path(), &digest::sha256_hex(SCRIPT));
        let args = InstallArgs {
            formula,
            platform: Some("plan9".to_string()),
            ..InstallArgs::default()
        };
        let err = execute_install(args).await.unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(err.to_string().contains("plan9"));
    }

    #[tokio::test]
    async fn test_missing_formula_is_config_error() {
        let args = InstallArgs {
            formula: PathBuf::from("/nonexistent/formula.toml"),
            ..InstallArgs::default()
        };
        let err = execute_install(args).await.unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[tokio::test]
    async fn test_placeholder_checksum_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let formula = write_formula(dir.path(), "your-sha256-hash-here");
        let args = InstallArgs {
            formula,
            platform: Some("linux".to_string()),
            bin_dir: Some(dir.path().join("bin")),
            ..InstallArgs::default()
        };
        let err = execute_install(args).await.unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}

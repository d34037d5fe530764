//! `formulary validate` executor.

use crate::cli::CliError;
use formulary_core::PackageDescriptor;
use std::path::Path;

/// Check a formula against the authoring rules without installing.
///
/// # Errors
///
/// Returns a configuration error naming the first violated rule; a
/// placeholder sha256 fails here rather than at download time.
pub fn execute_validate(formula: &Path) -> Result<String, CliError> {
    let descriptor = PackageDescriptor::load(formula)?;
    descriptor.validate()?;

    let platforms: Vec<&str> = descriptor.artifacts.keys().map(String::as_str).collect();
    Ok(format!(
        "{} {} is valid ({})",
        descriptor.name,
        descriptor.version,
        platforms.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_SHA: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn write_formula(dir: &std::path::Path, sha256: &str) -> std::path::PathBuf {
        let path = dir.join("stock-calc.toml");
        let toml = format!(
            r#"
name = "stock-calc"
description = "Stock return calculator command-line tool"
homepage = "https://example.com/stock-calc"
version = "1.0.0"

[artifacts.macos]
url = "https://example.com/releases/stock-calc-darwin"
sha256 = "{sha256}"

[artifacts.linux]
url = "https://example.com/releases/stock-calc-linux"
sha256 = "{sha256}"
"#
        );
        std::fs::write(&path, toml).unwrap();
        path
    }

    #[test]
    fn test_validate_good_formula() {
        let dir = tempfile::tempdir().unwrap();
        let out = execute_validate(&write_formula(dir.path(), GOOD_SHA)).unwrap();
        assert_eq!(out, "stock-calc 1.0.0 is valid (linux, macos)");
    }

    #[test]
    fn test_validate_placeholder_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            execute_validate(&write_formula(dir.path(), "your-sha256-hash-here")).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(err.to_string().contains("Placeholder"));
    }

    #[test]
    fn test_validate_unparsable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "not valid toml [").unwrap();
        let err = execute_validate(&path).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}

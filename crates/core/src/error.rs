//! Error types for formula parsing and validation.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for descriptor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or validating a formula.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Failed to read a formula file from disk.
    #[error("Failed to read formula: {message}")]
    #[diagnostic(
        code(formulary::core::read),
        help("Check that the formula file exists and is readable")
    )]
    Read {
        /// The error message
        message: String,
        /// The path that caused the error
        path: Option<PathBuf>,
        /// The underlying source error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to parse a formula file.
    #[error("Invalid formula format: {message}")]
    #[diagnostic(
        code(formulary::core::parse),
        help("Ensure the formula is valid TOML with name, version and [artifacts.*] tables")
    )]
    Parse {
        /// The error message
        message: String,
        /// The path to the invalid file
        path: Option<PathBuf>,
    },

    /// A formula field violates a validation rule.
    #[error("Invalid formula: {message}")]
    #[diagnostic(code(formulary::core::validation), help("{help}"))]
    Validation {
        /// The error message
        message: String,
        /// Help text for the user
        help: String,
    },

    /// The version string is not semantic-versioning compliant.
    #[error("Invalid version: {version}")]
    #[diagnostic(
        code(formulary::core::invalid_version),
        help("Version must follow semantic versioning (e.g., 1.0.0)")
    )]
    InvalidVersion {
        /// The invalid version string
        version: String,
    },

    /// A declared checksum is not a SHA-256 digest.
    #[error("Invalid sha256 for platform '{platform}': {value:?}")]
    #[diagnostic(
        code(formulary::core::checksum),
        help("sha256 must be exactly 64 lowercase hex characters")
    )]
    Checksum {
        /// The platform key carrying the bad digest
        platform: String,
        /// The offending value
        value: String,
    },

    /// A declared checksum is an unresolved placeholder.
    ///
    /// Accepting a placeholder would either skip verification or fail
    /// every install, so it is rejected up front.
    #[error("Placeholder sha256 for platform '{platform}': {value:?}")]
    #[diagnostic(
        code(formulary::core::placeholder_checksum),
        help("Replace the placeholder with the real SHA-256 digest of the release artifact")
    )]
    PlaceholderChecksum {
        /// The platform key carrying the placeholder
        platform: String,
        /// The placeholder value found
        value: String,
    },
}

impl Error {
    /// Create a new read error with source.
    #[must_use]
    pub fn read(message: impl Into<String>, path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    /// Create a new parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Parse {
            message: message.into(),
            path,
        }
    }

    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: help.into(),
        }
    }

    /// Create a new invalid version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a new checksum error.
    #[must_use]
    pub fn checksum(platform: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Checksum {
            platform: platform.into(),
            value: value.into(),
        }
    }

    /// Create a new placeholder checksum error.
    #[must_use]
    pub fn placeholder_checksum(platform: impl Into<String>, value: impl Into<String>) -> Self {
        Self::PlaceholderChecksum {
            platform: platform.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::read(
            "no such file",
            Some(PathBuf::from("formulae/missing.toml")),
            io_err,
        );
        assert!(err.to_string().contains("Failed to read formula"));
    }

    #[test]
    fn test_parse_error() {
        let err = Error::parse("missing field `name`", None);
        assert!(err.to_string().contains("Invalid formula format"));
    }

    #[test]
    fn test_validation_error() {
        let err = Error::validation("empty name", "set the name field");
        assert!(err.to_string().contains("empty name"));
    }

    #[test]
    fn test_invalid_version_error() {
        let err = Error::invalid_version("not-a-version");
        assert!(err.to_string().contains("not-a-version"));
    }

    #[test]
    fn test_checksum_error() {
        let err = Error::checksum("macos", "abc123");
        assert!(err.to_string().contains("macos"));
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_placeholder_checksum_error() {
        let err = Error::placeholder_checksum("linux", "your-sha256-hash-here");
        assert!(err.to_string().contains("Placeholder sha256"));
        assert!(err.to_string().contains("your-sha256-hash-here"));
    }

    #[test]
    fn test_error_debug() {
        let err = Error::invalid_version("1.x");
        let debug = format!("{err:?}");
        assert!(debug.contains("InvalidVersion"));
    }
}

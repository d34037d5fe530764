//! Error types for the install pipeline.
//!
//! The three named failures (unsupported platform, integrity mismatch,
//! failed self-test) are terminal and non-retryable; installation is a
//! one-shot user-initiated action and every failure is surfaced verbatim.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for install pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while installing a formula.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The formula declares no artifact for the requested platform.
    #[error("Platform '{platform}' is not supported by formula '{package}'")]
    #[diagnostic(
        code(formulary::install::unsupported_platform),
        help("Declare an [artifacts.{platform}] entry or install on a supported platform")
    )]
    UnsupportedPlatform {
        /// The formula name.
        package: String,
        /// The requested platform.
        platform: String,
    },

    /// Downloading the artifact failed.
    #[error("Failed to download {url}: {message}")]
    #[diagnostic(
        code(formulary::install::download),
        help("Check the URL and your network connectivity")
    )]
    Download {
        /// The artifact URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The downloaded bytes do not match the declared digest.
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    #[diagnostic(
        code(formulary::install::integrity),
        help("The downloaded artifact does not match the formula's sha256; nothing was installed")
    )]
    IntegrityMismatch {
        /// The digest declared in the formula.
        expected: String,
        /// The digest computed from the download.
        actual: String,
    },

    /// The installed binary failed its post-install check.
    #[error("Installed binary failed its self-test ({command}): {message}")]
    #[diagnostic(
        code(formulary::install::self_test),
        help("Run the command manually to inspect the failure")
    )]
    SelfTestFailed {
        /// The command that was invoked.
        command: String,
        /// What went wrong (spawn error or exit status with stderr).
        message: String,
    },

    /// The target path already holds a file and --force was not given.
    #[error("Refusing to overwrite existing binary at {}", path.display())]
    #[diagnostic(
        code(formulary::install::already_installed),
        help("Pass --force to replace the existing binary")
    )]
    AlreadyInstalled {
        /// The occupied install path.
        path: PathBuf,
    },

    /// The formula itself is invalid.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Formula(#[from] formulary_core::Error),

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(formulary::install::io))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported platform error.
    #[must_use]
    pub fn unsupported_platform(package: impl Into<String>, platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            package: package.into(),
            platform: platform.into(),
        }
    }

    /// Create a download error.
    #[must_use]
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an integrity mismatch error.
    #[must_use]
    pub fn integrity_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::IntegrityMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a self-test failure error.
    #[must_use]
    pub fn self_test(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SelfTestFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_error() {
        let err = Error::unsupported_platform("stock-calc", "windows");
        assert!(err.to_string().contains("stock-calc"));
        assert!(err.to_string().contains("windows"));
    }

    #[test]
    fn test_download_error() {
        let err = Error::download("https://example.com/bin", "HTTP 404");
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_integrity_mismatch_error() {
        let err = Error::integrity_mismatch("aaaa", "bbbb");
        assert!(err.to_string().contains("expected aaaa"));
        assert!(err.to_string().contains("got bbbb"));
    }

    #[test]
    fn test_self_test_error() {
        let err = Error::self_test("stock-calc --version", "exit status 1");
        assert!(err.to_string().contains("self-test"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_from_formula_error() {
        let core_err = formulary_core::Error::invalid_version("x");
        let err: Error = core_err.into();
        assert!(err.to_string().contains("Invalid version"));
    }
}

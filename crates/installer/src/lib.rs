//! Install pipeline for formulary.
//!
//! The pipeline is linear and one-shot, terminating in success or one of
//! the named failures:
//!
//! resolve -> fetch -> verify -> install -> self-test
//!
//! Resolution happens before any network or filesystem action, and a
//! checksum mismatch aborts before anything is written to the target
//! path. There is no local state, no retry and no recovery; failures are
//! surfaced directly to the invoking user.

pub mod digest;
mod error;
mod fetch;
pub mod install;
mod selftest;

pub use error::{Error, Result};
pub use fetch::Fetcher;
pub use install::{InstallOptions, default_bin_dir};

use formulary_core::{Os, PackageDescriptor, PlatformArtifact};
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of a completed install.
#[derive(Debug)]
pub struct InstalledPackage {
    /// Tool name.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Path to the installed binary.
    pub binary_path: PathBuf,
    /// Verified SHA-256 digest of the binary.
    pub sha256: String,
}

/// Executes the install pipeline for a formula.
pub struct Installer {
    fetcher: Fetcher,
}

impl Default for Installer {
    fn default() -> Self {
        Self::new()
    }
}

impl Installer {
    /// Create a new installer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fetcher: Fetcher::new(),
        }
    }

    /// Resolve the artifact entry for `os`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] if the formula declares no
    /// artifact for the platform. No network or filesystem action is
    /// taken on that path.
    pub fn resolve<'a>(
        &self,
        descriptor: &'a PackageDescriptor,
        os: Os,
    ) -> Result<&'a PlatformArtifact> {
        descriptor
            .artifact(os)
            .ok_or_else(|| Error::unsupported_platform(&descriptor.name, os.to_string()))
    }

    /// Check downloaded bytes against the declared digest.
    ///
    /// Returns the computed digest on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IntegrityMismatch`] carrying both digests.
    pub fn verify(bytes: &[u8], expected: &str) -> Result<String> {
        let actual = digest::sha256_hex(bytes);
        if actual != expected {
            return Err(Error::integrity_mismatch(expected, actual));
        }
        Ok(actual)
    }

    /// Run the full pipeline: validate, resolve, fetch, verify, install,
    /// self-test.
    ///
    /// # Errors
    ///
    /// Returns the first pipeline failure; see [`Error`] for the
    /// taxonomy. A placeholder checksum fails validation before any
    /// download starts.
    pub async fn install(
        &self,
        descriptor: &PackageDescriptor,
        os: Os,
        options: &InstallOptions,
    ) -> Result<InstalledPackage> {
        descriptor.validate()?;
        let artifact = self.resolve(descriptor, os)?;

        let target = options.bin_dir().join(descriptor.bin_name());
        if target.exists() && !options.force {
            return Err(Error::AlreadyInstalled { path: target });
        }

        info!(
            package = %descriptor.name,
            version = %descriptor.version,
            %os,
            url = %artifact.url,
            "Installing formula"
        );

        let bytes = self.fetcher.fetch_bytes(&artifact.url).await?;
        self.finish(descriptor, os, &bytes, options).await
    }

    /// Verify already-downloaded bytes and complete the install.
    ///
    /// Split out from [`Installer::install`] so the verify/install/test
    /// stages can run against bytes from any source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IntegrityMismatch`] without writing anything if
    /// the digest does not match, and [`Error::SelfTestFailed`] if the
    /// installed binary's test invocation does not exit 0. A binary that
    /// fails its self-test is removed from the bin directory again.
    pub async fn finish(
        &self,
        descriptor: &PackageDescriptor,
        os: Os,
        bytes: &[u8],
        options: &InstallOptions,
    ) -> Result<InstalledPackage> {
        let artifact = self.resolve(descriptor, os)?;
        let sha256 = Self::verify(bytes, &artifact.sha256)?;

        let binary_path = install::write_executable(bytes, &options.bin_dir(), descriptor.bin_name())?;

        if options.skip_test {
            info!(path = ?binary_path, "Skipping post-install self-test");
        } else if let Err(err) = selftest::run_self_test(&binary_path, descriptor.test_args()).await
        {
            // Don't leave a binary on the PATH that can't even report
            // its version.
            if let Err(remove_err) = std::fs::remove_file(&binary_path) {
                warn!(path = ?binary_path, error = %remove_err, "Failed to remove binary after self-test failure");
            }
            return Err(err);
        }

        info!(
            package = %descriptor.name,
            version = %descriptor.version,
            path = ?binary_path,
            %sha256,
            "Installed formula"
        );

        Ok(InstalledPackage {
            name: descriptor.name.clone(),
            version: descriptor.version.clone(),
            binary_path,
            sha256,
        })
    }
}

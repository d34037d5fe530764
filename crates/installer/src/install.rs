//! Placing verified bytes into the bin directory.

use crate::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for an install run.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Custom bin directory. Defaults to the user's executable dir.
    pub bin_dir: Option<PathBuf>,
    /// Overwrite an existing installed binary.
    pub force: bool,
    /// Skip the post-install self-test.
    pub skip_test: bool,
}

impl InstallOptions {
    /// Create new options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bin directory.
    #[must_use]
    pub fn with_bin_dir(mut self, path: PathBuf) -> Self {
        self.bin_dir = Some(path);
        self
    }

    /// Set overwrite behavior.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set whether the self-test is skipped.
    #[must_use]
    pub fn with_skip_test(mut self, skip: bool) -> Self {
        self.skip_test = skip;
        self
    }

    /// Get the bin directory, defaulting to [`default_bin_dir`].
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.bin_dir.clone().unwrap_or_else(default_bin_dir)
    }
}

/// Get the default executable search directory for installs.
///
/// `~/.local/bin` on platforms without an XDG executable dir.
#[must_use]
pub fn default_bin_dir() -> PathBuf {
    dirs::executable_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("bin")))
        .unwrap_or_else(|| PathBuf::from(".local/bin"))
}

/// Write verified bytes to `<bin_dir>/<bin_name>` and mark executable.
///
/// The bytes go to a temp file in the same directory first, then move
/// into place with a rename, so a failure partway through never leaves a
/// truncated binary at the target path.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or the file
/// cannot be written, chmodded or renamed.
pub fn write_executable(bytes: &[u8], bin_dir: &Path, bin_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(bin_dir)?;

    let tmp = tempfile::NamedTempFile::new_in(bin_dir)?;
    std::fs::write(tmp.path(), bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(tmp.path())?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(tmp.path(), perms)?;
    }

    let target = bin_dir.join(bin_name);
    tmp.persist(&target).map_err(|e| e.error)?;

    debug!(path = ?target, "Installed binary");
    Ok(target)
}

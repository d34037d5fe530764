//! Platform identification for artifact resolution.
//!
//! Formulae key their artifacts by operating system only. The upstream
//! release naming carries the architecture inside the download URL, so
//! there is no separate architecture axis to model.

use serde::{Deserialize, Serialize};

/// Operating system a formula artifact targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// macOS (canonical key `macos`, alias `darwin`).
    #[serde(alias = "darwin")]
    MacOs,
    /// Linux.
    Linux,
}

impl Os {
    /// Get the OS of the running host.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        return Self::MacOs;
        #[cfg(target_os = "linux")]
        return Self::Linux;
        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        compile_error!("Unsupported OS");
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "macos" | "darwin" | "osx" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

//! Core types for formulary.
//!
//! A formula (package descriptor) declares, for one named CLI tool,
//! per-platform download URLs, SHA-256 integrity hashes, an install
//! target and a post-install self-test. This crate owns the descriptor
//! data model, its TOML authoring format and its validation rules; the
//! pipeline that consumes descriptors lives in `formulary-installer`.

pub mod descriptor;
mod error;
pub mod platform;

pub use descriptor::{PackageDescriptor, PlatformArtifact};
pub use error::{Error, Result};
pub use platform::Os;

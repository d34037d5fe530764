//! `formulary show` executor.

use crate::cli::CliError;
use formulary_core::PackageDescriptor;
use std::fmt::Write as _;
use std::path::Path;

/// Parse a formula and render it for display.
///
/// With `json` set the descriptor is rendered as pretty-printed JSON;
/// otherwise as a short human-readable summary.
///
/// # Errors
///
/// Returns a configuration error if the formula cannot be read or
/// parsed.
pub fn execute_show(formula: &Path, json: bool) -> Result<String, CliError> {
    let descriptor = PackageDescriptor::load(formula)?;

    if json {
        return serde_json::to_string_pretty(&descriptor)
            .map_err(|e| CliError::other(format!("failed to serialize formula: {e}")));
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", descriptor.name, descriptor.version);
    let _ = writeln!(out, "  {}", descriptor.description);
    let _ = writeln!(out, "  homepage: {}", descriptor.homepage);
    let _ = writeln!(out, "  bin: {}", descriptor.bin_name());
    for (platform, artifact) in &descriptor.artifacts {
        let _ = writeln!(out, "  {platform}: {}", artifact.url);
        let _ = writeln!(out, "    sha256: {}", artifact.sha256);
    }
    // Drop the trailing newline; the caller prints with println.
    out.truncate(out.trim_end().len());
    Ok(out)
}

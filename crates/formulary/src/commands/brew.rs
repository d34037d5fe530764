//! `formulary brew` executor.

use crate::cli::CliError;
use formulary_core::PackageDescriptor;
use formulary_homebrew::FormulaGenerator;
use std::path::Path;

/// Render a formula as Ruby for a Homebrew tap.
///
/// # Errors
///
/// Returns a configuration error if the formula cannot be read, parsed
/// or validated.
pub fn execute_brew(formula: &Path) -> Result<String, CliError> {
    let descriptor = PackageDescriptor::load(formula)?;
    let ruby = FormulaGenerator::render(&descriptor)?;
    Ok(ruby)
}

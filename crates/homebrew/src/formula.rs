//! Ruby formula generation from a package descriptor.

use formulary_core::{Os, PackageDescriptor, Result};
use std::fmt::Write as _;

/// Ruby formula class name for a tool name.
///
/// Homebrew derives the class from the formula file name by splitting on
/// `-` and `_` and capitalizing each segment: `stock-calc` -> `StockCalc`.
#[must_use]
pub fn class_name(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Escape a value for embedding in a double-quoted Ruby string.
///
/// Backslashes and quotes are escaped, and `#{` is neutralized so
/// descriptor text can never inject Ruby interpolation.
fn ruby_str(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("#{", "\\#{")
}

/// Homebrew formula generator.
pub struct FormulaGenerator;

impl FormulaGenerator {
    /// Render a descriptor as a Ruby Homebrew formula.
    ///
    /// The descriptor is validated first, so a formula with placeholder
    /// checksums can never be rendered back out.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`PackageDescriptor::validate`].
    #[allow(clippy::format_push_string)]
    pub fn render(descriptor: &PackageDescriptor) -> Result<String> {
        descriptor.validate()?;

        let mut formula = format!(
            r#"class {} < Formula
  desc "{}"
  homepage "{}"
  version "{}"
"#,
            class_name(&descriptor.name),
            ruby_str(&descriptor.description),
            ruby_str(&descriptor.homepage),
            ruby_str(&descriptor.version)
        );

        if let Some(artifact) = descriptor.artifact(Os::MacOs) {
            let _ = write!(
                formula,
                r#"
  on_macos do
    url "{}"
    sha256 "{}"
  end
"#,
                ruby_str(&artifact.url),
                ruby_str(&artifact.sha256)
            );
        }

        if let Some(artifact) = descriptor.artifact(Os::Linux) {
            let _ = write!(
                formula,
                r#"
  on_linux do
    url "{}"
    sha256 "{}"
  end
"#,
                ruby_str(&artifact.url),
                ruby_str(&artifact.sha256)
            );
        }

        let bin_name = ruby_str(descriptor.bin_name());
        let _ = write!(
            formula,
            r##"
  def install
    bin.install "{bin_name}"
  end

  test do
    system "#{{bin}}/{bin_name}""##
        );
        for arg in descriptor.test_args() {
            let _ = write!(formula, ", \"{}\"", ruby_str(arg));
        }
        formula.push_str("\n  end\nend\n");

        Ok(formula)
    }
}

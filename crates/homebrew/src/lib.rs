//! Homebrew formula rendering for formulary.
//!
//! The upstream distribution artifact for a formulary package is a Ruby
//! Homebrew formula; this crate renders a validated [`PackageDescriptor`]
//! back into that form so the tap authoring workflow keeps working.
//!
//! # Example
//!
//! ```rust,ignore
//! use formulary_core::PackageDescriptor;
//! use formulary_homebrew::FormulaGenerator;
//!
//! let descriptor = PackageDescriptor::load(path)?;
//! let ruby = FormulaGenerator::render(&descriptor)?;
//! ```

mod formula;

pub use formula::{FormulaGenerator, class_name};

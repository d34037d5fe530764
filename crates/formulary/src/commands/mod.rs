//! Per-subcommand executors.
//!
//! Each executor loads the formula it was pointed at, does its work and
//! returns the text to print on stdout. All user-facing error handling
//! lives in [`crate::cli`]; executors only map library errors into
//! [`CliError`](crate::cli::CliError) via `?`.

mod brew;
mod install;
mod show;
mod validate;

pub use brew::execute_brew;
pub use install::{InstallArgs, execute_install};
pub use show::execute_show;
pub use validate::execute_validate;

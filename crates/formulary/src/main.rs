//! formulary CLI application.
//!
//! A minimal formula-driven installer for prebuilt CLI binaries:
//! download, verify against a pinned SHA-256, place on the PATH and run
//! the formula's version self-test.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

use formulary::cli::{self, CliError, EXIT_OK, OkEnvelope, exit_code_for, render_error};
use formulary::commands::{
    InstallArgs, execute_brew, execute_install, execute_show, execute_validate,
};
use formulary::tracing::{self, Level, TracingConfig, TracingFormat};

/// Main entry point - determines sync vs async execution path
fn main() {
    // NOTE: Using eprintln! in panic hook is intentional - tracing
    // infrastructure may be corrupted during a panic.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();
    init_tracing_from(&cli);

    let exit_code = if requires_async_runtime(&cli) {
        run_with_tokio(cli)
    } else {
        run_sync(cli)
    };
    std::process::exit(exit_code);
}

/// Determine if a command requires the async runtime
const fn requires_async_runtime(cli: &cli::Cli) -> bool {
    match &cli.command {
        // Install hits the network and the self-test spawns a process
        cli::Commands::Install { .. } => true,
        // Fast path: local file parsing only
        cli::Commands::Show { .. } | cli::Commands::Validate { .. } | cli::Commands::Brew { .. } => {
            false
        }
    }
}

/// Initialize tracing from the parsed CLI flags.
///
/// `--log-format` wins when given; otherwise `--json` implies JSON logs
/// so stderr stays machine-readable alongside the stdout envelopes.
fn init_tracing_from(cli: &cli::Cli) {
    let format = cli.log_format.clone().unwrap_or(if cli.json {
        TracingFormat::Json
    } else {
        TracingFormat::Pretty
    });
    let tracing_config = TracingConfig {
        format,
        level: Level::from(cli.level.clone()),
    };
    // Ignore error if tracing already initialized (e.g., in tests)
    let _ = tracing::init_tracing(tracing_config);
}

/// Create tokio runtime and run the async path
fn run_with_tokio(cli: cli::Cli) -> i32 {
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            return 1;
        }
    };

    let json_mode = cli.json;
    match rt.block_on(execute_async_command(cli)) {
        Ok(output) => {
            emit(&output, json_mode);
            EXIT_OK
        }
        Err(err) => {
            render_error(&err, json_mode);
            exit_code_for(&err)
        }
    }
}

/// Run synchronous commands without a tokio runtime
fn run_sync(cli: cli::Cli) -> i32 {
    let json_mode = cli.json;
    match execute_sync_command(cli) {
        Ok(output) => {
            emit(&output, json_mode);
            EXIT_OK
        }
        Err(err) => {
            render_error(&err, json_mode);
            exit_code_for(&err)
        }
    }
}

async fn execute_async_command(cli: cli::Cli) -> Result<String, CliError> {
    match cli.command {
        cli::Commands::Install {
            formula,
            bin_dir,
            platform,
            skip_test,
            force,
        } => {
            execute_install(InstallArgs {
                formula,
                bin_dir,
                platform,
                skip_test,
                force,
            })
            .await
        }
        _ => Err(CliError::other(
            "Internal error: sync command reached async path",
        )),
    }
}

fn execute_sync_command(cli: cli::Cli) -> Result<String, CliError> {
    match cli.command {
        cli::Commands::Show { formula } => execute_show(&formula, cli.json),
        cli::Commands::Validate { formula } => execute_validate(&formula),
        cli::Commands::Brew { formula } => execute_brew(&formula),
        cli::Commands::Install { .. } => Err(CliError::other(
            "Internal error: async command reached sync path",
        )),
    }
}

/// Print command output, wrapped in an envelope in JSON mode.
///
/// `show --json` already produces a JSON document, so it is embedded
/// as-is rather than re-quoted.
fn emit(output: &str, json_mode: bool) {
    if json_mode {
        let data = serde_json::from_str::<serde_json::Value>(output)
            .unwrap_or_else(|_| serde_json::json!({ "message": output }));
        let envelope = OkEnvelope::new(data);
        match serde_json::to_string(&envelope) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("JSON serialization failed: {e}"),
        }
    } else {
        println!("{output}");
    }
}

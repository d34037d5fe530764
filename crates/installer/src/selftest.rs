//! Post-install verification of the installed binary.

use crate::{Error, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Run the installed binary with the formula's test arguments.
///
/// Exit code 0 is success; a spawn failure or any other exit code is an
/// installation verification failure. No retries.
///
/// # Errors
///
/// Returns [`Error::SelfTestFailed`] carrying the invoked command line
/// and either the spawn error or the exit status with captured stderr.
pub async fn run_self_test(binary: &Path, args: &[String]) -> Result<()> {
    let command_line = format!("{} {}", binary.display(), args.join(" "));
    debug!(command = %command_line, "Running post-install self-test");

    let output = Command::new(binary)
        .args(args)
        .output()
        .await
        .map_err(|e| Error::self_test(&command_line, format!("failed to spawn: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::self_test(
            &command_line,
            format!("{}: {}", output.status, stderr.trim()),
        ));
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[tokio::test]
    async fn test_self_test_passes_on_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        let bin = write_script(dir.path(), "ok", "echo 1.0.0");
        run_self_test(&bin, &["--version".to_string()]).await.unwrap();
    }

    #[tokio::test]
    async fn test_self_test_fails_on_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let bin = write_script(dir.path(), "bad", "echo broken >&2; exit 3");
        let err = run_self_test(&bin, &["--version".to_string()])
            .await
            .unwrap_err();
        match err {
            Error::SelfTestFailed { command, message } => {
                assert!(command.contains("--version"));
                assert!(message.contains("broken"));
            }
            other => panic!("expected SelfTestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_self_test_fails_on_missing_binary() {
        let err = run_self_test(Path::new("/nonexistent/stock-calc"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SelfTestFailed { .. }));
    }
}

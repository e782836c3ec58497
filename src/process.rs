use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result};

/// Run a shell command and return its trimmed stdout.
pub(crate) fn shell_output(command: &str) -> Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .output()
        .context("spawning shell command")?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "command failed (exit {}): {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        )
    }
}

/// Start `command` through `sh -c` and return immediately.
///
/// Failures are logged, never returned.
pub(crate) fn spawn_shell(command: &str) {
    let result = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match result {
        Ok(child) => reap(child, command.to_owned()),
        Err(e) => tracing::warn!(command, error = %e, "failed to spawn command"),
    }
}

/// Start an executable directly, without a shell.
pub(crate) fn spawn_program(path: &Path) {
    let result = Command::new(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match result {
        Ok(child) => reap(child, path.display().to_string()),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to spawn program"),
    }
}

/// Wait for a detached child on a helper thread so it does not linger as a
/// zombie.
fn reap(mut child: Child, label: String) {
    let spawned = std::thread::Builder::new()
        .name("tilerc-reap".to_owned())
        .spawn(move || match child.wait() {
            Ok(status) => tracing::debug!(command = %label, %status, "spawned process exited"),
            Err(e) => tracing::debug!(command = %label, error = %e, "waiting for spawned process"),
        });
    if let Err(e) = spawned {
        tracing::debug!(error = %e, "could not start reaper thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_output_trims() {
        assert_eq!(shell_output("echo hello").unwrap(), "hello");
    }

    #[test]
    fn shell_output_reports_exit_code() {
        let err = shell_output("exit 3").unwrap_err();
        assert!(err.to_string().contains("exit 3"), "{err}");
    }

    #[test]
    fn spawn_missing_program_does_not_panic() {
        spawn_program(Path::new("/nonexistent/tilerc-autostart.sh"));
    }
}

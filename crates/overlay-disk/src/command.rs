use std::ffi::OsStr;

use tokio::process::Command;
use tracing::trace;

/// Error from a failed external command, carrying its combined output.
#[derive(Debug, thiserror::Error)]
#[error("command failed: {command}\n{output}")]
pub struct CommandError {
    pub command: String,
    pub output: String,
}

/// Format a human-readable display string for a command invocation.
fn format_command_display(program: &str, args: &[&OsStr]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Execute a program, capturing combined stdout/stderr.
///
/// Invokes the binary directly with the given arguments (no shell). Returns
/// the trimmed combined output on success; a non-zero exit or spawn failure
/// yields a [`CommandError`] with whatever output was captured.
pub(crate) async fn exec_combined(program: &str, args: &[&OsStr]) -> Result<String, CommandError> {
    let command = format_command_display(program, args);
    trace!(command = %command, "exec");

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| CommandError {
            command: command.clone(),
            output: e.to_string(),
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let combined = combined.trim().to_string();

    if output.status.success() {
        Ok(combined)
    } else {
        Err(CommandError {
            command,
            output: combined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<&OsStr> {
        args.iter().map(OsStr::new).collect()
    }

    #[test]
    fn format_command_display_joins_program_and_args() {
        let args = os(&["create", "-f", "qcow2", "/tmp/x"]);
        let display = format_command_display("qemu-img", &args);
        assert_eq!(display, "qemu-img create -f qcow2 /tmp/x");
    }

    #[tokio::test]
    async fn exec_returns_trimmed_output() {
        let args = os(&["hello"]);
        let output = exec_combined("echo", &args).await.unwrap();
        assert_eq!(output, "hello");
    }

    #[tokio::test]
    async fn exec_combines_stdout_and_stderr() {
        let args = os(&["-c", "echo out; echo err >&2"]);
        let output = exec_combined("bash", &args).await.unwrap();
        assert!(output.contains("out"), "output was: {output}");
        assert!(output.contains("err"), "output was: {output}");
    }

    #[tokio::test]
    async fn exec_returns_error_on_nonzero_exit() {
        let err = exec_combined("false", &[]).await.unwrap_err();
        assert!(err.command.contains("false"), "command was: {}", err.command);
    }

    #[tokio::test]
    async fn exec_error_captures_output() {
        let args = os(&["-c", "echo oops >&2; exit 1"]);
        let err = exec_combined("bash", &args).await.unwrap_err();
        assert!(err.output.contains("oops"), "output was: {}", err.output);
    }

    #[tokio::test]
    async fn exec_reports_spawn_failure() {
        let err = exec_combined("definitely-no-such-binary", &[])
            .await
            .unwrap_err();
        assert!(err.command.contains("definitely-no-such-binary"));
        assert!(!err.output.is_empty());
    }
}

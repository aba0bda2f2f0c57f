use std::process::Stdio;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::command::CommandResult;

/// Contract for running an arbitrary command line outside the shell's own
/// module system.
///
/// Implementations must never let a spawn or communication fault escape as an
/// error; every outcome collapses into a [`CommandResult`].
#[async_trait]
pub trait ExternalExecutor: Send + Sync {
    /// Run the line and report success or failure.
    async fn run(&self, command_line: &str) -> CommandResult;
}

/// Forwards a command line to the host operating system's native shell.
///
/// The platform command processor is invoked with the whole line as a single
/// argument (`cmd.exe /c` on Windows, `/bin/bash -c` elsewhere on Unix).
/// Standard output and standard error are captured in full, trimmed, and
/// echoed to the corresponding stream of this process; empty captures are
/// omitted. A zero exit code maps to [`CommandResult::Success`], anything
/// else to [`CommandResult::Failed`]. Faults while spawning or communicating
/// with the child are reported on stderr with a `[system error]` tag and also
/// map to `Failed`.
#[derive(Debug, Default)]
pub struct HostShell;

#[async_trait]
impl ExternalExecutor for HostShell {
    async fn run(&self, command_line: &str) -> CommandResult {
        match run_in_host_shell(command_line).await {
            Ok(result) => result,
            Err(error) => {
                eprintln!("[system error] {error}");
                CommandResult::Failed
            }
        }
    }
}

async fn run_in_host_shell(line: &str) -> Result<CommandResult> {
    let mut command = shell_invocation(line)?;
    debug!("spawning host shell for {line:?}");

    // stdin stays attached to the terminal so interactive externals keep
    // working; the child is reaped if the dispatch future is dropped
    let output = command
        .stdin(Stdio::inherit())
        .kill_on_drop(true)
        .output()
        .await?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        println!("{stdout}");
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        eprintln!("{stderr}");
    }

    Ok(if output.status.success() {
        CommandResult::Success
    } else {
        CommandResult::Failed
    })
}

#[cfg(windows)]
fn shell_invocation(line: &str) -> Result<Command> {
    let mut command = Command::new("cmd.exe");
    command.args(["/c", line]);
    Ok(command)
}

#[cfg(unix)]
fn shell_invocation(line: &str) -> Result<Command> {
    let mut command = Command::new("/bin/bash");
    command.args(["-c", line]);
    Ok(command)
}

#[cfg(not(any(unix, windows)))]
fn shell_invocation(_line: &str) -> Result<Command> {
    anyhow::bail!("no host shell available on this platform")
}

//! Process execution utilities with optional timeout
//!
//! yt-dlp and ffmpeg are external processes; a hung fetch must not outlive
//! its deadline when one is configured.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Outcome of running a process under a deadline
#[derive(Debug)]
pub enum RunError {
    /// Spawning or waiting failed
    Io(std::io::Error),
    /// The deadline elapsed; the child has been killed
    TimedOut(Duration),
}

/// Run an async Command, optionally bounded by `timeout`.
///
/// The child is spawned with `kill_on_drop`, so dropping the future after a
/// timeout terminates the process.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Option<Duration>) -> Result<Output, RunError> {
    cmd.kill_on_drop(true);
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(RunError::Io(e)),
            Err(_) => Err(RunError::TimedOut(limit)),
        },
        None => cmd.output().await.map_err(RunError::Io),
    }
}

/// Returns the first line of `<bin> <version_arg>`, or None if it cannot run.
pub async fn tool_version(bin: &str, version_arg: &str) -> Option<String> {
    let output = run_with_timeout(Command::new(bin).arg(version_arg), Some(Duration::from_secs(10)))
        .await
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|line| line.trim().to_string())
}

//! Blocking subprocess execution with line-oriented output streaming.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use meow_logging::meow_debug;

use crate::{EngineEvent, SubprocessError};

/// Spawns the extraction tool, forwards every stdout/stderr line as a
/// `JobOutput` event, and blocks until it exits.
pub(crate) fn run_download(
    tool: &Path,
    args: &[String],
    tx: &mpsc::Sender<EngineEvent>,
) -> Result<(), SubprocessError> {
    let tool_name = tool.display().to_string();
    meow_debug!("spawning {} with {} args", tool_name, args.len());

    let mut child = Command::new(tool)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| SubprocessError::Spawn {
            tool: tool_name.clone(),
            source,
        })?;

    // stderr is drained on a helper thread so the child never blocks on a
    // full pipe; both streams feed the same line channel.
    let stderr_reader = child.stderr.take().map(|stderr| {
        let tx = tx.clone();
        thread::spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                let _ = tx.send(EngineEvent::JobOutput { line });
            }
        })
    });

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            let _ = tx.send(EngineEvent::JobOutput { line });
        }
    }

    if let Some(handle) = stderr_reader {
        let _ = handle.join();
    }

    let status = child.wait().map_err(|source| SubprocessError::Io {
        tool: tool_name.clone(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(SubprocessError::Failed {
            tool: tool_name,
            status,
        })
    }
}

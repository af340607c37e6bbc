//! Process runner: invokes the external cloc tool and extracts its result.
//!
//! The tool is contracted to print human-readable progress to stdout and,
//! as the final line, a bare decimal integer carrying the aggregate total.
//! Every line is echoed through to the harness's own stdout as it arrives,
//! so an operator watching the run sees the same output as a direct
//! invocation.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// Errors that abort the entire run.
///
/// Per-case problems (malformed output, wrong totals) are data, not errors;
/// they are reported through [`ToolOutcome`]. An error here means the
/// environment is broken and later cases would fail identically.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The tool binary could not be started at all.
    #[error("failed to launch {tool}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the tool's stdout failed mid-stream.
    #[error("failed to read tool output")]
    Stdout {
        #[source]
        source: std::io::Error,
    },
}

/// The scalar outcome of one tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The final output line was a bare decimal integer.
    Total(u64),
    /// The stream ended without a digit-only final line: empty output, an
    /// error message, or trailing garbage. Distinct from `Total(0)` and
    /// never equal to any expected value.
    NoResult,
    /// The per-case timeout expired before stdout closed; the child was
    /// killed.
    TimedOut,
}

impl std::fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolOutcome::Total(n) => write!(f, "{n}"),
            ToolOutcome::NoResult => write!(f, "no result"),
            ToolOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Run the cloc tool once and extract the aggregate total from its output.
///
/// Spawns `tool_path` with `args` passed through unmodified, streams stdout
/// line-by-line to the harness's stdout in arrival order, and tracks the
/// most recent line with non-whitespace content. After EOF, a candidate
/// line made solely of ASCII digits parses to [`ToolOutcome::Total`];
/// anything else yields [`ToolOutcome::NoResult`].
///
/// When `timeout` is given and expires before the stream closes, the child
/// is killed and the outcome is [`ToolOutcome::TimedOut`]. With no timeout
/// the runner waits for as long as the tool runs.
///
/// stderr is inherited so tool diagnostics stay visible alongside the
/// echoed stdout.
pub async fn run_tool(
    tool_path: &Path,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<ToolOutcome, RunnerError> {
    let mut child = Command::new(tool_path)
        .args(args)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::inherit())
        .spawn()
        .map_err(|source| RunnerError::Launch {
            tool: tool_path.display().to_string(),
            source,
        })?;

    // stdout was configured as piped above, so take() only fails if the
    // pipe plumbing itself is broken.
    let Some(stdout) = child.stdout.take() else {
        return Err(RunnerError::Stdout {
            source: std::io::Error::other("stdout pipe missing on spawned child"),
        });
    };

    let drain = async {
        let mut lines = BufReader::new(stdout).lines();
        let mut candidate: Option<String> = None;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    // Echo immediately, preserving order, for observability.
                    println!("{line}");
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        candidate = Some(trimmed.to_owned());
                    }
                }
                Ok(None) => break Ok(candidate),
                Err(source) => break Err(RunnerError::Stdout { source }),
            }
        }
    };

    let candidate = match timeout {
        Some(limit) => match tokio::time::timeout(limit, drain).await {
            Ok(drained) => drained?,
            Err(_) => {
                debug!(tool = %tool_path.display(), timeout_secs = limit.as_secs(), "tool timed out");
                let _ = child.kill().await;
                let _ = child.wait().await;
                return Ok(ToolOutcome::TimedOut);
            }
        },
        None => drain.await?,
    };

    // Reap the child; its exit status is not part of the result contract.
    let _ = child.wait().await;

    match candidate {
        Some(line) if line.bytes().all(|b| b.is_ascii_digit()) => {
            // A digit run longer than u64::MAX is malformed output, not a
            // total.
            match line.parse::<u64>() {
                Ok(total) => Ok(ToolOutcome::Total(total)),
                Err(_) => Ok(ToolOutcome::NoResult),
            }
        }
        _ => Ok(ToolOutcome::NoResult),
    }
}

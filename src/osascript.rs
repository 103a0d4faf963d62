//! osascript bridge shared by the Contacts and Messages adapters.
//!
//! Runs one script per call, captures its output, and kills the child if it
//! outlives the timeout.
//!
//! CHANGELOG:
//! - 10/19/2026 - Real timeout via polling, JXA language switch
//! - 01/10/2026 - Initial implementation inside applescript.rs (Claude)

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Scripting language passed to osascript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    AppleScript,
    /// JavaScript for Automation (`-l JavaScript`).
    JavaScript,
}

/// Errors from running an automation script.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("failed to launch osascript: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("script failed: {0}")]
    Failed(String),

    #[error("script timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Run a script through osascript and return its trimmed stdout.
pub fn run(language: Language, script: &str, timeout: Duration) -> Result<String, ScriptError> {
    let mut args: Vec<&str> = Vec::with_capacity(4);
    if language == Language::JavaScript {
        args.extend(["-l", "JavaScript"]);
    }
    args.extend(["-e", script]);

    run_program("osascript", &args, timeout)
}

/// Spawn `program`, wait up to `timeout`, and collect stdout.
///
/// Pipes are drained on their own threads so a chatty script (the Contacts
/// dump can be large) never blocks on a full pipe while we poll.
pub(crate) fn run_program(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String, ScriptError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            tracing::warn!(program, ?timeout, "killing script after timeout");
            let _ = child.kill();
            let _ = child.wait();
            return Err(ScriptError::TimedOut(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();

    if status.success() {
        Ok(stdout.trim().to_string())
    } else {
        tracing::debug!(program, code = ?status.code(), "script exited with failure");
        Err(ScriptError::Failed(stderr.trim().to_string()))
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

//! Messaging adapter: sends one iMessage to one recipient via Messages.app.
//!
//! CHANGELOG:
//! - 10/19/2026 - Messenger trait, 30s timeout through the osascript bridge
//! - 01/10/2026 - Initial implementation (Claude)

use crate::osascript::{self, Language, ScriptError};
use std::time::Duration;

/// How long Messages.app gets to accept a single send.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Escape a string for safe inclusion in AppleScript.
///
/// CRITICAL: Order matters!
/// 1. Escape backslashes FIRST
/// 2. Then escape quotes
///
/// This prevents injection attacks where user data breaks the string context.
pub fn escape_applescript_string(s: &str) -> String {
    s.replace('\\', "\\\\") // Backslashes FIRST
        .replace('"', "\\\"") // Then quotes
}

/// Delivers a single message to a single recipient.
pub trait Messenger {
    fn send(&self, phone: &str, message: &str) -> Result<(), ScriptError>;
}

/// Messages.app over AppleScript, first iMessage account.
#[derive(Debug, Clone)]
pub struct IMessage {
    timeout: Duration,
}

impl IMessage {
    pub fn new() -> Self {
        Self {
            timeout: SEND_TIMEOUT,
        }
    }
}

impl Default for IMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl Messenger for IMessage {
    fn send(&self, phone: &str, message: &str) -> Result<(), ScriptError> {
        tracing::debug!(phone, chars = message.chars().count(), "sending iMessage");
        osascript::run(Language::AppleScript, &send_script(phone, message), self.timeout)?;
        Ok(())
    }
}

/// Build the Messages.app script for one recipient.
fn send_script(phone: &str, message: &str) -> String {
    let safe_phone = escape_applescript_string(phone);
    let safe_msg = escape_applescript_string(message);

    format!(
        r#"
tell application "Messages"
    set targetService to 1st account whose service type = iMessage
    set targetBuddy to participant "{}" of targetService
    send "{}" to targetBuddy
end tell
"#,
        safe_phone, safe_msg
    )
}

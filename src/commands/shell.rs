//! `shell` command: the interactive party planner on stdin/stdout.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use super::Workspace;
use crate::compose::AnthropicClient;
use crate::messaging::IMessage;
use crate::shell::{Console, Shell};
use anyhow::Result;

pub fn run(ws: &Workspace) -> Result<()> {
    let messenger = IMessage::new();

    // A broken client (e.g. TLS init) just means no AI option.
    let generator = match AnthropicClient::from_settings(&ws.settings) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "AI drafting unavailable");
            None
        }
    };
    tracing::debug!(ai = ws.settings.has_ai(), data_dir = ?ws.settings.paths.data_dir, "starting shell");

    let mut shell = Shell::new(Console::stdio(), &ws.store, &ws.directory, &messenger);
    if let Some(ref client) = generator {
        shell = shell.with_generator(client);
    }
    shell.run()
}

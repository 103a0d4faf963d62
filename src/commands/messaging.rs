//! Messaging commands: preview, draft, send-by-phone.
//!
//! CHANGELOG:
//! - 10/19/2026 - send-by-phone passes the recipient through as typed
//! - 10/19/2026 - preview/draft for party lists, Messenger trait
//! - 01/10/2026 - Implemented send and send_by_phone with AppleScript (Claude)

use super::Workspace;
use crate::compose::{AnthropicClient, DraftRequest, GenerateError, MessageGenerator, Template};
use crate::config::Settings;
use crate::lists::{validate_name, ListError};
use crate::messaging::{IMessage, Messenger};
use crate::output::OutputControls;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize)]
pub struct Preview {
    pub name: String,
    pub phone: String,
    pub message: String,
}

/// Render a template for every contact in a list without sending anything.
pub fn preview(ws: &Workspace, list: &str, template: &str, output: &OutputControls) -> Result<Vec<Preview>> {
    let list = validate_name(list)?;
    if !ws.store.exists(list) {
        return Err(ListError::NotFound(list.to_string()).into());
    }
    let template = Template::parse(template)?;

    let previews: Vec<Preview> = ws
        .store
        .load(list)
        .into_iter()
        .map(|c| Preview {
            message: template.render(&c),
            name: c.name,
            phone: c.phone,
        })
        .collect();

    if output.json {
        output.print(&previews);
    } else {
        let total = previews.len();
        for (i, p) in previews.iter().enumerate() {
            println!("--- {}/{}: {} ({}) ---", i + 1, total, p.name, p.phone);
            println!("> {}\n", p.message);
        }
        if total == 0 {
            println!("No contacts in '{}'.", list);
        }
    }
    Ok(previews)
}

/// Draft one invitation with the AI writer.
pub fn draft(settings: &Settings, event: &str, name: &str, vibe: Option<&str>, output: &OutputControls) -> Result<()> {
    let client = AnthropicClient::from_settings(settings)?.ok_or(GenerateError::NotConfigured)?;
    draft_with(&client, event, name, vibe, output).map(|_| ())
}

fn draft_with(
    generator: &dyn MessageGenerator,
    event: &str,
    name: &str,
    vibe: Option<&str>,
    output: &OutputControls,
) -> Result<String> {
    let request = DraftRequest::new(event, name, vibe);
    let message = generator
        .generate(&request)
        .context("AI generation failed")?;

    if output.json {
        output.print(&json!({
            "event": request.event,
            "first_name": request.first_name,
            "vibe": request.vibe,
            "message": message,
        }));
    } else {
        println!("{}", message);
    }
    Ok(message)
}

/// Send message directly to a phone number.
///
/// The recipient goes to Messages as typed (trimmed), the same way list
/// contacts do; no country code is guessed.
pub fn send_by_phone(phone: &str, message: &str, output: &OutputControls) -> Result<()> {
    send_with(&IMessage::new(), phone, message, output)
}

fn send_with(messenger: &dyn Messenger, phone: &str, message: &str, output: &OutputControls) -> Result<()> {
    let recipient = phone.trim();
    if recipient.is_empty() {
        bail!("Phone number cannot be empty.");
    }

    match messenger.send(recipient, message) {
        Ok(()) => {
            if output.json {
                output.print(&json!({
                    "success": true,
                    "phone": recipient,
                    "message": message
                }));
            } else {
                println!("Message sent to {}", recipient);
            }
            Ok(())
        }
        Err(e) => {
            if output.json {
                output.print(&json!({
                    "success": false,
                    "phone": recipient,
                    "error": e.to_string()
                }));
            }
            Err(e).context("Failed to send message")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::workspace;
    use crate::contacts::Contact;
    use crate::osascript::ScriptError;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn quiet() -> OutputControls {
        OutputControls {
            json: true,
            compact: true,
            fields: None,
        }
    }

    #[test]
    fn test_preview_renders_each_contact() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir, Vec::new());
        ws.store
            .save(
                "bbq",
                &[
                    Contact::from_address_book("Ada Lovelace", "1"),
                    Contact::new("Grace Hopper", "2"),
                ],
            )
            .unwrap();

        let previews = preview(&ws, "bbq", "Hi {name}!", &quiet()).unwrap();
        let bodies: Vec<&str> = previews.iter().map(|p| p.message.as_str()).collect();
        assert_eq!(bodies, vec!["Hi Ada!", "Hi Grace!"]);
    }

    #[test]
    fn test_preview_rejects_bad_template() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir, Vec::new());
        ws.store.save("bbq", &[]).unwrap();
        let err = preview(&ws, "bbq", "Hi {nick}", &quiet()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid placeholder"));
    }

    #[test]
    fn test_draft_without_key() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir, Vec::new());
        let err = draft(&ws.settings, "BBQ", "Ada", None, &quiet()).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    struct Echo;

    impl MessageGenerator for Echo {
        fn generate(&self, request: &DraftRequest) -> Result<String, GenerateError> {
            Ok(format!("{}: {}", request.first_name, request.event))
        }
    }

    #[test]
    fn test_draft_with_generator() {
        let msg = draft_with(&Echo, "BBQ", "Ada", None, &quiet()).unwrap();
        assert_eq!(msg, "Ada: BBQ");
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Messenger for Recorder {
        fn send(&self, phone: &str, _message: &str) -> Result<(), ScriptError> {
            self.0.borrow_mut().push(phone.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_send_passes_recipient_through() {
        let recorder = Recorder::default();
        send_with(&recorder, " (415) 555-1234 ", "hi", &quiet()).unwrap();
        send_with(&recorder, "1 415 555 1234", "hi", &quiet()).unwrap();
        send_with(&recorder, "+14155551234", "hi", &quiet()).unwrap();
        assert_eq!(
            *recorder.0.borrow(),
            vec![
                "(415) 555-1234".to_string(),
                "1 415 555 1234".to_string(),
                "+14155551234".to_string(),
            ]
        );
    }

    #[test]
    fn test_send_rejects_blank_recipient() {
        let recorder = Recorder::default();
        let err = send_with(&recorder, "   ", "hi", &quiet()).unwrap_err();
        assert_eq!(err.to_string(), "Phone number cannot be empty.");
        assert!(recorder.0.borrow().is_empty());
    }
}

//! Send flow: draft one message per contact, confirm each, send one at a time.

use super::style::rule;
use super::{Flow, Shell};
use crate::compose::generate::DEFAULT_VIBE;
use crate::compose::{DraftRequest, GenerateError, Template, DEFAULT_TEMPLATE};
use crate::contacts::Contact;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Where each contact's message comes from.
enum Drafting {
    Template(Template),
    Ai { event: String, vibe: String },
}

/// Running counts for the end-of-run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SendTally {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SendTally {
    pub fn summary(&self) -> String {
        let mut line = format!("Sent: {}, Skipped: {}", self.sent, self.skipped);
        if self.failed > 0 {
            line.push_str(&format!(", Failed: {}", self.failed));
        }
        line
    }
}

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(crate) fn send_texts(&mut self, contacts: &[Contact]) -> Result<Flow> {
        if contacts.is_empty() {
            self.console
                .say("\nNo contacts in your party list. Add some first!")?;
            return Ok(Flow::Continue);
        }

        self.console.say(format!("\n{}", rule()))?;
        self.console.say("         TIME TO SEND SOME TEXTS")?;
        self.console.say(rule())?;
        self.console.say("")?;
        self.console
            .say("Write your message below. Use {name} and it'll be")?;
        self.console
            .say("swapped with each person's first name automatically.")?;
        self.console.say("")?;
        self.console.say(format!("Type '1' to use: {}", DEFAULT_TEMPLATE))?;
        if self.generator.is_some() {
            self.console
                .say("Type '2' to have AI write a unique message for each person.")?;
        }
        self.console.say("")?;

        let Some(input) = self.console.prompt("> ")? else {
            return Ok(Flow::Exit);
        };

        let drafting = match input.as_str() {
            "1" => {
                self.console.say(format!("Using: {}\n", DEFAULT_TEMPLATE))?;
                Drafting::Template(Template::parse(DEFAULT_TEMPLATE)?)
            }
            "2" if self.generator.is_some() => {
                let Some(event) = self
                    .console
                    .prompt("What's the event? (e.g. rooftop BBQ Saturday at 6): ")?
                else {
                    return Ok(Flow::Exit);
                };
                if event.is_empty() {
                    self.console.say("Event description cannot be empty.")?;
                    return Ok(Flow::Continue);
                }
                let Some(vibe) = self
                    .console
                    .prompt(&format!("Vibe (Enter for '{}'): ", DEFAULT_VIBE))?
                else {
                    return Ok(Flow::Exit);
                };
                Drafting::Ai { event, vibe }
            }
            other => match Template::parse(other) {
                Ok(template) => {
                    if !template.is_personalized() {
                        self.console.say("(No placeholders: everyone gets the same text.)")?;
                    }
                    Drafting::Template(template)
                }
                Err(e) => {
                    self.console.say(e.to_string())?;
                    return Ok(Flow::Continue);
                }
            },
        };

        let is_ai = matches!(drafting, Drafting::Ai { .. });
        if is_ai {
            self.console
                .say("\n[Enter] or [S] to send / [E]dit / [R]egenerate / [N]ext / [Q]uit\n")?;
        } else {
            self.console
                .say("\n[Enter] or [S] to send / [E]dit / [N]ext / [Q]uit\n")?;
        }
        let choice_label = if is_ai {
            "[Enter/S/E/R/N/Q]: "
        } else {
            "[Enter/S/E/N/Q]: "
        };

        let total = contacts.len();
        let mut tally = SendTally::default();

        for (i, contact) in contacts.iter().enumerate() {
            let mut message = self.draft_for(&drafting, contact)?;

            loop {
                self.console
                    .say(format!("--- {}/{}: {} ---", i + 1, total, contact.name))?;
                if message.is_empty() {
                    self.console.say("> (no draft - press E to write one)\n")?;
                } else {
                    self.console.say(format!("> {}\n", message))?;
                }

                let Some(choice) = self.console.prompt(choice_label)? else {
                    tally.skipped += total - i;
                    self.console.say(format!("\n{}", tally.summary()))?;
                    return Ok(Flow::Exit);
                };

                match choice.to_lowercase().as_str() {
                    "" | "s" => {
                        if message.trim().is_empty() {
                            self.console.say("Nothing to send yet.\n")?;
                            continue;
                        }
                        self.console.print("Sending... ")?;
                        match self.messenger.send(&contact.phone, &message) {
                            Ok(()) => {
                                self.console.say("Sent!")?;
                                tally.sent += 1;
                            }
                            Err(e) => {
                                tracing::warn!(phone = %contact.phone, error = %e, "send failed");
                                self.console.say(format!("Failed: {}", e))?;
                                tally.failed += 1;
                            }
                        }
                        break;
                    }
                    "e" => {
                        let Some(edited) = self.console.prompt("New msg: ")? else {
                            tally.skipped += total - i;
                            self.console.say(format!("\n{}", tally.summary()))?;
                            return Ok(Flow::Exit);
                        };
                        if !edited.is_empty() {
                            message = edited;
                        }
                        self.console.say("")?;
                    }
                    "r" if is_ai => {
                        message = self.draft_for(&drafting, contact)?;
                    }
                    "n" => {
                        tally.skipped += 1;
                        break;
                    }
                    "q" => {
                        tally.skipped += total - i;
                        self.console.say(format!("\n{}", tally.summary()))?;
                        return Ok(Flow::Continue);
                    }
                    _ => {}
                }
            }
        }

        self.console.say(format!("\nDone! {}", tally.summary()))?;
        tracing::info!(sent = tally.sent, skipped = tally.skipped, failed = tally.failed, "send run finished");
        Ok(Flow::Continue)
    }

    /// Draft a message; AI failures are reported and leave an empty draft.
    fn draft_for(&mut self, drafting: &Drafting, contact: &Contact) -> Result<String> {
        match drafting {
            Drafting::Template(template) => Ok(template.render(contact)),
            Drafting::Ai { event, vibe } => {
                let request = DraftRequest::new(event, contact.first_name(), Some(vibe));
                let result = match self.generator {
                    Some(generator) => generator.generate(&request),
                    None => Err(GenerateError::NotConfigured),
                };
                match result {
                    Ok(text) => Ok(text),
                    Err(e) => {
                        tracing::warn!(error = %e, "AI draft failed");
                        self.console.say(format!("AI generation failed: {}", e))?;
                        Ok(String::new())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SendTally;
    use crate::compose::{DraftRequest, GenerateError, MessageGenerator};
    use crate::shell::testing::*;

    fn with_bbq() -> Harness {
        let h = Harness::new();
        h.store.save("bbq", &address_book()).unwrap();
        h
    }

    #[test]
    fn test_default_template_send_skip_edit() {
        let h = with_bbq();
        let out = h.run(&["1", "6", "1", "", "n", "e", "Custom for Adam", "s", "0"]);

        assert!(out.contains("--- 1/3: Ada Lovelace ---"));
        assert!(out.contains("> Hey Ada! Party at my place Friday at 8, you in?"));
        assert!(out.contains("Sending... Sent!"));
        assert!(out.contains("Done! Sent: 2, Skipped: 1"));
        assert_eq!(
            h.sent(),
            vec![
                (
                    "+1 555 0100".to_string(),
                    "Hey Ada! Party at my place Friday at 8, you in?".to_string()
                ),
                ("+1 555 0300".to_string(), "Custom for Adam".to_string()),
            ]
        );
    }

    #[test]
    fn test_custom_template_personalizes() {
        let h = with_bbq();
        h.run(&["1", "6", "Yo {name}, bring {{snacks}}", "s", "s", "s", "0"]);
        let bodies: Vec<String> = h.sent().into_iter().map(|(_, m)| m).collect();
        assert_eq!(
            bodies,
            vec![
                "Yo Ada, bring {snacks}",
                "Yo Grace, bring {snacks}",
                "Yo Adam, bring {snacks}"
            ]
        );
    }

    #[test]
    fn test_quit_counts_rest_as_skipped() {
        let h = with_bbq();
        let out = h.run(&["1", "6", "Hi {name}", "s", "q", "0"]);
        assert!(out.contains("\nSent: 1, Skipped: 2"));
        assert_eq!(h.sent().len(), 1);
    }

    #[test]
    fn test_invalid_placeholder_aborts_before_sending() {
        let h = with_bbq();
        let out = h.run(&["1", "6", "Hi {nickname}", "0"]);
        assert!(out.contains("Invalid placeholder: {nickname}"));
        assert!(h.sent().is_empty());
    }

    #[test]
    fn test_plain_template_notice() {
        let h = with_bbq();
        let out = h.run(&["1", "6", "Party tonight", "q", "0"]);
        assert!(out.contains("(No placeholders: everyone gets the same text.)"));

        let out = h.run(&["1", "6", "Hi {name}", "q", "0"]);
        assert!(!out.contains("No placeholders"));
    }

    #[test]
    fn test_empty_template() {
        let h = with_bbq();
        let out = h.run(&["1", "6", "", "0"]);
        assert!(out.contains("Message cannot be empty."));
    }

    #[test]
    fn test_empty_edit_keeps_message() {
        let h = with_bbq();
        h.run(&["1", "6", "Hi {name}", "e", "", "s", "q", "0"]);
        assert_eq!(h.sent()[0].1, "Hi Ada");
    }

    #[test]
    fn test_failed_sends_are_counted() {
        let mut h = with_bbq();
        h.messenger.fail = true;
        let out = h.run(&["1", "6", "Hi", "", "", "", "0"]);
        assert!(out.contains("Failed: script failed: Messages got an error"));
        assert!(out.contains("Done! Sent: 0, Skipped: 0, Failed: 3"));
    }

    #[test]
    fn test_empty_list() {
        let h = Harness::new();
        h.store.save("bbq", &[]).unwrap();
        let out = h.run(&["1", "6", "0"]);
        assert!(out.contains("No contacts in your party list. Add some first!"));
    }

    #[test]
    fn test_eof_mid_run_reports_and_exits() {
        let h = with_bbq();
        let out = h.run(&["1", "6", "Hi", "s"]);
        assert!(out.contains("\nSent: 1, Skipped: 2"));
        assert!(out.ends_with("Goodbye! Party on!\n"));
    }

    #[test]
    fn test_ai_option_hidden_without_generator() {
        let h = with_bbq();
        let out = h.run(&["1", "6", "2", "s", "q", "0"]);
        assert!(!out.contains("Type '2'"));
        // "2" is just a (plain) template then
        assert_eq!(h.sent()[0].1, "2");
    }

    #[test]
    fn test_ai_drafts_per_contact() {
        let h = with_bbq();
        let out = h.run_with(
            &["1", "6", "2", "rooftop BBQ", "", "s", "r", "n", "q", "0"],
            Some(&FakeGenerator),
        );
        assert!(out.contains("Type '2' to have AI write a unique message for each person."));
        assert!(out.contains("> Grace, rooftop BBQ is happening (fun and casual)"));
        assert_eq!(
            h.sent(),
            vec![(
                "+1 555 0100".to_string(),
                "Ada, rooftop BBQ is happening (fun and casual)".to_string()
            )]
        );
        assert!(out.contains("Sent: 1, Skipped: 2"));
    }

    struct DownGenerator;

    impl MessageGenerator for DownGenerator {
        fn generate(&self, _request: &DraftRequest) -> Result<String, GenerateError> {
            Err(GenerateError::Status {
                status: 529,
                body: "overloaded".to_string(),
            })
        }
    }

    #[test]
    fn test_ai_failure_requires_manual_edit() {
        let h = with_bbq();
        let out = h.run_with(
            &["1", "6", "2", "BBQ", "chill", "s", "e", "Come to the BBQ!", "s", "q", "0"],
            Some(&DownGenerator),
        );
        assert!(out.contains("AI generation failed: API returned 529: overloaded"));
        assert!(out.contains("Nothing to send yet."));
        assert_eq!(h.sent(), vec![("+1 555 0100".to_string(), "Come to the BBQ!".to_string())]);
    }

    #[test]
    fn test_tally_summary() {
        let tally = SendTally {
            sent: 2,
            skipped: 1,
            failed: 0,
        };
        assert_eq!(tally.summary(), "Sent: 2, Skipped: 1");
    }
}

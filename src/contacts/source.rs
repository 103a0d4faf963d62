//! Address-book adapter: reads name/phone pairs out of Contacts.app via JXA.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use super::model::Contact;
use crate::osascript::{self, Language, ScriptError};
use std::time::Duration;

/// Large address books take a while to enumerate.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(300);

/// JavaScript for Automation: one `name|phone` line per person with a phone.
/// Only the first phone number of each person is used.
const CONTACTS_JXA: &str = r#"
const app = Application("Contacts");
const people = app.people();
const results = [];
for (let i = 0; i < people.length; i++) {
    try {
        const p = people[i];
        const name = p.name();
        const phones = p.phones();
        if (phones.length > 0) {
            results.push(name + "|" + phones[0].value());
        }
    } catch(e) {}
}
results.join("\n");
"#;

/// Somewhere to pull the full address book from.
pub trait ContactSource {
    fn fetch(&self) -> Result<Vec<Contact>, ScriptError>;
}

/// macOS Contacts.app.
#[derive(Debug, Clone)]
pub struct MacContacts {
    timeout: Duration,
}

impl MacContacts {
    pub fn new() -> Self {
        Self {
            timeout: FETCH_TIMEOUT,
        }
    }
}

impl Default for MacContacts {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactSource for MacContacts {
    fn fetch(&self) -> Result<Vec<Contact>, ScriptError> {
        let stdout = osascript::run(Language::JavaScript, CONTACTS_JXA, self.timeout)?;
        let contacts = parse_contact_lines(&stdout);
        tracing::info!(count = contacts.len(), "fetched contacts from Contacts.app");
        Ok(contacts)
    }
}

/// Parse `name|phone` lines. Lines without a separator are skipped.
pub fn parse_contact_lines(stdout: &str) -> Vec<Contact> {
    stdout
        .lines()
        .filter(|line| line.contains('|'))
        .filter_map(|line| {
            let mut parts = line.split('|');
            let name = parts.next()?;
            let phone = parts.next()?;
            Some(Contact::from_address_book(name, phone))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let out = "Ada Lovelace|+1 555 0100\nGrace Hopper | (555) 010-0200 \n";
        let contacts = parse_contact_lines(out);
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Ada Lovelace");
        assert_eq!(contacts[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(contacts[1].name, "Grace Hopper");
        assert_eq!(contacts[1].phone, "(555) 010-0200");
    }

    #[test]
    fn test_parse_skips_noise() {
        let out = "no separator here\n\nCher|555 0300\n";
        let contacts = parse_contact_lines(out);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name(), "Cher");
    }

    #[test]
    fn test_parse_extra_separators_keeps_first_two() {
        let contacts = parse_contact_lines("Prince|555 0400|ignored");
        assert_eq!(contacts[0].phone, "555 0400");
    }

    #[test]
    fn test_parse_nameless_entry() {
        let contacts = parse_contact_lines("|555 0500");
        assert_eq!(contacts[0].name, "");
        assert_eq!(contacts[0].first_name, None);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_contact_lines("").is_empty());
    }
}

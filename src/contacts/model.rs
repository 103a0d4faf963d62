//! Contact record shared by lists, the cache, and the address-book adapter.
//!
//! CHANGELOG:
//! - 10/19/2026 - first_name derivation, same-recipient check

use serde::{Deserialize, Serialize};

/// A person we can text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub phone: String,
}

/// Wrapper for list and cache files (`{"contacts": [...]}`).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactsFile {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl Contact {
    /// A manually entered contact; greeting name is derived on demand.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first_name: None,
            phone: phone.into(),
        }
    }

    /// A contact pulled from the address book, with `first_name` stored.
    pub fn from_address_book(name: &str, phone: &str) -> Self {
        let name = name.trim();
        Self {
            name: name.to_string(),
            first_name: name.split_whitespace().next().map(str::to_string),
            phone: phone.trim().to_string(),
        }
    }

    /// Name used in greetings.
    ///
    /// Stored `first_name` if non-empty, else the first word of `name`,
    /// else the empty string.
    pub fn first_name(&self) -> &str {
        match self.first_name.as_deref().map(str::trim) {
            Some(first) if !first.is_empty() => first,
            _ => self.name.split_whitespace().next().unwrap_or(""),
        }
    }

    /// Whether two contacts reach the same phone.
    ///
    /// Compares digit sequences so "+1 (555) 010-0100" and "15550100100" match.
    /// Handles without digits (emails) compare case-insensitively.
    pub fn same_recipient(&self, other: &Contact) -> bool {
        let a = normalize_phone(&self.phone);
        let b = normalize_phone(&other.phone);
        if a.is_empty() || b.is_empty() {
            return self.phone.trim().eq_ignore_ascii_case(other.phone.trim());
        }
        a == b
    }
}

/// Normalize phone number for comparison.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+1 (415) 555-1234"), "14155551234");
        assert_eq!(normalize_phone("+14155551234"), "14155551234");
    }

    #[test]
    fn test_first_name_prefers_stored() {
        let mut c = Contact::new("Robert Tables", "555");
        c.first_name = Some("Bobby".to_string());
        assert_eq!(c.first_name(), "Bobby");
    }

    #[test]
    fn test_first_name_falls_back_to_name() {
        assert_eq!(Contact::new("Ada Lovelace", "555").first_name(), "Ada");
        assert_eq!(Contact::new("", "555").first_name(), "");

        let mut blank = Contact::new("Grace Hopper", "555");
        blank.first_name = Some("  ".to_string());
        assert_eq!(blank.first_name(), "Grace");
    }

    #[test]
    fn test_from_address_book_trims() {
        let c = Contact::from_address_book("  Ada Lovelace ", " +1 555 0100 ");
        assert_eq!(c.name, "Ada Lovelace");
        assert_eq!(c.first_name.as_deref(), Some("Ada"));
        assert_eq!(c.phone, "+1 555 0100");

        let nameless = Contact::from_address_book("", "555");
        assert_eq!(nameless.first_name, None);
    }

    #[test]
    fn test_same_recipient_ignores_formatting() {
        let a = Contact::new("A", "+1 (415) 555-1234");
        let b = Contact::new("B", "14155551234");
        let c = Contact::new("C", "14155550000");
        assert!(a.same_recipient(&b));
        assert!(!a.same_recipient(&c));
    }

    #[test]
    fn test_same_recipient_email_handles() {
        let a = Contact::new("A", "Ada@Example.com");
        let b = Contact::new("B", "ada@example.com");
        assert!(a.same_recipient(&b));
    }

    #[test]
    fn test_manual_contact_omits_first_name_in_json() {
        let json = serde_json::to_string(&Contact::new("Ada", "555")).unwrap();
        assert_eq!(json, r#"{"name":"Ada","phone":"555"}"#);
    }
}

//! Message templates with `{name}` / `{first_name}` / `{phone}` placeholders.
//!
//! `{{` and `}}` produce literal braces. Templates are validated once when
//! parsed so rendering can't fail halfway through a send run.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use crate::contacts::Contact;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Offered as option `1` in the send flow.
pub const DEFAULT_TEMPLATE: &str = "Hey {name}! Party at my place Friday at 8, you in?";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Message cannot be empty.")]
    Empty,

    #[error("Invalid placeholder: {{{0}}} (use {{name}}, {{first_name}} or {{phone}})")]
    UnknownPlaceholder(String),

    #[error("Unmatched '{0}' in message (write '{0}{0}' for a literal brace)")]
    UnmatchedBrace(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    FirstName,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Field),
}

/// A parsed, known-good template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

fn token_regex() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    // Alternation order matters: escapes before fields before stray braces.
    TOKENS.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("template token regex is valid")
    })
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut last = 0;

        for caps in token_regex().captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            text.push_str(&source[last..whole.start()]);
            last = whole.end();

            match whole.as_str() {
                "{{" => text.push('{'),
                "}}" => text.push('}'),
                "{" => return Err(TemplateError::UnmatchedBrace('{')),
                "}" => return Err(TemplateError::UnmatchedBrace('}')),
                _ => {
                    let key = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                    let field = match key.trim() {
                        "name" | "first_name" => Field::FirstName,
                        "phone" => Field::Phone,
                        _ => return Err(TemplateError::UnknownPlaceholder(key.to_string())),
                    };
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Field(field));
                }
            }
        }
        text.push_str(&source[last..]);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the template greets people individually.
    pub fn is_personalized(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Field(_)))
    }

    /// Fill placeholders for one contact.
    pub fn render(&self, contact: &Contact) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(Field::FirstName) => out.push_str(contact.first_name()),
                Segment::Field(Field::Phone) => out.push_str(&contact.phone),
            }
        }
        out
    }
}

/// Parse and render in one step.
pub fn draft_message(template: &str, contact: &Contact) -> Result<String, TemplateError> {
    Ok(Template::parse(template)?.render(contact))
}

//! Message composition: template substitution and optional AI drafting.

pub mod generate;
pub mod template;

pub use generate::{AnthropicClient, DraftRequest, GenerateError, MessageGenerator};
pub use template::{draft_message, Template, TemplateError, DEFAULT_TEMPLATE};

//! Contacts: the record type, the local cache, and the Contacts.app adapter.
//!
//! CHANGELOG:
//! - 10/19/2026 - cache/source/directory/search split
//! - 01/10/2026 - Initial module structure (Claude)

pub mod cache;
pub mod directory;
pub mod fuzzy;
pub mod model;
pub mod search;
pub mod source;

pub use model::Contact;

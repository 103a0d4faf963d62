//! party-planner library
//!
//! Named contact lists on disk, a Contacts.app cache, message templates with
//! optional AI drafting, and one-at-a-time iMessage sending.
//!
//! CHANGELOG:
//! - 10/19/2026 - Party planner modules
//! - 01/10/2026 - Initial library structure (Phase 4C, Claude)

pub mod commands;
pub mod compose;
pub mod config;
pub mod contacts;
pub mod lists;
pub mod messaging;
pub mod osascript;
pub mod output;
pub mod shell;

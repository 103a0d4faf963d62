//! Named contact lists on disk.

pub mod store;

pub use store::{validate_name, ListError, ListStore, ListSummary};

//! Cache-first access to the address book.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use super::cache::ContactCache;
use super::model::Contact;
use super::source::ContactSource;
use anyhow::{Context, Result};

/// Contacts cache backed by a live source for refreshes.
pub struct ContactDirectory {
    cache: ContactCache,
    source: Box<dyn ContactSource>,
}

impl ContactDirectory {
    pub fn new(cache: ContactCache, source: Box<dyn ContactSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &ContactCache {
        &self.cache
    }

    /// Cached snapshot, if any.
    pub fn cached(&self) -> Option<Vec<Contact>> {
        self.cache.load()
    }

    /// Pull the full address book and overwrite the cache.
    ///
    /// A failed fetch leaves the existing cache untouched.
    pub fn sync(&self) -> Result<Vec<Contact>> {
        let contacts = self
            .source
            .fetch()
            .context("Failed to load contacts from Contacts.app")?;
        self.cache.save(&contacts)?;
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osascript::ScriptError;
    use tempfile::TempDir;

    struct Fixed(Vec<Contact>);

    impl ContactSource for Fixed {
        fn fetch(&self) -> Result<Vec<Contact>, ScriptError> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl ContactSource for Broken {
        fn fetch(&self) -> Result<Vec<Contact>, ScriptError> {
            Err(ScriptError::Failed("Not authorized to send Apple events".to_string()))
        }
    }

    #[test]
    fn test_sync_fills_cache() {
        let dir = TempDir::new().unwrap();
        let cache = ContactCache::new(dir.path().join("cache.json"));
        let directory = ContactDirectory::new(
            cache,
            Box::new(Fixed(vec![Contact::from_address_book("Ada Lovelace", "555")])),
        );

        assert!(directory.cached().is_none());
        let synced = directory.sync().unwrap();
        assert_eq!(synced.len(), 1);
        assert_eq!(directory.cached().unwrap(), synced);
    }

    #[test]
    fn test_failed_sync_keeps_old_cache() {
        let dir = TempDir::new().unwrap();
        let cache = ContactCache::new(dir.path().join("cache.json"));
        cache.save(&[Contact::new("Old Friend", "555")]).unwrap();

        let directory = ContactDirectory::new(cache, Box::new(Broken));
        let err = directory.sync().unwrap_err();

        assert!(format!("{:#}", err).contains("Not authorized"));
        assert_eq!(directory.cached().unwrap()[0].name, "Old Friend");
    }
}

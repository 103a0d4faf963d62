//! Command implementations.
//!
//! CHANGELOG:
//! - 10/19/2026 - Workspace handle, list/compose/shell commands
//! - 01/10/2026 - Initial module structure (Claude)

pub mod contacts;
pub mod lists;
pub mod messaging;
pub mod shell;

use crate::config::Settings;
use crate::contacts::cache::ContactCache;
use crate::contacts::directory::ContactDirectory;
use crate::contacts::source::{ContactSource, MacContacts};
use crate::lists::ListStore;

/// Opened stores for one invocation.
pub struct Workspace {
    pub settings: Settings,
    pub store: ListStore,
    pub directory: ContactDirectory,
}

impl Workspace {
    /// Stores under the configured data dir, syncing from Contacts.app.
    pub fn open(settings: Settings) -> Self {
        Self::with_source(settings, Box::new(MacContacts::new()))
    }

    pub fn with_source(settings: Settings, source: Box<dyn ContactSource>) -> Self {
        let store = ListStore::new(&settings.paths.lists_dir);
        let cache = ContactCache::new(&settings.paths.cache_file);
        Self {
            directory: ContactDirectory::new(cache, source),
            store,
            settings,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::config::Paths;
    use crate::contacts::Contact;
    use crate::osascript::ScriptError;
    use tempfile::TempDir;

    pub struct StaticSource(pub Vec<Contact>);

    impl ContactSource for StaticSource {
        fn fetch(&self) -> Result<Vec<Contact>, ScriptError> {
            Ok(self.0.clone())
        }
    }

    pub fn workspace(dir: &TempDir, book: Vec<Contact>) -> Workspace {
        let settings = Settings::new(Paths::under(dir.path()), None, None);
        Workspace::with_source(settings, Box::new(StaticSource(book)))
    }
}

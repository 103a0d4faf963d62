//! Local snapshot of the address book so searches don't hit Contacts.app.
//!
//! CHANGELOG:
//! - 10/19/2026 - synced_at stamp, tolerant load

use super::model::Contact;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    synced_at: Option<DateTime<Utc>>,
    #[serde(default)]
    contacts: Vec<Contact>,
}

/// Cached contacts file (`mac_contacts_cache.json`).
#[derive(Debug, Clone)]
pub struct ContactCache {
    path: PathBuf,
}

impl ContactCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached contacts, or `None` if there is no usable cache.
    pub fn load(&self) -> Option<Vec<Contact>> {
        self.read().map(|file| file.contacts)
    }

    /// When the cache was last written by a sync.
    pub fn synced_at(&self) -> Option<DateTime<Utc>> {
        self.read().and_then(|file| file.synced_at)
    }

    /// Overwrite the cache with a fresh snapshot.
    pub fn save(&self, contacts: &[Contact]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let file = CacheFile {
            synced_at: Some(Utc::now()),
            contacts: contacts.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write contacts cache: {:?}", self.path))?;

        tracing::debug!(path = ?self.path, count = contacts.len(), "saved contacts cache");
        Ok(())
    }

    fn read(&self) -> Option<CacheFile> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = ?self.path, error = %e, "unreadable contacts cache");
                }
                return None;
            }
        };

        match serde_json::from_str::<CacheFile>(&content) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "corrupt contacts cache ignored");
                None
            }
        }
    }
}

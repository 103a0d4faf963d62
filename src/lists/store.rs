//! Named contact lists, one JSON file each under the lists directory.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation, name validation, delete

use crate::contacts::model::{Contact, ContactsFile};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LIST_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum ListError {
    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Invalid list name '{0}': must not contain path separators or '..'")]
    InvalidName(String),

    #[error("List '{0}' not found")]
    NotFound(String),

    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// List name plus how many contacts it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub name: String,
    pub count: usize,
}

/// File-backed store of named contact lists.
#[derive(Debug, Clone)]
pub struct ListStore {
    dir: PathBuf,
}

/// Reject names that are empty or would escape the lists directory.
pub fn validate_name(name: &str) -> Result<&str, ListError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ListError::EmptyName);
    }
    if name.contains(['/', '\\', '\0']) || name.contains("..") {
        return Err(ListError::InvalidName(name.to_string()));
    }
    Ok(name)
}

impl ListStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ensure the lists directory exists.
    pub fn ensure_dir(&self) -> Result<(), ListError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ListError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ListError> {
        let name = validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, LIST_EXTENSION)))
    }

    /// All list names, sorted.
    pub fn names(&self) -> Result<Vec<String>, ListError> {
        self.ensure_dir()?;
        let entries = std::fs::read_dir(&self.dir).map_err(|source| ListError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(LIST_EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Contacts in a list.
    ///
    /// A missing or unreadable list reads as empty; nothing is lost until the
    /// next save overwrites it.
    pub fn load(&self, name: &str) -> Vec<Contact> {
        let path = match self.path_for(name) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(list = name, error = %e, "refusing to load list");
                return Vec::new();
            }
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(?path, error = %e, "unreadable list file");
                }
                return Vec::new();
            }
        };

        match serde_json::from_str::<ContactsFile>(&content) {
            Ok(file) => file.contacts,
            Err(e) => {
                tracing::warn!(?path, error = %e, "corrupt list file read as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite a list with `contacts`.
    pub fn save(&self, name: &str, contacts: &[Contact]) -> Result<(), ListError> {
        let path = self.path_for(name)?;
        self.ensure_dir()?;

        let file = ContactsFile {
            contacts: contacts.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&path, json).map_err(|source| ListError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(?path, count = contacts.len(), "saved list");
        Ok(())
    }

    /// Every list with its contact count.
    pub fn summaries(&self) -> Result<Vec<ListSummary>, ListError> {
        Ok(self
            .names()?
            .into_iter()
            .map(|name| {
                let count = self.load(&name).len();
                ListSummary { name, count }
            })
            .collect())
    }

    /// Remove a list file.
    pub fn delete(&self, name: &str) -> Result<(), ListError> {
        let path = self.path_for(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(?path, "deleted list");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ListError::NotFound(name.trim().to_string()))
            }
            Err(source) => Err(ListError::Io { path, source }),
        }
    }
}

//! Runtime settings: where lists and the contacts cache live, and how to reach
//! the drafting API.
//!
//! CHANGELOG:
//! - 10/19/2026 - .env support (working directory and data dir)
//! - 10/19/2026 - Paths + Settings, env overrides (PARTY_PLANNER_HOME)

use std::path::{Path, PathBuf};

/// Placeholder shipped in sample .env files; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
const ENV_FILE_NAME: &str = ".env";

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 150;

const CACHE_FILE_NAME: &str = "mac_contacts_cache.json";
const LISTS_DIR_NAME: &str = "lists";

/// On-disk layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub lists_dir: PathBuf,
    pub cache_file: PathBuf,
}

impl Paths {
    /// Lay out `lists/` and the cache file under `data_dir`.
    pub fn under<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            lists_dir: data_dir.join(LISTS_DIR_NAME),
            cache_file: data_dir.join(CACHE_FILE_NAME),
            data_dir,
        }
    }

    /// `<data_dir>/.env`, read as a fallback for the API key.
    pub fn env_file(&self) -> PathBuf {
        self.data_dir.join(ENV_FILE_NAME)
    }

    /// Resolve the data directory.
    ///
    /// Tries multiple locations in order:
    /// 1. Explicit override (`--data-dir` or PARTY_PLANNER_HOME), `~` expanded
    /// 2. Platform data dir (`~/Library/Application Support/party-planner` on macOS)
    /// 3. `./.party-planner`
    pub fn resolve(explicit: Option<&str>) -> Self {
        if let Some(dir) = explicit.filter(|d| !d.trim().is_empty()) {
            return Self::under(shellexpand::tilde(dir.trim()).into_owned());
        }

        if let Some(data) = dirs::data_dir() {
            return Self::under(data.join("party-planner"));
        }

        Self::under(".party-planner")
    }
}

/// Look up `key` in a dotenv file without touching the process environment.
///
/// A missing or malformed file reads as "not set".
pub fn env_file_value(path: &Path, key: &str) -> Option<String> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable .env file");
            return None;
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v)
        .last()
}

/// Everything the shell and commands need to know at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub paths: Paths,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl Settings {
    pub fn new(paths: Paths, api_key: Option<String>, model: Option<String>) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != PLACEHOLDER_API_KEY);
        let model = model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            paths,
            api_key,
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Whether AI drafting can be offered.
    pub fn has_ai(&self) -> bool {
        self.api_key.is_some()
    }
}

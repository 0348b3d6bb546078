//! JSON file store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::store::{Store, StoreError};
use crate::{Account, Match};

const ACCOUNTS_FILE: &str = "accounts.json";
const HISTORY_FILE: &str = "history.json";

/// Stores accounts and history as two pretty-printed JSON files in a
/// directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Creates a store rooted at `dir`. The directory is created on first
    /// write.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        info!("Creating JsonStore");
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the data files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[instrument(skip(self))]
    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(name);
        if !path.exists() {
            debug!(path = %path.display(), "No data file, starting empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| StoreError::new(format!("Failed to read '{}': {}", path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Vec<T> = serde_json::from_str(&content)
            .map_err(|e| StoreError::new(format!("Failed to parse '{}': {}", path.display(), e)))?;
        debug!(path = %path.display(), count = items.len(), "Loaded data file");
        Ok(items)
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    fn write<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{}.tmp", name));
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "Wrote data file");
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.read(ACCOUNTS_FILE)
    }

    fn save_accounts(&self, accounts: &[Account]) -> Result<(), StoreError> {
        self.write(ACCOUNTS_FILE, accounts)
    }

    fn load_history(&self) -> Result<Vec<Match>, StoreError> {
        self.read(HISTORY_FILE)
    }

    fn save_history(&self, history: &[Match]) -> Result<(), StoreError> {
        self.write(HISTORY_FILE, history)
    }
}

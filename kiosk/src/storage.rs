use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Storage keys carried over from the original kiosk profile layout.
pub const GRADIENT_KEY: &str = "customGradient";
pub const CART_KEY: &str = "cart";
pub const SELECTED_MACHINE_KEY: &str = "selectedMachine";
pub const WALLET_KEY: &str = "wallet";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode profile entry: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Named-key JSON store persisted as a single object in a single file,
/// the one-browser-profile equivalent of local storage. Every mutation
/// writes through to disk.
pub struct ProfileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl ProfileStore {
    /// Opens the store at the given path. An absent file is an empty store;
    /// the file is only created on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_owned();
        let entries = match fs::read(&path) {
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.entries
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(Into::into)
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        self.entries
            .insert(key.to_owned(), serde_json::to_value(value)?);
        self.write_through()
    }

    /// Removes a key, reporting whether it existed.
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.write_through()?;
        }
        Ok(existed)
    }

    fn write_through(&self) -> Result<(), StoreError> {
        fs::write(&self.path, serde_json::to_vec_pretty(&self.entries)?)?;
        Ok(())
    }
}

//! Flat string key-value storage, used to persist user preferences between
//! runs. Values are opaque strings; anything structured is serialized by the
//! caller.

use anyhow::Context;
use indexmap::IndexMap;
use log::{error, info};
use std::{
    cell::RefCell,
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

/// A string key-value store. Reads never fail; a missing or unreadable value
/// is just absent.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Storage backed by a single JSON object on disk. Every write re-reads the
/// file and rewrites it in full, so multiple handles to the same path see
/// each other's changes.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file. A missing file is empty; a corrupt one is logged
    /// and treated as empty.
    fn read_all(&self) -> IndexMap<String, String> {
        // Poor man's try block
        let helper = || -> anyhow::Result<IndexMap<String, String>> {
            let contents = match fs::read(&self.path) {
                Ok(contents) => contents,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Ok(IndexMap::new())
                }
                Err(err) => return Err(err.into()),
            };
            Ok(serde_json::from_slice(&contents)?)
        };
        helper().unwrap_or_else(|err| {
            error!(
                "Error loading settings from {}: {err}",
                self.path.display()
            );
            IndexMap::new()
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().shift_remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_owned(), value.to_owned());
        info!("Saving setting `{key}` = {value:?}");
        let serialized = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, serialized).with_context(|| {
            format!("Error saving settings to {}", self.path.display())
        })?;
        Ok(())
    }
}

/// In-process storage. Clones share the same underlying map, so a clone
/// behaves like another handle onto the same store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

//! Persistence layer for the HBnB console.
//!
//! Keeps every instance in memory under its `"<Class>.<id>"` key and writes
//! the whole set to a JSON file on [`FileStorage::save`]. The file is read once
//! when the store is opened.

use crate::error::{ConsoleError, Result};
use crate::models::{EntityClass, Instance};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "file.json";

/// In-memory object store backed by a JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Instance>,
}

impl FileStorage {
    /// Opens the store at the specified path, loading any persisted state.
    ///
    /// A missing file yields an empty store. A file that cannot be parsed is
    /// moved aside to `<path>.bak` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut storage = Self {
            path: path.into(),
            objects: BTreeMap::new(),
        };

        match storage.load() {
            Ok(()) => Ok(storage),
            Err(e @ ConsoleError::Io(_)) => Err(e),
            Err(e) => {
                warn!("Failed to load store: {e}. Attempting recovery...");
                storage.attempt_recovery()?;
                Ok(storage)
            }
        }
    }

    /// Returns the path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every stored instance keyed by `"<Class>.<id>"`.
    pub fn all(&self) -> &BTreeMap<String, Instance> {
        &self.objects
    }

    /// Iterates over the instances of one class.
    pub fn all_of(&self, class: EntityClass) -> impl Iterator<Item = &Instance> {
        self.objects.values().filter(move |obj| obj.class() == class)
    }

    /// Counts the stored instances of one class.
    pub fn count(&self, class: EntityClass) -> usize {
        self.all_of(class).count()
    }

    /// Adds an instance under its key.
    pub fn new_object(&mut self, instance: Instance) {
        let key = instance.key();
        debug!(%key, "adding object");
        self.objects.insert(key, instance);
    }

    /// Looks up an instance by class and id.
    pub fn get(&self, class: EntityClass, id: &str) -> Option<&Instance> {
        self.objects.get(&store_key(class, id))
    }

    /// Looks up an instance by class and id for mutation.
    pub fn get_mut(&mut self, class: EntityClass, id: &str) -> Option<&mut Instance> {
        self.objects.get_mut(&store_key(class, id))
    }

    /// Removes an instance, returning it if it was present.
    pub fn remove(&mut self, class: EntityClass, id: &str) -> Option<Instance> {
        self.objects.remove(&store_key(class, id))
    }

    /// Writes the whole store to its file.
    ///
    /// The data is written to a sibling temporary file first and then renamed
    /// over the target, so a failed write leaves the previous file intact.
    pub fn save(&self) -> Result<()> {
        ensure_parent_dirs(&self.path)?;

        let records: Map<String, Value> = self
            .objects
            .iter()
            .map(|(key, obj)| (key.clone(), obj.to_record()))
            .collect();
        let json = serde_json::to_string(&Value::Object(records))
            .map_err(|e| ConsoleError::storage(format!("Failed to serialize store: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| {
            ConsoleError::storage(format!("Failed to write {}: {e}", tmp_path.display()))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            ConsoleError::storage(format!("Failed to replace {}: {e}", self.path.display()))
        })?;

        debug!(objects = self.objects.len(), path = %self.path.display(), "store saved");
        Ok(())
    }

    /// Replaces the in-memory objects with the content of the store file.
    pub fn load(&mut self) -> Result<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No store file at {}, starting empty", self.path.display());
                self.objects.clear();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let root: Value = serde_json::from_str(&content).map_err(|e| {
            ConsoleError::storage(format!("{} is not valid JSON: {e}", self.path.display()))
        })?;
        let records = root.as_object().ok_or_else(|| {
            ConsoleError::storage(format!("{} is not a JSON object", self.path.display()))
        })?;

        let mut objects = BTreeMap::new();
        for (key, record) in records {
            let instance = Instance::from_record(record)
                .map_err(|e| ConsoleError::storage(format!("record '{key}': {e}")))?;
            objects.insert(instance.key(), instance);
        }

        info!(
            "Loaded {} objects from {}",
            objects.len(),
            self.path.display()
        );
        self.objects = objects;
        Ok(())
    }

    /// Moves a corrupt store file aside and starts with an empty store.
    fn attempt_recovery(&mut self) -> Result<()> {
        let backup_path = self.path.with_extension("json.bak");

        if self.path.exists() {
            fs::rename(&self.path, &backup_path).map_err(|e| {
                ConsoleError::storage(format!(
                    "Failed to backup corrupted store to {}: {e}",
                    backup_path.display()
                ))
            })?;
            warn!("Backed up corrupted store to {}", backup_path.display());
        }

        self.objects.clear();
        Ok(())
    }
}

/// Builds the store key for a class and id.
pub fn store_key(class: EntityClass, id: &str) -> String {
    format!("{}.{}", class.name(), id)
}

/// Ensures parent directories exist for the store path.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ConsoleError::storage(format!(
                "Failed to create store directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

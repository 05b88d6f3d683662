use std::{
    collections::HashMap,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::StorageError;

/// A string key/value store that survives restarts.
pub trait Storage {
    /// Returns the stored value, or `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// This function will return an error if the backing store could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the value stored under `key`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the backing store could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keeps every key in its own `<key>.json` file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!("Read '{key}' from {}", path.display());
                Ok(Some(value))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.into(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_error = |source| StorageError::Write {
            key: key.into(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(write_error)?;
        let path = self.path_for(key);

        // Write beside the target and rename over it so a crash never leaves a partial file.
        let tmp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp_path).map_err(write_error)?;
            file.write_all(value.as_bytes()).map_err(write_error)?;
            file.sync_all().map_err(write_error)?;
        }
        fs::rename(&tmp_path, &path).map_err(write_error)?;

        debug!("Wrote '{key}' to {}", path.display());
        Ok(())
    }
}

/// In-memory storage. Nothing outlives the value itself.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.into(), value.into());
        Ok(())
    }
}

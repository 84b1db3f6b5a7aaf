//! Atomic file operations with ACID guarantees.
//!
//! Shared by the configuration loader (TOML) and the file-backed user store
//! (JSON).

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use userauths_core::{Result, UserAuthsError};

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    fn encode<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        }
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            FileFormat::Toml => Ok(toml::from_str(content)?),
            FileFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// A handle to a file with ACID guarantees.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Consistency**: Schema validation on load/save
/// - **Isolation**: File locking prevents concurrent modifications
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Writes `data` via a temporary file and an atomic rename.
    fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.format.encode(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Replaces the file contents while holding the exclusive file lock.
    pub fn replace(&self, data: &T) -> Result<()> {
        let _lock = FileLock::acquire(&self.path)?;
        self.save(data)
    }

    /// Performs a transactional read-modify-write under the file lock.
    ///
    /// The file is re-read after the lock is taken, so `f` always sees the
    /// latest committed contents. A missing file starts from `T::default()`.
    /// Nothing is written when `f` fails.
    pub fn update<R, F>(&self, f: F) -> Result<R>
    where
        T: Default,
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or_default();
        let value = f(&mut data)?;
        self.save(&data)?;
        Ok(value)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| UserAuthsError::io(format!("{:?} has no file name", self.path)))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| UserAuthsError::io(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; removing the file is best effort
        let _ = fs::remove_file(&self.lock_path);
    }
}

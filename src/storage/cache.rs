// src/storage/cache.rs
use crate::utils::error::TransportError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use url::form_urlencoded;

/// Get-or-compute over string keys.
///
/// A hit returns the stored value without running `producer`. A miss runs
/// `producer` and stores its value only if it succeeds; errors are returned
/// as-is and nothing is cached for the key.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_or_compute<F, Fut>(&self, key: &str, producer: F) -> Result<String, TransportError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<String, TransportError>> + Send;
}

/// Process-local cache. Calls for the same key are serialized: while one
/// producer runs, other callers for that key wait for its result.
#[derive(Default)]
pub struct MemoryCache {
    cells: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, key: &str) -> Arc<OnceCell<String>> {
        // Poisoning only happens if a panic hit while holding the lock; the map is still usable.
        let mut cells = self.cells.lock().unwrap_or_else(|e| e.into_inner());
        cells.entry(key.to_string()).or_default().clone()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get_or_compute<F, Fut>(&self, key: &str, producer: F) -> Result<String, TransportError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<String, TransportError>> + Send,
    {
        let cell = self.cell(key);
        if let Some(value) = cell.get() {
            tracing::debug!("Cache hit: {}", key);
            return Ok(value.clone());
        }

        let value = cell
            .get_or_try_init(|| async move {
                tracing::debug!("Cache miss: {}", key);
                producer().await
            })
            .await?;
        Ok(value.clone())
    }
}

/// One file per key under a directory. Entries survive restarts and are
/// never expired. Concurrent misses on one key may each run the producer.
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, TransportError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(file_name_for(key))
    }
}

#[async_trait]
impl Cache for DiskCache {
    async fn get_or_compute<F, Fut>(&self, key: &str, producer: F) -> Result<String, TransportError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<String, TransportError>> + Send,
    {
        let path = self.entry_path(key);

        match tokio::fs::read_to_string(&path).await {
            Ok(value) => {
                tracing::debug!("Cache hit: {} ({})", key, path.display());
                return Ok(value);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Cache miss: {}", key);
            }
            Err(e) => return Err(e.into()),
        }

        let value = producer().await?;

        write_entry(self.dir.clone(), path, value.clone()).await?;
        tracing::debug!("Cached {} bytes under {}", value.len(), key);

        Ok(value)
    }
}

/// Writes `value` to a private temp file in `dir`, then renames it over `path`.
/// Each writer gets its own temp file, so concurrent writers never share one
/// and readers see either the old entry or a complete new one.
async fn write_entry(dir: PathBuf, path: PathBuf, value: String) -> Result<(), TransportError> {
    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(())
}

/// Maps a cache key to a file name. Form-urlencoding is injective, so
/// distinct keys never share an entry.
fn file_name_for(key: &str) -> String {
    let mut name: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
    name.push_str(".cache");
    name
}

// src/storage/mod.rs
pub mod cache;

use std::fs;
use std::path::{Path, PathBuf};
use crate::elibrary::models::ContractInfo;
use crate::utils::error::StorageError;

pub use cache::{Cache, DiskCache, MemoryCache};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves an extracted contract as `<NUMBER>.json` with an extraction timestamp.
    pub fn save_contract(&self, contract: &ContractInfo) -> Result<PathBuf, StorageError> {
        let filename = format!("{}.json", contract.number.to_uppercase().replace(['/', '\\'], "_"));
        let file_path = self.base_dir.join(filename);

        let document = serde_json::json!({
            "contract": contract,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let body = serde_json::to_string_pretty(&document)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, body)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved contract record to {}", file_path.display());

        Ok(file_path)
    }
}

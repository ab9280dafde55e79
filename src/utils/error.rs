// src/utils/error.rs
use thiserror::Error;

// Failures from the network and cache collaborators. The pipeline never
// interprets these, it only passes them up.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 503 Service Unavailable

    #[error("Could not find contractor info page for contract {0}")]
    ContractNotFound(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Cache I/O failed: {0}")]
    Cache(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Document structure mismatch: {0}")]
    Structural(String),

    #[error("could not find {0}")]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("eLibrary interaction failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

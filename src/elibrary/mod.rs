// src/elibrary/mod.rs
pub mod client;
pub mod models;

// Re-export key eLibrary types for convenience
#[allow(unused_imports)]
pub use client::{ContractSource, ElibraryClient};
#[allow(unused_imports)]
pub use models::{ContractInfo, ContractorInfo};

// src/extractors/mod.rs
pub mod anchor;
pub mod contract;
pub mod contractor;
pub mod dom;
pub mod label_table;

// Re-export key extraction entry points for convenience
pub use contract::extract_contract_info;

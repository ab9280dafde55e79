// src/elibrary/models.rs
use serde::{Deserialize, Serialize};

/// Contractor identity as listed on the eLibrary contractor info page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorInfo {
    pub name: String, // Legal name, never empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>, // Lines separated by '\n'
}

/// A schedule contract together with the contractor holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub contractor: ContractorInfo,
    pub number: String,
    pub end_date: String, // As rendered by the source, not parsed
    pub sins: Vec<String>,
}

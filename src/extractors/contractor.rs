// src/extractors/contractor.rs
use crate::elibrary::models::ContractorInfo;
use crate::extractors::label_table::LabelMap;
use crate::utils::error::ExtractError;

const NAME_LABEL: &str = "contractor";
const WEBSITE_LABEL: &str = "web address";
const DUNS_LABEL: &str = "duns";
const NAICS_LABEL: &str = "naics";
const ADDRESS_LABEL: &str = "address";

/// Builds the contractor record. Empty values count as absent; unknown labels are ignored.
pub fn contractor_from_labels(raw: &LabelMap) -> Result<ContractorInfo, ExtractError> {
    let field = |label: &str| raw.get(label).filter(|v| !v.is_empty()).cloned();

    let name = field(NAME_LABEL).ok_or(ExtractError::MissingField("contractor name"))?;

    Ok(ContractorInfo {
        name,
        website: field(WEBSITE_LABEL),
        duns: field(DUNS_LABEL),
        naics: field(NAICS_LABEL),
        address: field(ADDRESS_LABEL),
    })
}

// src/extractors/contract.rs

// --- Imports ---
use crate::elibrary::models::ContractInfo;
use crate::extractors::{anchor, contractor, dom, label_table};
use crate::utils::error::ExtractError;
use scraper::{ElementRef, Html};

// --- Layout constants ---
// Position of the sources table among its siblings.
const SOURCES_TABLE_POSITION: usize = 2;
// Row 0 is the header.
const CONTRACT_ROW_INDEX: usize = 1;
// 1-based column numbers in the contract row.
const NUMBER_COLUMN: usize = 3;
const END_DATE_COLUMN: usize = 5;
const SINS_COLUMN: usize = 6;

/// Contract columns read from the sources table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRow {
    pub number: String,
    pub end_date: String,
    pub sins: Vec<String>,
}

/// Parses a contractor info page into a [`ContractInfo`].
///
/// The page has no ids or classes to key on, so everything is found by
/// position relative to the skip-navigation anchor. Any deviation from that
/// layout is reported as an error rather than guessed around.
pub fn extract_contract_info(html: &str) -> Result<ContractInfo, ExtractError> {
    let document = Html::parse_document(html);
    let region = anchor::info_region(&document)?;

    let raw = label_table::parse_label_table(region)?;
    let contractor = contractor::contractor_from_labels(&raw)?;
    let row = parse_contract_row(region)?;

    tracing::info!(
        "Extracted contract {} for '{}' ({} SINs)",
        row.number,
        contractor.name,
        row.sins.len()
    );

    Ok(ContractInfo {
        contractor,
        number: row.number,
        end_date: row.end_date,
        sins: row.sins,
    })
}

/// Reads number, end date and SINs from the first data row of the sources table.
pub fn parse_contract_row(region: ElementRef) -> Result<ContractRow, ExtractError> {
    let sources = dom::nested_tables(region)
        .find(|t| dom::child_position(*t) == Some(SOURCES_TABLE_POSITION))
        .ok_or_else(|| {
            ExtractError::Structural(format!(
                "no sources table at position {} in info region",
                SOURCES_TABLE_POSITION
            ))
        })?;

    let rows = dom::own_rows(sources);
    let row = rows.get(CONTRACT_ROW_INDEX).copied().ok_or_else(|| {
        ExtractError::Structural(format!(
            "sources table has {} row(s), expected a contract row at index {}",
            rows.len(),
            CONTRACT_ROW_INDEX
        ))
    })?;

    let cells: Vec<ElementRef> = dom::element_children(row).collect();
    let column = |n: usize| {
        cells.get(n - 1).copied().ok_or_else(|| {
            ExtractError::Structural(format!(
                "contract row has {} column(s), missing column {}",
                cells.len(),
                n
            ))
        })
    };

    let number = dom::plain_text(column(NUMBER_COLUMN)?);
    let end_date = dom::plain_text(column(END_DATE_COLUMN)?);
    let sins = column(SINS_COLUMN)?
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| dom::is_named(*e, "a"))
        .map(dom::plain_text)
        .collect();

    Ok(ContractRow { number, end_date, sins })
}

// src/extractors/label_table.rs
use std::collections::HashMap;
use scraper::ElementRef;
use crate::extractors::dom;
use crate::utils::error::ExtractError;

/// Label text -> value text, as read from the contractor table.
pub type LabelMap = HashMap<String, String>;

/// The contractor table is the first table at position 1 nested inside
/// another table at position 1 within the info region.
pub fn find_label_table<'a>(region: ElementRef<'a>) -> Result<ElementRef<'a>, ExtractError> {
    dom::nested_tables(region)
        .find(|t| dom::child_position(*t) == Some(1) && dom::has_table_ancestor_at(*t, region, 1))
        .ok_or_else(|| {
            ExtractError::Structural(
                "no label/value table (first table inside first nested table) in info region".to_string(),
            )
        })
}

/// Reads every two-cell row of the contractor table. Duplicate labels keep the last value.
pub fn parse_label_table(region: ElementRef) -> Result<LabelMap, ExtractError> {
    let table = find_label_table(region)?;
    let mut raw = LabelMap::new();

    for row in dom::own_rows(table) {
        let mut cells = dom::element_children(row);
        let (Some(label), Some(value)) = (cells.next(), cells.next()) else {
            tracing::trace!("Skipping label row with fewer than two cells");
            continue;
        };

        let key = normalize_label(&dom::plain_text(label));
        let value = dom::text_with_breaks(value);
        tracing::trace!("Label row '{}' = '{}'", key, value);
        raw.insert(key, value);
    }

    tracing::debug!("Read {} label rows", raw.len());
    Ok(raw)
}

/// Lower-cases the label and drops its trailing separator ("Web Address:" -> "web address").
pub fn normalize_label(text: &str) -> String {
    let mut key = text.trim().to_lowercase();
    key.pop();
    key
}

// src/extractors/anchor.rs
use crate::extractors::dom;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Name of the skip-navigation target every contractor page carries once.
pub const LANDMARK_NAME: &str = "skipnavigation";

static LANDMARK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[name="skipnavigation"]"#).expect("Failed to compile LANDMARK_SELECTOR")
});

/// The single landmark anchor. Zero or several matches are a structural error.
pub fn find_landmark(document: &Html) -> Result<ElementRef<'_>, ExtractError> {
    let mut matches = document.select(&LANDMARK_SELECTOR);
    let landmark = matches.next();
    let extra = matches.count();

    match (landmark, extra) {
        (Some(landmark), 0) => Ok(landmark),
        (None, _) => Err(ExtractError::Structural(format!(
            "could not find {} target",
            LANDMARK_NAME
        ))),
        (Some(_), extra) => Err(ExtractError::Structural(format!(
            "expected exactly one {} target, found {}",
            LANDMARK_NAME,
            extra + 1
        ))),
    }
}

/// The info table: the table right after the one holding the landmark.
pub fn info_region(document: &Html) -> Result<ElementRef<'_>, ExtractError> {
    let landmark = find_landmark(document)?;

    let container = dom::closest(landmark, "table").ok_or_else(|| {
        ExtractError::Structural(format!("{} target is not inside a table", LANDMARK_NAME))
    })?;

    let region = dom::next_element_sibling(container)
        .filter(|sibling| dom::is_named(*sibling, "table"))
        .ok_or_else(|| {
            ExtractError::Structural(format!(
                "no table follows the table containing the {} target",
                LANDMARK_NAME
            ))
        })?;

    tracing::debug!("Located info region after {} landmark", LANDMARK_NAME);
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: &str = r#"<table><tr><td><a name="skipnavigation"></a></td></tr></table>"#;

    fn structural_message(result: Result<ElementRef<'_>, ExtractError>) -> String {
        match result {
            Err(ExtractError::Structural(msg)) => msg,
            other => panic!("expected structural error, got {:?}", other.map(|e| e.value().name().to_string())),
        }
    }

    #[test]
    fn region_is_next_table_sibling() {
        let html = format!("<body>{NAV}\n<!-- info -->\n<table id=info><tr><td>x</td></tr></table></body>");
        let doc = Html::parse_document(&html);
        let region = info_region(&doc).unwrap();
        assert_eq!(region.value().id(), Some("info"));
    }

    #[test]
    fn missing_landmark_fails() {
        let doc = Html::parse_document("<table></table><table></table>");
        let msg = structural_message(info_region(&doc));
        assert!(msg.contains("skipnavigation"), "{msg}");
    }

    #[test]
    fn duplicate_landmark_fails() {
        let html = format!("<body>{NAV}{NAV}<table></table></body>");
        let doc = Html::parse_document(&html);
        let msg = structural_message(find_landmark(&doc));
        assert!(msg.contains("found 2"), "{msg}");
    }

    #[test]
    fn non_table_sibling_fails() {
        let html = format!("<body>{NAV}<div>not a table</div><table></table></body>");
        let doc = Html::parse_document(&html);
        structural_message(info_region(&doc));
    }

    #[test]
    fn landmark_outside_table_fails() {
        let doc = Html::parse_document(r#"<body><a name="skipnavigation"></a><table></table></body>"#);
        let msg = structural_message(info_region(&doc));
        assert!(msg.contains("not inside a table"), "{msg}");
    }
}

// src/utils/html_debug.rs
use std::fs;
use std::path::Path;
use regex::Regex;
use crate::utils::error::AppError;

/// Patterns marking the structure the extractors depend on.
pub const LAYOUT_PATTERNS: &[(&str, &str)] = &[
    (r#"(?i)<a[^>]*name=["']?skipnavigation["']?[^>]*>"#, "landmark"),
    (r"(?i)<table\b[^>]*>", "table"),
    (r"(?i)<tr\b[^>]*>", "row"),
];

/// Wraps each highlighted byte range of `html` in a marker span.
/// Ranges overlapping an earlier range are dropped.
pub fn annotate_html(html: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-landmark { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-table { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-row { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    let mut last_pos = 0;
    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos || end > html.len() {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match highlight_type {
            "landmark" => "highlight-landmark",
            "table" => "highlight-table",
            "row" => "highlight-row",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type
        ));
        // Escaped so the marked tag shows up as text instead of rendering.
        debug_html.push_str(&escape(&html[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }
    debug_html.push_str(&html[last_pos..]);
    debug_html.push_str("\n</body>\n</html>");
    debug_html
}

/// Creates a debug version of an HTML document with locations of specified regex patterns highlighted
pub fn create_debug_html(html: &str, path: &Path, patterns: &[(&str, &str)]) -> Result<(), AppError> {
    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, annotate_html(html, &highlights))?;

    tracing::info!("Saved debug HTML to {}", path.display());
    Ok(())
}

fn escape(fragment: &str) -> String {
    fragment.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

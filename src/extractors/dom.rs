// src/extractors/dom.rs
//! Read-only helpers over the parsed document tree.
//!
//! Positions follow CSS `:nth-child` numbering: 1-based, counted over the
//! parent's element children only.

use scraper::{node::Node, ElementRef};

pub fn element_children<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

pub fn is_named(el: ElementRef, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// 1-based position of `el` among its parent's element children.
pub fn child_position(el: ElementRef) -> Option<usize> {
    let parent = el.parent()?;
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .position(|sibling| sibling.id() == el.id())
        .map(|i| i + 1)
}

/// Nearest ancestor-or-self element with the given tag name.
pub fn closest<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    if is_named(el, name) {
        return Some(el);
    }
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| is_named(*a, name))
}

/// First element sibling after `el`, skipping text and comments.
pub fn next_element_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Tables strictly inside `region`, in document order.
pub fn nested_tables<'a>(region: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    region
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|e| is_named(*e, "table"))
}

/// Whether some table between `el` and `region` (both exclusive) sits at `position`.
pub fn has_table_ancestor_at(el: ElementRef, region: ElementRef, position: usize) -> bool {
    el.ancestors()
        .take_while(|a| a.id() != region.id())
        .filter_map(ElementRef::wrap)
        .any(|a| is_named(a, "table") && child_position(a) == Some(position))
}

/// Rows belonging to `table` itself; rows of tables nested in its cells are excluded.
pub fn own_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|e| is_named(*e, "tr"))
        .filter(|row| closest(*row, "table").map(|t| t.id()) == Some(table.id()))
        .collect()
}

/// Concatenated descendant text, trimmed.
pub fn plain_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Like [`plain_text`] but renders every `<br>` as `\n`.
pub fn text_with_breaks(el: ElementRef) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(e) if e.name().eq_ignore_ascii_case("br") => out.push('\n'),
            _ => {}
        }
    }
    out.trim().to_string()
}

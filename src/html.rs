//! HTML rendering and lookup helpers

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::fmt::Write;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Parse HTML leniently and pretty-print it, one node per line.
///
/// Children are indented one space deeper than their parent, text nodes are
/// trimmed and re-escaped, whitespace-only text is dropped. Returns `None`
/// when there is no markup to render.
#[must_use]
pub fn render_html(markup: &str) -> Option<String> {
    if markup.trim().is_empty() {
        return None;
    }

    let document = Html::parse_document(markup);
    let mut out = String::with_capacity(markup.len());

    for child in document.tree.root().children() {
        if let Some(element) = ElementRef::wrap(child) {
            write_element(element, 0, &mut out);
        } else if let Node::Doctype(doctype) = child.value() {
            let _ = writeln!(out, "<!DOCTYPE {}>", doctype.name());
        }
    }

    Some(out)
}

fn write_element(element: ElementRef<'_>, depth: usize, out: &mut String) {
    let indent = " ".repeat(depth);
    let name = element.value().name();

    let _ = write!(out, "{indent}<{name}");
    for (key, value) in element.value().attrs() {
        let _ = write!(out, " {key}=\"{}\"", escape_attribute(value));
    }
    out.push_str(">\n");

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            write_element(child_element, depth + 1, out);
        } else if let Node::Text(text) = child.value() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                let _ = writeln!(out, "{indent} {}", escape_text(trimmed));
            }
        }
    }

    let _ = writeln!(out, "{indent}</{name}>");
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Resolve HTML entities in a text snippet
#[must_use]
pub fn unescape(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect()
}

/// Text of the first `<td>` whose string content matches `pattern`.
///
/// A cell's string is the text it holds once whitespace-only nodes are
/// ignored, following single-child elements down to their text. Cells with
/// mixed content have no string and are skipped.
#[must_use]
pub fn first_matching_cell(document: &Html, pattern: &Regex) -> Option<String> {
    let selector = Selector::parse("td").ok()?;

    document
        .select(&selector)
        .filter_map(cell_string)
        .find(|text| pattern.is_match(text))
}

fn cell_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children().filter(|child| match child.value() {
        Node::Text(text) => !text.trim().is_empty(),
        Node::Element(_) => true,
        _ => false,
    });

    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match only.value() {
        Node::Text(text) => Some(text.trim().to_string()),
        _ => ElementRef::wrap(only).and_then(cell_string),
    }
}

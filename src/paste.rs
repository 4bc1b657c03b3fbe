//! Normalization of content pasted from word processors.
//!
//! Word's clipboard HTML expresses outline structure through styling
//! hints instead of nesting: every list entry is a flat `MsoListParagraph`
//! with its level buried in an `mso-list` token or an inline left margin,
//! and the visible "number" is literal marker text. The transform here
//! detects that markup, infers a level per paragraph, strips the marker
//! and vendor styling, and rebuilds a properly nested `<ol>` tree so the
//! structural model and counter rules take over the numbering. Anything
//! that does not look like Word output passes through untouched.

use std::sync::LazyLock;

use log::debug;
use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;

use crate::html::{attr_value, body_children, escape, parse_dom, tag_lower, text_content};

const WORD_FINGERPRINTS: [&str; 5] = [
    "urn:schemas-microsoft-com:office:word",
    "xmlns:w=",
    "mso-",
    "MsoNormal",
    "MsoListParagraph",
];

/// Word indents each outline level by about 36pt (1.27cm). Empirical,
/// validated against captured clipboard output; tune here if a Word
/// build deviates.
const WORD_POINTS_PER_LEVEL: f64 = 36.0;

static MSO_LIST_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"mso-list:\s*l\d+\s+level(\d+)\s+lfo\d+").unwrap());

static MARGIN_LEFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"margin-left:\s*([\d.]+)\s*(pt|cm|in|em|px)").unwrap());

pub fn is_word_html(html: &str) -> bool {
    WORD_FINGERPRINTS.iter().any(|f| html.contains(f))
}

/// The paste transform hook: a pure function from raw clipboard markup
/// to normalized markup. Non-Word input is returned unchanged.
pub fn transform_pasted_html(html: &str) -> String {
    if !is_word_html(html) {
        return html.to_string();
    }
    transform_word_html(html)
}

// ============================================================================
// Level inference
// ============================================================================

/// Outline level of a Word list paragraph, when it carries one. The
/// `mso-list` style token is authoritative; `MsoListParagraph` elements
/// without it fall back to the inline left margin, converted to points
/// and divided by the per-level indent width.
fn word_list_level(node: &Handle) -> Option<u8> {
    let style = attr_value(node, "style").unwrap_or_default();
    if let Some(caps) = MSO_LIST_LEVEL.captures(&style) {
        return caps[1].parse().ok();
    }

    let class = attr_value(node, "class").unwrap_or_default();
    if class.contains("MsoListParagraph") || class.contains("MsoList") {
        if let Some(caps) = MARGIN_LEFT.captures(&style) {
            let value: f64 = caps[1].parse().ok()?;
            let points = match &caps[2] {
                "cm" => value * 28.35,
                "in" => value * 72.0,
                "em" => value * 12.0,
                "px" => value * 0.75,
                _ => value,
            };
            let level = (points / WORD_POINTS_PER_LEVEL).round() as i64;
            return Some(level.clamp(1, u8::MAX as i64) as u8);
        }
        return Some(1);
    }

    None
}

// ============================================================================
// Cleaning
// ============================================================================

const STRIPPED_STYLE_PREFIXES: [&str; 6] = [
    "mso-",
    "tab-stops",
    "text-indent",
    "margin-left",
    "margin-bottom",
    "line-height",
];

fn clean_style(style: &str) -> Option<String> {
    let cleaned: Vec<&str> = style
        .split(';')
        .map(str::trim)
        .filter(|prop| {
            if prop.is_empty() {
                return false;
            }
            let lower = prop.to_ascii_lowercase();
            !STRIPPED_STYLE_PREFIXES
                .iter()
                .any(|prefix| lower.starts_with(prefix))
        })
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join("; "))
    }
}

fn clean_class(class: &str) -> Option<String> {
    let cleaned: Vec<&str> = class
        .split_whitespace()
        .filter(|token| {
            !token.starts_with("Mso") && !token.starts_with("mso") && !token.contains("ListParagraph")
        })
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(" "))
    }
}

/// Marker spans Word injects in front of the real text: `mso-list:Ignore`
/// runs and the empty `font:`-styled spacers that follow them.
fn is_marker_span(node: &Handle) -> bool {
    if tag_lower(node).as_deref() != Some("span") {
        return false;
    }
    let style = attr_value(node, "style").unwrap_or_default();
    if style.contains("mso-list") && style.contains("Ignore") {
        return true;
    }
    let has_element_children = node
        .children
        .borrow()
        .iter()
        .any(|child| matches!(child.data, NodeData::Element { .. }));
    !has_element_children && text_content(node).trim().is_empty() && style.contains("font:")
}

fn is_marker_comment(contents: &str) -> bool {
    contents.contains("supportLists") || contents.contains("endif")
}

const VOID_TAGS: [&str; 7] = ["br", "hr", "img", "meta", "link", "col", "input"];

/// Serialize a node while scrubbing Word artifacts: marker spans and
/// conditional comments vanish, `o:`/`v:`/`w:` vendor tags are unwrapped
/// (`o:p` dropped outright), style and class attributes are rewritten via
/// the strip lists, `lang` attributes are removed. Everything else —
/// including user-meaningful styling — survives.
fn emit_clean(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&escape(&contents.borrow())),
        NodeData::Comment { contents } => {
            let contents: &str = contents;
            if is_marker_comment(contents) {
                return;
            }
            out.push_str("<!--");
            out.push_str(contents);
            out.push_str("-->");
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string().to_ascii_lowercase();

            if let Some((prefix, _)) = tag.split_once(':') {
                if tag == "o:p" {
                    return;
                }
                if matches!(prefix, "o" | "v" | "w") {
                    for child in node.children.borrow().iter() {
                        emit_clean(child, out);
                    }
                    return;
                }
            }
            if is_marker_span(node) {
                return;
            }

            out.push('<');
            out.push_str(&tag);
            for attr in attrs.borrow().iter() {
                let key = attr.name.local.to_string().to_ascii_lowercase();
                let value = match key.as_str() {
                    "lang" | "xml:lang" => continue,
                    "style" => match clean_style(&attr.value) {
                        Some(style) => style,
                        None => continue,
                    },
                    "class" => match clean_class(&attr.value) {
                        Some(class) => class,
                        None => continue,
                    },
                    _ => attr.value.to_string(),
                };
                out.push(' ');
                out.push_str(&key);
                out.push_str("=\"");
                out.push_str(&escape(&value));
                out.push('"');
            }
            out.push('>');
            if VOID_TAGS.contains(&tag.as_str()) {
                return;
            }
            for child in node.children.borrow().iter() {
                emit_clean(child, out);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        _ => {}
    }
}

fn clean_inner_html(node: &Handle) -> String {
    let mut out = String::new();
    for child in node.children.borrow().iter() {
        emit_clean(child, &mut out);
    }
    out.trim().to_string()
}

// ============================================================================
// List reconstruction
// ============================================================================

struct ListEntry {
    level: u8,
    content: String,
}

#[derive(Default)]
struct OlNode {
    items: Vec<LiNode>,
}

#[derive(Default)]
struct LiNode {
    content: String,
    nested: Option<OlNode>,
}

/// Rebuild a nested list from the flat (level, content) run. A stack of
/// open lists tracks the current depth: a deeper entry opens intermediate
/// levels (with a placeholder item when the parent list is empty), a
/// shallower one pops back, an equal one appends.
fn build_nested_list(entries: &[ListEntry]) -> OlNode {
    let mut stack: Vec<OlNode> = vec![OlNode::default()];

    for entry in entries {
        let target = entry.level.max(1) as usize;
        while stack.len() > target {
            let done = stack.pop().unwrap_or_default();
            if let Some(parent) = stack.last_mut() {
                attach_nested(parent, done);
            }
        }
        while stack.len() < target {
            stack.push(OlNode::default());
        }
        if let Some(open) = stack.last_mut() {
            open.items.push(LiNode {
                content: entry.content.clone(),
                nested: None,
            });
        }
    }

    while stack.len() > 1 {
        let done = stack.pop().unwrap_or_default();
        if let Some(parent) = stack.last_mut() {
            attach_nested(parent, done);
        }
    }
    stack.pop().unwrap_or_default()
}

fn attach_nested(parent: &mut OlNode, child: OlNode) {
    if child.items.is_empty() {
        return;
    }
    if parent.items.is_empty() {
        parent.items.push(LiNode::default());
    }
    let Some(last) = parent.items.last_mut() else {
        return;
    };
    match &mut last.nested {
        Some(existing) => existing.items.extend(child.items),
        None => last.nested = Some(child),
    }
}

fn emit_list(list: &OlNode, out: &mut String) {
    out.push_str("<ol>");
    for item in &list.items {
        out.push_str("<li>");
        if !item.content.is_empty() {
            out.push_str("<p>");
            out.push_str(&item.content);
            out.push_str("</p>");
        }
        if let Some(nested) = &item.nested {
            emit_list(nested, out);
        }
        out.push_str("</li>");
    }
    out.push_str("</ol>");
}

// ============================================================================
// Pipeline
// ============================================================================

fn flush_segment(entries: &mut Vec<ListEntry>, out: &mut String) {
    if entries.is_empty() {
        return;
    }
    debug!("word paste: rebuilding list segment of {} entries", entries.len());
    let list = build_nested_list(entries);
    emit_list(&list, out);
    entries.clear();
}

fn transform_word_html(html: &str) -> String {
    let dom = parse_dom(html);
    let children = body_children(&dom);

    let mut out = String::new();
    let mut entries: Vec<ListEntry> = Vec::new();

    for child in &children {
        if let NodeData::Text { contents } = &child.data {
            // whitespace between Word paragraphs neither breaks a segment
            // nor survives the rebuild
            if contents.borrow().trim().is_empty() {
                continue;
            }
        }
        match word_list_level(child) {
            Some(level) => {
                entries.push(ListEntry {
                    level,
                    content: clean_inner_html(child),
                });
            }
            None => {
                flush_segment(&mut entries, &mut out);
                emit_clean(child, &mut out);
            }
        }
    }
    flush_segment(&mut entries, &mut out);

    out
}

#[cfg(test)]
#[path = "paste_tests.rs"]
mod paste_tests;

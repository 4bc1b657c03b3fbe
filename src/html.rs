//! HTML serialization of the document model.
//!
//! The writer emits the same markup an editor surface would hold:
//! `<ol>`/`<li>` for lists, with `data-restart-numbering="true"` present
//! only on flagged lists so the attribute round-trips through HTML the
//! same way it does through JSON. The reader ingests that markup back
//! into the typed tree; it is also how normalized paste output enters
//! the document. Unknown elements degrade to their content rather than
//! erroring.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::document::{
    Block, Document, HeadingAttrs, Inline, LinkAttrs, ListAttrs, ListItem, Mark,
};

// ============================================================================
// Writer
// ============================================================================

pub fn to_html(document: &Document) -> String {
    blocks_to_html(&document.content)
}

pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph { content } => {
            out.push_str("<p>");
            write_inlines(out, content);
            out.push_str("</p>");
        }
        Block::Heading { attrs, content } => {
            let level = attrs.level.clamp(1, 6);
            out.push_str(&format!("<h{level}>"));
            write_inlines(out, content);
            out.push_str(&format!("</h{level}>"));
        }
        Block::Blockquote { content } => {
            out.push_str("<blockquote>");
            for child in content {
                write_block(out, child);
            }
            out.push_str("</blockquote>");
        }
        Block::HorizontalRule => out.push_str("<hr>"),
        Block::OrderedList { attrs, content } => {
            if attrs.restart_numbering {
                out.push_str("<ol data-restart-numbering=\"true\">");
            } else {
                out.push_str("<ol>");
            }
            for item in content {
                out.push_str("<li>");
                for child in &item.content {
                    write_block(out, child);
                }
                out.push_str("</li>");
            }
            out.push_str("</ol>");
        }
    }
}

fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        write_inline(out, inline);
    }
}

fn write_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::HardBreak => out.push_str("<br>"),
        Inline::Text { marks, text } => {
            let mut close = Vec::new();
            for mark in marks {
                match mark {
                    Mark::Link { attrs } => {
                        out.push_str(&format!("<a href=\"{}\">", escape(&attrs.href)));
                        close.push("</a>");
                    }
                    Mark::Bold => {
                        out.push_str("<strong>");
                        close.push("</strong>");
                    }
                    Mark::Italic => {
                        out.push_str("<em>");
                        close.push("</em>");
                    }
                    Mark::Underline => {
                        out.push_str("<u>");
                        close.push("</u>");
                    }
                }
            }
            out.push_str(&escape(text));
            for tag in close.into_iter().rev() {
                out.push_str(tag);
            }
        }
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

// ============================================================================
// DOM helpers (shared with the paste normalizer)
// ============================================================================

pub(crate) fn parse_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

pub(crate) fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

pub(crate) fn attr_value(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.to_string().eq_ignore_ascii_case(attr_name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub(crate) fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Children of the `<body>` element the parser always provides, whether
/// the input was a fragment or a full document.
pub(crate) fn body_children(dom: &RcDom) -> Vec<Handle> {
    fn find_body(node: &Handle) -> Option<Handle> {
        if tag_lower(node).as_deref() == Some("body") {
            return Some(node.clone());
        }
        for child in node.children.borrow().iter() {
            if let Some(body) = find_body(child) {
                return Some(body);
            }
        }
        None
    }
    match find_body(&dom.document) {
        Some(body) => body.children.borrow().iter().cloned().collect(),
        None => dom.document.children.borrow().iter().cloned().collect(),
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Parse an HTML fragment into blocks of the document model.
pub fn parse_blocks(html: &str) -> Vec<Block> {
    let dom = parse_dom(html);
    collect_blocks(&body_children(&dom))
}

pub fn parse_document_html(html: &str) -> Document {
    Document::from_blocks(parse_blocks(html))
}

fn collect_blocks(nodes: &[Handle]) -> Vec<Block> {
    let mut out = Vec::new();
    let mut pending_inlines: Vec<Inline> = Vec::new();

    for node in nodes {
        match &node.data {
            NodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !text.trim().is_empty() {
                    pending_inlines.push(Inline::text(text.trim()));
                }
            }
            NodeData::Element { .. } => {
                let name = tag_lower(node).unwrap_or_default();
                if is_inline_tag(&name) {
                    collect_inlines(node, &mut Vec::new(), &mut pending_inlines);
                    continue;
                }
                flush_paragraph(&mut pending_inlines, &mut out);
                if let Some(block) = block_from_element(node, &name) {
                    out.push(block);
                } else {
                    // unknown container: degrade to its content
                    out.extend(collect_blocks(
                        &node.children.borrow().iter().cloned().collect::<Vec<_>>(),
                    ));
                }
            }
            _ => {}
        }
    }
    flush_paragraph(&mut pending_inlines, &mut out);
    out
}

fn flush_paragraph(pending: &mut Vec<Inline>, out: &mut Vec<Block>) {
    if !pending.is_empty() {
        out.push(Block::Paragraph {
            content: std::mem::take(pending),
        });
    }
}

fn block_from_element(node: &Handle, name: &str) -> Option<Block> {
    match name {
        "p" => Some(Block::Paragraph {
            content: inline_children(node),
        }),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(Block::Heading {
            attrs: HeadingAttrs {
                level: name[1..].parse().unwrap_or(1),
            },
            content: inline_children(node),
        }),
        "blockquote" => Some(Block::Blockquote {
            content: collect_blocks(
                &node.children.borrow().iter().cloned().collect::<Vec<_>>(),
            ),
        }),
        "hr" => Some(Block::HorizontalRule),
        "ol" => {
            let restart = attr_value(node, "data-restart-numbering").as_deref() == Some("true");
            let mut items = Vec::new();
            for child in node.children.borrow().iter() {
                if tag_lower(child).as_deref() == Some("li") {
                    items.push(ListItem::from_blocks(collect_blocks(
                        &child.children.borrow().iter().cloned().collect::<Vec<_>>(),
                    )));
                }
            }
            Some(Block::OrderedList {
                attrs: ListAttrs {
                    restart_numbering: restart,
                },
                content: items,
            })
        }
        _ => None,
    }
}

fn is_inline_tag(name: &str) -> bool {
    matches!(
        name,
        "a" | "b" | "strong" | "i" | "em" | "u" | "span" | "br" | "code" | "s" | "sub" | "sup"
    )
}

fn inline_children(node: &Handle) -> Vec<Inline> {
    let mut out = Vec::new();
    for child in node.children.borrow().iter() {
        collect_inlines(child, &mut Vec::new(), &mut out);
    }
    out
}

fn collect_inlines(node: &Handle, marks: &mut Vec<Mark>, out: &mut Vec<Inline>) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.is_empty() {
                out.push(Inline::styled(&text, marks.clone()));
            }
        }
        NodeData::Element { .. } => {
            let name = tag_lower(node).unwrap_or_default();
            if name == "br" {
                out.push(Inline::HardBreak);
                return;
            }
            let mark = match name.as_str() {
                "b" | "strong" => Some(Mark::Bold),
                "i" | "em" => Some(Mark::Italic),
                "u" => Some(Mark::Underline),
                "a" => attr_value(node, "href").map(|href| Mark::Link {
                    attrs: LinkAttrs { href },
                }),
                _ => None,
            };
            let pushed = if let Some(mark) = mark {
                if marks.contains(&mark) {
                    false
                } else {
                    marks.push(mark);
                    true
                }
            } else {
                false
            };
            for child in node.children.borrow().iter() {
                collect_inlines(child, marks, out);
            }
            if pushed {
                marks.pop();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod html_tests;

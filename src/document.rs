//! The structured document model.
//!
//! Nodes follow the JSON shape produced by ProseMirror-style editors:
//! every node is tagged with a `type` field, block nodes carry their
//! children in `content`, and attributes live under `attrs`. An
//! `OrderedList` can only contain `ListItem` children, so a malformed
//! list is a deserialization error and never reaches the numbering
//! engine. Nesting depth is derived from ancestor count and is never
//! stored on a node.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Node-kind tags that appear as the `type` field of the corresponding
/// JSON objects. Deserializing a node under a wrong tag is an error, so
/// a list with non-item children never constructs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum DocTag {
    #[default]
    #[serde(rename = "doc")]
    Doc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum ListItemTag {
    #[default]
    #[serde(rename = "listItem")]
    ListItem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    kind: DocTag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(content: Vec<Block>) -> Self {
        Self {
            kind: DocTag::Doc,
            content,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Inline>,
    },
    Blockquote {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Block>,
    },
    HorizontalRule,
    OrderedList {
        #[serde(default, skip_serializing_if = "ListAttrs::is_default")]
        attrs: ListAttrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<ListItem>,
    },
}

impl Block {
    pub fn paragraph(text: &str) -> Self {
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Inline::text(text)]
        };
        Self::Paragraph { content }
    }

    pub fn ordered_list(items: Vec<ListItem>) -> Self {
        Self::OrderedList {
            attrs: ListAttrs::default(),
            content: items,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::OrderedList { .. })
    }
}

/// Attributes carried by an `OrderedList` node. `restartNumbering` is
/// serialized only when set, so an untouched list round-trips without
/// an `attrs` object at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAttrs {
    #[serde(
        rename = "restartNumbering",
        default,
        skip_serializing_if = "is_false"
    )]
    pub restart_numbering: bool,
}

impl ListAttrs {
    pub fn is_default(&self) -> bool {
        !self.restart_numbering
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(rename = "type")]
    kind: ListItemTag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Block>,
}

impl ListItem {
    pub fn from_blocks(content: Vec<Block>) -> Self {
        Self {
            kind: ListItemTag::ListItem,
            content,
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self::from_blocks(vec![Block::paragraph(text)])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
        text: String,
    },
    HardBreak,
}

impl Inline {
    pub fn text(text: &str) -> Self {
        Self::Text {
            marks: Vec::new(),
            text: text.to_string(),
        }
    }

    pub fn styled(text: &str, marks: Vec<Mark>) -> Self {
        Self::Text {
            marks,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Link { attrs: LinkAttrs },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

// ============================================================================
// Paths
// ============================================================================

/// Address of a block inside the tree. A step either indexes the document
/// root, descends into a blockquote child, or descends into a list item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockPath {
    steps: Vec<PathStep>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStep {
    Root(usize),
    Child(usize),
    Item {
        item_index: usize,
        block_index: usize,
    },
}

impl BlockPath {
    pub fn new_root(idx: usize) -> Self {
        Self {
            steps: vec![PathStep::Root(idx)],
        }
    }

    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub fn push_child(&mut self, idx: usize) {
        self.steps.push(PathStep::Child(idx));
    }

    pub fn push_item(&mut self, item_index: usize, block_index: usize) {
        self.steps.push(PathStep::Item {
            item_index,
            block_index,
        });
    }

    pub fn pop(&mut self) {
        self.steps.pop();
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.steps.len() <= 1 {
            return None;
        }
        Some(Self {
            steps: self.steps[..self.steps.len() - 1].to_vec(),
        })
    }
}

pub fn block_ref<'a>(document: &'a Document, path: &BlockPath) -> Option<&'a Block> {
    let mut iter = path.steps().iter();
    let mut block = match iter.next()? {
        PathStep::Root(idx) => document.content.get(*idx)?,
        _ => return None,
    };
    for step in iter {
        block = match step {
            PathStep::Child(idx) => {
                let Block::Blockquote { content } = block else {
                    return None;
                };
                content.get(*idx)?
            }
            PathStep::Item {
                item_index,
                block_index,
            } => {
                let Block::OrderedList { content, .. } = block else {
                    return None;
                };
                content.get(*item_index)?.content.get(*block_index)?
            }
            PathStep::Root(_) => return None,
        };
    }
    Some(block)
}

pub(crate) fn block_mut<'a>(document: &'a mut Document, path: &BlockPath) -> Option<&'a mut Block> {
    let mut iter = path.steps().iter();
    let mut block = match iter.next()? {
        PathStep::Root(idx) => document.content.get_mut(*idx)?,
        _ => return None,
    };
    for step in iter {
        block = match step {
            PathStep::Child(idx) => {
                let Block::Blockquote { content } = block else {
                    return None;
                };
                content.get_mut(*idx)?
            }
            PathStep::Item {
                item_index,
                block_index,
            } => {
                let Block::OrderedList { content, .. } = block else {
                    return None;
                };
                content.get_mut(*item_index)?.content.get_mut(*block_index)?
            }
            PathStep::Root(_) => return None,
        };
    }
    Some(block)
}

/// Nesting depth of the innermost ordered list containing the block at
/// this path. `None` when the path does not cross any list.
pub fn list_depth_at(path: &BlockPath) -> Option<u8> {
    let count = path
        .steps()
        .iter()
        .filter(|step| matches!(step, PathStep::Item { .. }))
        .count();
    if count == 0 { None } else { Some(count as u8) }
}

/// Unstyled text of a block's own inline content. Lists contribute
/// nothing; their items are addressed individually.
pub fn block_plain_text(block: &Block) -> String {
    match block {
        Block::Paragraph { content } | Block::Heading { content, .. } => content
            .iter()
            .map(|inline| match inline {
                Inline::Text { text, .. } => text.as_str(),
                Inline::HardBreak => " ",
            })
            .collect(),
        Block::Blockquote { content } => content
            .iter()
            .map(block_plain_text)
            .collect::<Vec<_>>()
            .join(" "),
        Block::HorizontalRule | Block::OrderedList { .. } => String::new(),
    }
}

// ============================================================================
// Emptiness
// ============================================================================

pub(crate) fn inline_is_empty(inline: &Inline) -> bool {
    match inline {
        Inline::Text { text, .. } => text.is_empty(),
        Inline::HardBreak => false,
    }
}

pub(crate) fn block_is_empty(block: &Block) -> bool {
    match block {
        Block::Paragraph { content } | Block::Heading { content, .. } => {
            content.iter().all(inline_is_empty)
        }
        Block::Blockquote { content } => content.iter().all(block_is_empty),
        Block::HorizontalRule => false,
        Block::OrderedList { content, .. } => content.iter().all(list_item_is_empty),
    }
}

pub(crate) fn list_item_is_empty(item: &ListItem) -> bool {
    item.content.iter().all(block_is_empty)
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;

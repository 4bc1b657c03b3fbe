//! The editing handle.
//!
//! `DocumentEditor` owns the document tree and applies every mutation
//! synchronously; callers that need programmatic access receive the
//! handle from the constructor instead of reaching for a global. The
//! commands here mirror the boundary an editing surface needs: list
//! toggling, the restart-numbering attribute, the advance-key rule and
//! the paste hook. Numbering itself is never stored — it is derived on
//! demand from the tree.

use crate::document::{
    Block, BlockPath, Document, DocumentError, ListAttrs, PathStep, block_ref, list_item_is_empty,
};
use crate::html;
use crate::numbering::{self, NumberedItem};
use crate::paste;

mod structure;

use structure::{
    ensure_document_initialized, indent_item, insert_block_after, item_context, outdent_item,
    split_list_at_item, split_list_item, unwrap_list, wrap_block_in_list,
};

pub struct DocumentEditor {
    document: Document,
    cursor: BlockPath,
}

impl DocumentEditor {
    pub fn new(mut document: Document) -> Self {
        ensure_document_initialized(&mut document);
        Self {
            document,
            cursor: BlockPath::new_root(0),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(Self::new(Document::from_json(json)?))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn cursor(&self) -> &BlockPath {
        &self.cursor
    }

    /// Move the cursor to `path`. Fails when the path resolves to nothing.
    pub fn select(&mut self, path: BlockPath) -> bool {
        if block_ref(&self.document, &path).is_none() {
            return false;
        }
        self.cursor = path;
        true
    }

    pub fn set_content(&mut self, mut document: Document) {
        ensure_document_initialized(&mut document);
        self.document = document;
        self.cursor = BlockPath::new_root(0);
    }

    pub fn set_content_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let document = Document::from_json(json)?;
        self.set_content(document);
        Ok(())
    }

    pub fn get_json(&self) -> Result<String, DocumentError> {
        self.document.to_json()
    }

    pub fn get_html(&self) -> String {
        html::to_html(&self.document)
    }

    /// Current ordinal assignment for every list item, in document order.
    pub fn ordinals(&self) -> Vec<NumberedItem> {
        numbering::compute_ordinals(&self.document)
    }

    // ========================================================================
    // List attributes
    // ========================================================================

    pub fn in_ordered_list(&self) -> bool {
        item_context(&self.cursor).is_some()
    }

    fn current_list_path(&self) -> Option<BlockPath> {
        item_context(&self.cursor).map(|ctx| ctx.list_path)
    }

    /// Attributes of the innermost list containing the cursor.
    pub fn list_attributes(&self) -> Option<ListAttrs> {
        let path = self.current_list_path()?;
        match block_ref(&self.document, &path)? {
            Block::OrderedList { attrs, .. } => Some(*attrs),
            _ => None,
        }
    }

    pub fn update_list_attributes(&mut self, attrs: ListAttrs) -> bool {
        let Some(path) = self.current_list_path() else {
            return false;
        };
        let Some((current, _)) = structure::list_parts_mut(&mut self.document, &path) else {
            return false;
        };
        *current = attrs;
        true
    }

    pub fn reset_list_attribute(&mut self, key: &str) -> bool {
        match key {
            "restartNumbering" => self.update_list_attributes(ListAttrs::default()),
            _ => false,
        }
    }

    /// Flip the restart flag of the innermost list at the cursor. Only
    /// active while the selection is inside an ordered list.
    pub fn toggle_restart_numbering(&mut self) -> bool {
        let Some(attrs) = self.list_attributes() else {
            return false;
        };
        self.update_list_attributes(ListAttrs {
            restart_numbering: !attrs.restart_numbering,
        })
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Wrap the cursor block into a fresh ordered list, or unwrap the
    /// innermost list when the cursor already sits in one. A fresh list
    /// continues the running count of earlier same-depth lists.
    pub fn toggle_ordered_list(&mut self) -> bool {
        if let Some(ctx) = item_context(&self.cursor) {
            let Some(cursor) = unwrap_list(&mut self.document, &ctx.list_path) else {
                return false;
            };
            self.cursor = cursor;
            return true;
        }
        match block_ref(&self.document, &self.cursor) {
            Some(Block::Paragraph { .. } | Block::Heading { .. }) => {
                let Some(cursor) = wrap_block_in_list(&mut self.document, &self.cursor) else {
                    return false;
                };
                self.cursor = cursor;
                true
            }
            _ => false,
        }
    }

    /// The advance-key rule. In a non-empty list item: a new sibling item.
    /// In an empty one: leave the list, placing a plain paragraph at the
    /// list's own level (the list splits when items remain on both sides,
    /// and the part after the split continues the numbering). Outside a
    /// list: a plain new paragraph.
    pub fn advance(&mut self) -> bool {
        if let Some(ctx) = item_context(&self.cursor) {
            let item_empty = match block_ref(&self.document, &ctx.list_path) {
                Some(Block::OrderedList { content, .. }) => {
                    content.get(ctx.item_index).is_some_and(list_item_is_empty)
                }
                _ => false,
            };
            let cursor = if item_empty {
                split_list_at_item(
                    &mut self.document,
                    &ctx.list_path,
                    ctx.item_index,
                    vec![Block::paragraph("")],
                )
            } else {
                split_list_item(&mut self.document, &ctx)
            };
            let Some(cursor) = cursor else {
                return false;
            };
            self.cursor = cursor;
            return true;
        }
        let Some(cursor) =
            insert_block_after(&mut self.document, &self.cursor, Block::paragraph(""))
        else {
            return false;
        };
        self.cursor = cursor;
        true
    }

    /// Sink the current item one level deeper (Tab in the original keymap).
    pub fn indent_list_item(&mut self) -> bool {
        let Some(ctx) = item_context(&self.cursor) else {
            return false;
        };
        let Some(cursor) = indent_item(&mut self.document, &ctx) else {
            return false;
        };
        self.cursor = cursor;
        true
    }

    /// Lift the current item one level out. At depth 1 the item leaves
    /// the list and its blocks land at the list's own level.
    pub fn outdent_list_item(&mut self) -> bool {
        let Some(ctx) = item_context(&self.cursor) else {
            return false;
        };
        let cursor = if item_context(&ctx.list_path).is_some() {
            outdent_item(&mut self.document, &ctx)
        } else {
            let replacement = match block_ref(&self.document, &ctx.list_path) {
                Some(Block::OrderedList { content, .. }) => content
                    .get(ctx.item_index)
                    .map(|item| item.content.clone()),
                _ => None,
            };
            let Some(replacement) = replacement else {
                return false;
            };
            split_list_at_item(
                &mut self.document,
                &ctx.list_path,
                ctx.item_index,
                replacement,
            )
        };
        let Some(cursor) = cursor else {
            return false;
        };
        self.cursor = cursor;
        true
    }

    /// Insert blocks after the cursor's top-level block.
    pub fn insert_blocks(&mut self, blocks: Vec<Block>) -> bool {
        if blocks.is_empty() {
            return false;
        }
        let Some(PathStep::Root(idx)) = self.cursor.steps().first().copied() else {
            return false;
        };
        let at = (idx + 1).min(self.document.content.len());
        let count = blocks.len();
        self.document.content.splice(at..at, blocks);
        self.cursor = BlockPath::new_root(at + count - 1);
        true
    }

    /// The paste path: run the transform hook on the raw markup, then
    /// ingest whatever it produced.
    pub fn paste_html(&mut self, raw: &str) -> bool {
        let normalized = paste::transform_pasted_html(raw);
        let blocks = html::parse_blocks(&normalized);
        self.insert_blocks(blocks)
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod editor_tests;

use crate::document::{
    Block, BlockPath, Document, ListAttrs, ListItem, PathStep, block_mut,
};

// ============================================================================
// Navigation helpers
// ============================================================================

pub(crate) fn ensure_document_initialized(document: &mut Document) {
    if document.content.is_empty() {
        document.content.push(Block::paragraph(""));
    }
}

/// Position of a block inside a list item: the owning list's path plus the
/// item and block indices of the final path step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ItemContext {
    pub list_path: BlockPath,
    pub item_index: usize,
    pub block_index: usize,
}

pub(crate) fn item_context(path: &BlockPath) -> Option<ItemContext> {
    let (last, prefix) = path.steps().split_last()?;
    let PathStep::Item {
        item_index,
        block_index,
    } = *last
    else {
        return None;
    };
    Some(ItemContext {
        list_path: BlockPath::from_steps(prefix.to_vec()),
        item_index,
        block_index,
    })
}

/// The container vec holding the block at `path`, with the block's index
/// in it. Works for root blocks, blockquote children and item children.
pub(crate) fn container_mut<'a>(
    document: &'a mut Document,
    path: &BlockPath,
) -> Option<(&'a mut Vec<Block>, usize)> {
    let (last, prefix) = path.steps().split_last()?;
    match last {
        PathStep::Root(idx) => {
            if !prefix.is_empty() {
                return None;
            }
            Some((&mut document.content, *idx))
        }
        PathStep::Child(idx) => {
            let parent = block_mut(document, &BlockPath::from_steps(prefix.to_vec()))?;
            let Block::Blockquote { content } = parent else {
                return None;
            };
            Some((content, *idx))
        }
        PathStep::Item {
            item_index,
            block_index,
        } => {
            let parent = block_mut(document, &BlockPath::from_steps(prefix.to_vec()))?;
            let Block::OrderedList { content, .. } = parent else {
                return None;
            };
            Some((&mut content.get_mut(*item_index)?.content, *block_index))
        }
    }
}

/// Same parent as `path`, different index.
pub(crate) fn sibling_path(path: &BlockPath, index: usize) -> BlockPath {
    let mut steps = path.steps().to_vec();
    if let Some(last) = steps.last_mut() {
        *last = match *last {
            PathStep::Root(_) => PathStep::Root(index),
            PathStep::Child(_) => PathStep::Child(index),
            PathStep::Item { item_index, .. } => PathStep::Item {
                item_index,
                block_index: index,
            },
        };
    }
    BlockPath::from_steps(steps)
}

pub(crate) fn list_parts_mut<'a>(
    document: &'a mut Document,
    list_path: &BlockPath,
) -> Option<(&'a mut ListAttrs, &'a mut Vec<ListItem>)> {
    let Block::OrderedList { attrs, content } = block_mut(document, list_path)? else {
        return None;
    };
    Some((attrs, content))
}

pub(crate) fn take_block_at(document: &mut Document, path: &BlockPath) -> Option<Block> {
    let (container, idx) = container_mut(document, path)?;
    if idx >= container.len() {
        return None;
    }
    Some(container.remove(idx))
}

pub(crate) fn insert_block_after(
    document: &mut Document,
    path: &BlockPath,
    block: Block,
) -> Option<BlockPath> {
    let (container, idx) = container_mut(document, path)?;
    if idx >= container.len() {
        return None;
    }
    container.insert(idx + 1, block);
    Some(sibling_path(path, idx + 1))
}

// ============================================================================
// List structure edits
// ============================================================================

/// Wrap the block at `path` into a fresh single-item ordered list.
/// Numbering of the new list continues any earlier same-depth list, since
/// the restart flag defaults to off.
pub(crate) fn wrap_block_in_list(document: &mut Document, path: &BlockPath) -> Option<BlockPath> {
    let (container, idx) = container_mut(document, path)?;
    if idx >= container.len() {
        return None;
    }
    let block = container.remove(idx);
    container.insert(
        idx,
        Block::ordered_list(vec![ListItem::from_blocks(vec![block])]),
    );
    let mut cursor = path.clone();
    cursor.push_item(0, 0);
    Some(cursor)
}

/// Replace the list at `list_path` with its items' blocks. Nested lists
/// survive one level shallower.
pub(crate) fn unwrap_list(document: &mut Document, list_path: &BlockPath) -> Option<BlockPath> {
    let (container, idx) = container_mut(document, list_path)?;
    let Some(Block::OrderedList { content, .. }) = container.get_mut(idx) else {
        return None;
    };
    let items = std::mem::take(content);
    let blocks: Vec<Block> = items.into_iter().flat_map(|item| item.content).collect();
    if blocks.is_empty() {
        container.remove(idx);
        return Some(sibling_path(
            list_path,
            idx.min(container.len().saturating_sub(1)),
        ));
    }
    container.splice(idx..=idx, blocks);
    Some(sibling_path(list_path, idx))
}

/// Remove the item at `item_index` and put `replacement` blocks in its
/// place at the list's own level, splitting the list when items remain on
/// both sides. The part after the split carries no restart flag, so its
/// numbering continues the part before. Returns the path of the first
/// replacement block.
pub(crate) fn split_list_at_item(
    document: &mut Document,
    list_path: &BlockPath,
    item_index: usize,
    replacement: Vec<Block>,
) -> Option<BlockPath> {
    let (container, list_idx) = container_mut(document, list_path)?;
    let Some(Block::OrderedList { attrs, content }) = container.get_mut(list_idx) else {
        return None;
    };
    if item_index >= content.len() {
        return None;
    }
    let attrs = *attrs;
    let mut items = std::mem::take(content);
    let after = items.split_off(item_index + 1);
    items.pop();
    let before = items;

    let mut blocks: Vec<Block> = Vec::new();
    if !before.is_empty() {
        blocks.push(Block::OrderedList {
            attrs,
            content: before,
        });
    }
    let cursor_offset = blocks.len();
    blocks.extend(replacement);
    if !after.is_empty() {
        blocks.push(Block::OrderedList {
            attrs: ListAttrs::default(),
            content: after,
        });
    }
    if blocks.is_empty() {
        container.remove(list_idx);
        return Some(sibling_path(
            list_path,
            list_idx.min(container.len().saturating_sub(1)),
        ));
    }
    container.splice(list_idx..=list_idx, blocks);
    Some(sibling_path(list_path, list_idx + cursor_offset))
}

/// Insert a fresh empty item after `item_index`. Returns the path of the
/// new item's paragraph.
pub(crate) fn split_list_item(document: &mut Document, ctx: &ItemContext) -> Option<BlockPath> {
    let (_, items) = list_parts_mut(document, &ctx.list_path)?;
    if ctx.item_index >= items.len() {
        return None;
    }
    items.insert(ctx.item_index + 1, ListItem::with_text(""));
    let mut cursor = ctx.list_path.clone();
    cursor.push_item(ctx.item_index + 1, 0);
    Some(cursor)
}

/// Sink the item into its previous sibling's trailing nested list,
/// creating that list when absent.
pub(crate) fn indent_item(document: &mut Document, ctx: &ItemContext) -> Option<BlockPath> {
    if ctx.item_index == 0 {
        return None;
    }
    let (_, items) = list_parts_mut(document, &ctx.list_path)?;
    if ctx.item_index >= items.len() {
        return None;
    }
    let moved = items.remove(ctx.item_index);
    let prev = &mut items[ctx.item_index - 1];

    let nested_block_index;
    let nested_item_index;
    if let Some(Block::OrderedList { content, .. }) = prev.content.last_mut() {
        content.push(moved);
        nested_item_index = content.len() - 1;
        nested_block_index = prev.content.len() - 1;
    } else {
        prev.content.push(Block::ordered_list(vec![moved]));
        nested_block_index = prev.content.len() - 1;
        nested_item_index = 0;
    }

    let mut cursor = ctx.list_path.clone();
    cursor.push_item(ctx.item_index - 1, nested_block_index);
    cursor.push_item(nested_item_index, 0);
    Some(cursor)
}

/// Lift the item out of a nested list into the parent list, right after
/// the parent item. Trailing siblings follow as the lifted item's own
/// nested list; an emptied nested list is dropped.
pub(crate) fn outdent_item(document: &mut Document, ctx: &ItemContext) -> Option<BlockPath> {
    let parent_ctx = item_context(&ctx.list_path)?;

    let (_, items) = list_parts_mut(document, &ctx.list_path)?;
    if ctx.item_index >= items.len() {
        return None;
    }
    let mut moved = items.remove(ctx.item_index);
    let trailing = items.split_off(ctx.item_index);
    let nested_now_empty = items.is_empty();
    if !trailing.is_empty() {
        moved.content.push(Block::ordered_list(trailing));
    }

    if nested_now_empty {
        take_block_at(document, &ctx.list_path)?;
    }

    let (_, parent_items) = list_parts_mut(document, &parent_ctx.list_path)?;
    if parent_ctx.item_index >= parent_items.len() {
        return None;
    }
    parent_items.insert(parent_ctx.item_index + 1, moved);

    let mut cursor = parent_ctx.list_path.clone();
    cursor.push_item(parent_ctx.item_index + 1, 0);
    Some(cursor)
}

//! List numbering for official-document formatting.
//!
//! Two pieces live here: the numeral formatter, which maps a structural
//! position `(depth, ordinal)` to its display label, and the continuity
//! engine, which derives every list item's ordinal from document order
//! and the per-list restart flags. Nothing is ever read from stored
//! numbers; the whole assignment is recomputed from the tree.

use crate::document::{Block, BlockPath, Document};

const CHINESE_DIGITS: [&str; 10] = [
    "零", "一", "二", "三", "四", "五", "六", "七", "八", "九",
];
const HEAVENLY_STEMS: [&str; 10] = [
    "甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸",
];
const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Depths beyond this reuse the depth-7 label scheme.
pub const MAX_STYLED_DEPTH: u8 = 7;

/// Render the label for a list item at the given nesting depth.
///
/// The seven-level scheme rotates numeral systems the way Taiwanese
/// official documents do: 一、 (一) 1、 (1) 甲、 (甲) 子、. The cyclical
/// systems at depths 5–7 wrap around their cycle instead of erroring.
pub fn format_label(depth: u8, ordinal: u32) -> String {
    match depth.clamp(1, MAX_STYLED_DEPTH) {
        1 => format!("{}、", chinese_informal(ordinal)),
        2 => format!("({})", chinese_informal(ordinal)),
        3 => format!("{ordinal}、"),
        4 => format!("({ordinal})"),
        5 => format!("{}、", cyclic(&HEAVENLY_STEMS, ordinal)),
        6 => format!("({})", cyclic(&HEAVENLY_STEMS, ordinal)),
        _ => format!("{}、", cyclic(&EARTHLY_BRANCHES, ordinal)),
    }
}

/// Informal Chinese numerals for 1–9999 (十 rather than 一十 for 10–19,
/// 零 for interior zeros), matching the `trad-chinese-informal` counter
/// style. Values outside that range fall back to Arabic digits.
fn chinese_informal(n: u32) -> String {
    if n == 0 {
        return CHINESE_DIGITS[0].to_string();
    }
    if n > 9999 {
        return n.to_string();
    }
    if (10..=19).contains(&n) {
        let mut out = String::from("十");
        if n > 10 {
            out.push_str(CHINESE_DIGITS[(n % 10) as usize]);
        }
        return out;
    }

    let digits = [n / 1000 % 10, n / 100 % 10, n / 10 % 10, n % 10];
    let units = ["千", "百", "十", ""];
    let mut out = String::new();
    let mut pending_zero = false;
    for (digit, unit) in digits.iter().zip(units) {
        if *digit == 0 {
            if !out.is_empty() {
                pending_zero = true;
            }
            continue;
        }
        if pending_zero {
            out.push_str(CHINESE_DIGITS[0]);
            pending_zero = false;
        }
        out.push_str(CHINESE_DIGITS[*digit as usize]);
        out.push_str(unit);
    }
    out
}

fn cyclic<'a>(symbols: &'a [&'a str], ordinal: u32) -> &'a str {
    let index = (ordinal.max(1) - 1) as usize % symbols.len();
    symbols[index]
}

// ============================================================================
// Continuity engine
// ============================================================================

/// Ordinal assignment for one list item, produced by [`compute_ordinals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedItem {
    /// Path of the `OrderedList` node owning the item.
    pub list_path: BlockPath,
    /// Index of the item within that list.
    pub item_index: usize,
    /// 1-based nesting depth of the list.
    pub depth: u8,
    pub ordinal: u32,
    pub label: String,
}

/// Walk the document in tree order and assign every list item its ordinal.
///
/// One running counter per depth, all starting at 0. A list flagged with
/// `restartNumbering` zeroes its depth's counter before its items count;
/// an unflagged list continues wherever the counter left off, however much
/// non-list content intervened. Nested lists never touch shallower
/// counters. Single pass, O(number of nodes).
pub fn compute_ordinals(document: &Document) -> Vec<NumberedItem> {
    let mut counters: Vec<u32> = Vec::new();
    let mut out = Vec::new();
    for (idx, block) in document.content.iter().enumerate() {
        visit_block(block, BlockPath::new_root(idx), 0, &mut counters, &mut out);
    }
    out
}

fn visit_block(
    block: &Block,
    path: BlockPath,
    lists_entered: usize,
    counters: &mut Vec<u32>,
    out: &mut Vec<NumberedItem>,
) {
    match block {
        Block::Blockquote { content } => {
            for (idx, child) in content.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push_child(idx);
                visit_block(child, child_path, lists_entered, counters, out);
            }
        }
        Block::OrderedList { attrs, content } => {
            let depth = lists_entered + 1;
            if counters.len() < depth {
                counters.resize(depth, 0);
            }
            if attrs.restart_numbering {
                counters[depth - 1] = 0;
            }
            for (item_index, item) in content.iter().enumerate() {
                counters[depth - 1] += 1;
                out.push(NumberedItem {
                    list_path: path.clone(),
                    item_index,
                    depth: depth.min(u8::MAX as usize) as u8,
                    ordinal: counters[depth - 1],
                    label: format_label(
                        depth.min(u8::MAX as usize) as u8,
                        counters[depth - 1],
                    ),
                });
                for (block_index, child) in item.content.iter().enumerate() {
                    let mut child_path = path.clone();
                    child_path.push_item(item_index, block_index);
                    visit_block(child, child_path, depth, counters, out);
                }
            }
        }
        Block::Paragraph { .. } | Block::Heading { .. } | Block::HorizontalRule => {}
    }
}

/// Ordinal the first item of the list at `path` receives, per the same
/// continuity rules as [`compute_ordinals`].
pub fn starting_ordinal(document: &Document, path: &BlockPath) -> Option<u32> {
    compute_ordinals(document)
        .into_iter()
        .find(|item| item.list_path == *path && item.item_index == 0)
        .map(|item| item.ordinal)
}

#[cfg(test)]
#[path = "numbering_tests.rs"]
mod numbering_tests;

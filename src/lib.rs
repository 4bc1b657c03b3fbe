//! Core document model for Taiwanese official document (公文) editors.
//!
//! The crate owns the parts a 公文 editing surface cannot get from a
//! generic rich-text stack: the seven-level rotating numeral scheme
//! (一、 (一) 1、 (1) 甲、 (甲) 子、), numbering continuity across
//! interrupted lists with explicit per-list restart flags, the CSS
//! counter rules that realize that model declaratively, and the
//! normalizer that turns Word's flat, style-hinted clipboard markup into
//! properly nested lists. Presentation and chrome stay outside; callers
//! talk to a [`DocumentEditor`] handle and serialize through JSON or
//! HTML.

pub mod document;
pub mod editor;
pub mod html;
pub mod numbering;
pub mod paste;
pub mod stylesheet;

pub use document::{
    Block, BlockPath, Document, DocumentError, HeadingAttrs, Inline, LinkAttrs, ListAttrs,
    ListItem, Mark, PathStep,
};
pub use editor::DocumentEditor;
pub use numbering::{NumberedItem, compute_ordinals, format_label, starting_ordinal};
pub use paste::transform_pasted_html;
pub use stylesheet::{Orientation, PaperSize, PrintOptions, counter_rules, print_stylesheet};

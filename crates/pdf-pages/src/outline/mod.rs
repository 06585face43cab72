//! Outline (table of contents) text format
//!
//! This module converts between flat outline text and an owned tree:
//! 1. Parse each line into an [`OutlineItem`] (bad lines are dropped and reported)
//! 2. Build the tree with an explicit stack
//! 3. Serialize back to aligned text

mod indent;
mod item;
mod parser;
mod report;
mod serialize;
mod tree;

pub use indent::parse_indented_text;
pub use item::{Iter, OutlineItem, OutlineItemNode};
pub use parser::{parse_document, parse_from_file, parse_from_text, parse_line, parse_lines};
pub use report::{OutlineWarning, ParsedOutline};
pub use serialize::{
    serialize_item, serialize_lines, serialize_to_file, serialize_to_text, serialize_tree,
    title_width,
};
pub use tree::{build_tree, build_tree_with_warnings};

//! Outline text serialization
//!
//! Always writes the padded form. Titles are padded to a common column
//! across the whole document so page numbers line up.

use super::item::single_line;
use super::{OutlineItem, OutlineItemNode};
use crate::constants::{LEVEL_MARKER, PAGE_COLUMN_GAP};
use crate::types::*;
use std::path::Path;

/// Width of the widest `level + title` prefix, in characters
pub fn title_width<'a, I>(items: I) -> usize
where
    I: IntoIterator<Item = &'a OutlineItem>,
{
    items
        .into_iter()
        .map(|item| item.level as usize + single_line(&item.title).chars().count())
        .max()
        .unwrap_or(0)
}

/// Serialize one item, padding its title column to `width`.
///
/// `width` normally comes from [`title_width`] over every item of the
/// document. Titles set directly on the struct are flattened to one line
/// here as well.
pub fn serialize_item(item: &OutlineItem, width: usize) -> String {
    let marker = LEVEL_MARKER.to_string().repeat(item.level as usize);
    let prefix = format!("{} {}", marker, single_line(&item.title));
    format!(
        "{:<column$}{:gap$}{}",
        prefix,
        "",
        item.page,
        column = width + 1,
        gap = PAGE_COLUMN_GAP
    )
}

/// Serialize items as lines aligned over the whole list
pub fn serialize_lines(items: &[OutlineItem]) -> Vec<String> {
    let width = title_width(items);
    items
        .iter()
        .map(|item| serialize_item(item, width))
        .collect()
}

/// Serialize a tree in pre-order.
///
/// The synthetic root is skipped; any other node passed in is emitted
/// before its descendants.
pub fn serialize_tree(root: &OutlineItemNode) -> Vec<String> {
    let items: Vec<&OutlineItem> = if root.is_root() {
        root.iter().map(|node| &node.item).collect()
    } else {
        std::iter::once(&root.item)
            .chain(root.iter().map(|node| &node.item))
            .collect()
    };

    let width = title_width(items.iter().copied());
    items
        .into_iter()
        .map(|item| serialize_item(item, width))
        .collect()
}

/// Serialize a tree to text, one line per entry with a trailing newline
pub fn serialize_to_text(root: &OutlineItemNode) -> String {
    let mut text = serialize_tree(root).join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// Write a tree to an outline text file
pub async fn serialize_to_file(root: &OutlineItemNode, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, serialize_to_text(root)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::build_tree;

    #[test]
    fn test_serialize_item_pads_to_width() {
        let item = OutlineItem::new(1, "Intro", 3);
        // width = 1 + 5, prefix padded to 7 chars, then two spaces
        assert_eq!(serialize_item(&item, 6), "# Intro  3");
        assert_eq!(serialize_item(&item, 9), "# Intro     3");
    }

    #[test]
    fn test_serialize_lines_align_page_column() {
        let lines = serialize_lines(&[
            OutlineItem::new(1, "Chapter 1", 1),
            OutlineItem::new(2, "Section 1.1", 2),
            OutlineItem::new(3, "SubSection 1.1.1", 3),
        ]);
        assert_eq!(
            lines,
            vec![
                "# Chapter 1           1",
                "## Section 1.1        2",
                "### SubSection 1.1.1  3",
            ]
        );
    }

    #[test]
    fn test_width_counts_characters() {
        let lines = serialize_lines(&[OutlineItem::new(1, "目录", 1), OutlineItem::new(2, "目录", 5)]);
        assert_eq!(lines, vec!["# 目录   1", "## 目录  5"]);
    }

    #[test]
    fn test_serialize_tree_skips_root() {
        let root = build_tree(vec![OutlineItem::new(1, "A", 1), OutlineItem::new(2, "B", 2)]);
        assert_eq!(serialize_tree(&root), vec!["# A   1", "## B  2"]);
        assert_eq!(serialize_to_text(&root), "# A   1\n## B  2\n");
    }

    #[test]
    fn test_serialize_subtree_includes_head() {
        let root = build_tree(vec![OutlineItem::new(1, "A", 1), OutlineItem::new(2, "B", 2)]);
        assert_eq!(serialize_tree(&root.children[0]), vec!["# A   1", "## B  2"]);
    }

    #[test]
    fn test_raw_line_breaks_stay_on_one_line() {
        let item = OutlineItem {
            level: 1,
            title: "Part\nOne\r".to_string(),
            page: 4,
        };
        assert_eq!(serialize_lines(&[item]), vec!["# Part One  4"]);
    }

    #[test]
    fn test_untitled_item() {
        let lines = serialize_lines(&[OutlineItem::new(1, "Intro", 1), OutlineItem::new(1, "", 2)]);
        assert_eq!(lines, vec!["# Intro  1", "#        2"]);
    }

    #[test]
    fn test_empty_tree() {
        let root = OutlineItemNode::root();
        assert!(serialize_tree(&root).is_empty());
        assert_eq!(serialize_to_text(&root), "");
    }
}

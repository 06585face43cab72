//! Outline entries and the tree that holds them

use crate::types::*;

/// One outline entry at a nesting depth
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlineItem {
    /// Nesting depth, 1 for top-level entries
    pub level: u32,
    pub title: String,
    /// 1-based page number; 0 means the entry has no resolvable target
    pub page: u32,
}

impl OutlineItem {
    /// Create an item. The title is trimmed and any control characters
    /// (line breaks, tabs) become spaces so it always fits on one line.
    pub fn new(level: u32, title: impl AsRef<str>, page: u32) -> Self {
        Self {
            level,
            title: single_line(title.as_ref()),
            page,
        }
    }
}

/// Trimmed copy of `title` with control characters replaced by spaces
pub(crate) fn single_line(title: &str) -> String {
    let flat: String = title
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    flat.trim().to_string()
}

/// A node of the outline tree.
///
/// Each node exclusively owns its children. The tree is anchored at a
/// synthetic root (level 0, empty title, page 0) that is never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlineItemNode {
    pub item: OutlineItem,
    pub children: Vec<OutlineItemNode>,
}

impl OutlineItemNode {
    pub fn new(item: OutlineItem) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }

    /// Create an empty synthetic root
    pub fn root() -> Self {
        Self::new(OutlineItem {
            level: 0,
            title: String::new(),
            page: 0,
        })
    }

    pub fn is_root(&self) -> bool {
        self.item.level == 0
    }

    /// Pre-order iterator over every node below this one
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![self.children.iter()],
        }
    }

    /// Items below this node in document order
    pub fn flatten(&self) -> Vec<OutlineItem> {
        self.iter().map(|node| node.item.clone()).collect()
    }

    /// Number of nodes below this one
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Build a new tree with every page shifted by `offset`.
    ///
    /// Shifted pages must stay within `1..=page_count` (or at least 1 when
    /// no page count is given). Entries without a target (page 0) are kept
    /// as they are.
    pub fn with_page_offset(&self, offset: i64, page_count: Option<u32>) -> Result<Self> {
        let mut item = self.item.clone();
        if !self.is_root() && item.page != 0 {
            let max = page_count.unwrap_or(u32::MAX);
            let shifted = i64::from(item.page) + offset;
            if shifted < 1 || shifted > i64::from(max) {
                return Err(PagesError::PageOutOfRange {
                    page: shifted,
                    page_count: max,
                });
            }
            item.page = shifted as u32;
        }

        let children = self
            .children
            .iter()
            .map(|child| child.with_page_offset(offset, page_count))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { item, children })
    }
}

impl<'a> IntoIterator for &'a OutlineItemNode {
    type Item = &'a OutlineItemNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order traversal over an outline tree
pub struct Iter<'a> {
    stack: Vec<std::slice::Iter<'a, OutlineItemNode>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a OutlineItemNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children.iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> OutlineItemNode {
        let mut chapter = OutlineItemNode::new(OutlineItem::new(1, "Chapter 1", 1));
        chapter
            .children
            .push(OutlineItemNode::new(OutlineItem::new(2, "Section 1.1", 3)));
        let mut root = OutlineItemNode::root();
        root.children.push(chapter);
        root.children
            .push(OutlineItemNode::new(OutlineItem::new(1, "Chapter 2", 7)));
        root
    }

    #[test]
    fn test_new_trims_title() {
        let item = OutlineItem::new(2, "  Intro \t", 4);
        assert_eq!(item.title, "Intro");
    }

    #[test]
    fn test_new_flattens_line_breaks() {
        assert_eq!(OutlineItem::new(1, "Part\nOne", 1).title, "Part One");
        assert_eq!(OutlineItem::new(1, "A\r\nB\tC\u{7}", 1).title, "A  B C");
    }

    #[test]
    fn test_iter_is_pre_order() {
        let titles: Vec<_> = sample_tree()
            .iter()
            .map(|node| node.item.title.clone())
            .collect();
        assert_eq!(titles, vec!["Chapter 1", "Section 1.1", "Chapter 2"]);
    }

    #[test]
    fn test_len_counts_descendants() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 3);
        assert!(!tree.is_empty());
        assert!(OutlineItemNode::root().is_empty());
    }

    #[test]
    fn test_page_offset_builds_new_tree() {
        let tree = sample_tree();
        let shifted = tree.with_page_offset(2, Some(10)).unwrap();
        let pages: Vec<u32> = shifted.flatten().iter().map(|i| i.page).collect();
        assert_eq!(pages, vec![3, 5, 9]);
        // Source tree untouched
        assert_eq!(tree.flatten()[0].page, 1);
        assert!(shifted.is_root());
    }

    #[test]
    fn test_page_offset_out_of_range() {
        let tree = sample_tree();
        match tree.with_page_offset(4, Some(10)) {
            Err(PagesError::PageOutOfRange { page, page_count }) => {
                assert_eq!(page, 11);
                assert_eq!(page_count, 10);
            }
            other => panic!("Expected PageOutOfRange, got {:?}", other),
        }
        assert!(tree.with_page_offset(-1, None).is_err());
        assert!(tree.with_page_offset(100, None).is_ok());
    }

    #[test]
    fn test_page_offset_keeps_untargeted_entries() {
        let mut root = OutlineItemNode::root();
        root.children
            .push(OutlineItemNode::new(OutlineItem::new(1, "Cover", 0)));
        let shifted = root.with_page_offset(5, Some(3)).unwrap();
        assert_eq!(shifted.children[0].item.page, 0);
    }
}

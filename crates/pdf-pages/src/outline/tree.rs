//! Tree construction from flat leveled items
//!
//! A single pass with an explicit stack. The stack holds the nodes still
//! open for children, strictly increasing in level from bottom (the
//! synthetic root) to top. A node is moved into its parent once it is
//! closed, so ownership only ever flows downward.

use super::{OutlineItem, OutlineItemNode, OutlineWarning};
use log::warn;

/// Build an outline tree from items in document order.
///
/// An item becomes a child of the nearest preceding item with a strictly
/// smaller level. Level jumps (e.g. level 1 followed directly by level 3)
/// are accepted.
pub fn build_tree<I>(items: I) -> OutlineItemNode
where
    I: IntoIterator<Item = OutlineItem>,
{
    build_tree_with_warnings(items).0
}

/// Same as [`build_tree`], also reporting every level jump.
pub fn build_tree_with_warnings<I>(items: I) -> (OutlineItemNode, Vec<OutlineWarning>)
where
    I: IntoIterator<Item = OutlineItem>,
{
    let mut warnings = Vec::new();
    let root = build_numbered(items.into_iter().map(|item| (None, item)), &mut warnings);
    (root, warnings)
}

/// Build from items tagged with their source line, if known
pub(crate) fn build_numbered<I>(items: I, warnings: &mut Vec<OutlineWarning>) -> OutlineItemNode
where
    I: IntoIterator<Item = (Option<usize>, OutlineItem)>,
{
    let mut stack = vec![OutlineItemNode::root()];

    for (line, item) in items {
        // The root stays at the bottom no matter what level comes in
        while stack.len() > 1 && stack.last().is_some_and(|top| top.item.level >= item.level) {
            close_top(&mut stack);
        }

        let parent_level = stack.last().map_or(0, |parent| parent.item.level);
        if item.level > parent_level.saturating_add(1) {
            warn!(
                "outline entry '{}' jumps from level {} to {}",
                item.title, parent_level, item.level
            );
            warnings.push(OutlineWarning::LevelJump {
                line,
                level: item.level,
                parent_level,
            });
        }

        stack.push(OutlineItemNode::new(item));
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack.pop().unwrap_or_else(OutlineItemNode::root)
}

/// Pop the top node and append it to the node below
fn close_top(stack: &mut Vec<OutlineItemNode>) {
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(level: u32, title: &str, page: u32) -> OutlineItem {
        OutlineItem::new(level, title, page)
    }

    #[test]
    fn test_nested_levels() {
        let root = build_tree(vec![
            item(1, "A", 1),
            item(2, "A.1", 2),
            item(3, "A.1.a", 3),
            item(1, "B", 4),
        ]);

        assert!(root.is_root());
        assert_eq!(root.children.len(), 2);
        let a = &root.children[0];
        assert_eq!(a.item, item(1, "A", 1));
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.children[0].children[0].item, item(3, "A.1.a", 3));
        assert!(root.children[1].children.is_empty());
    }

    #[test]
    fn test_equal_levels_are_siblings() {
        let root = build_tree(vec![
            item(1, "A", 1),
            item(2, "A.1", 2),
            item(2, "A.2", 3),
            item(2, "A.3", 4),
        ]);
        let titles: Vec<_> = root.children[0]
            .children
            .iter()
            .map(|n| n.item.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A.1", "A.2", "A.3"]);
    }

    #[test]
    fn test_level_jump_is_accepted_and_reported() {
        let (root, warnings) = build_tree_with_warnings(vec![item(1, "A", 1), item(3, "deep", 2)]);
        assert_eq!(root.children[0].children[0].item.title, "deep");
        assert_eq!(
            warnings,
            vec![OutlineWarning::LevelJump {
                line: None,
                level: 3,
                parent_level: 1,
            }]
        );
    }

    #[test]
    fn test_first_item_deeper_than_one() {
        let (root, warnings) = build_tree_with_warnings(vec![item(2, "orphan", 1), item(1, "top", 2)]);
        assert_eq!(root.children.len(), 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_shallower_item_closes_several_levels() {
        let root = build_tree(vec![
            item(1, "A", 1),
            item(2, "A.1", 2),
            item(3, "A.1.a", 3),
            item(4, "A.1.a.i", 4),
            item(2, "A.2", 5),
        ]);
        let a = &root.children[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[1].item.title, "A.2");
        assert_eq!(root.len(), 5);
    }

    #[test]
    fn test_empty_input() {
        let root = build_tree(Vec::new());
        assert!(root.is_root());
        assert!(root.is_empty());
    }
}

//! Indentation-based outline input
//!
//! An alternative front-end for hand-written outlines where nesting comes
//! from leading whitespace instead of `#` markers:
//!
//! ```text
//! Chapter 1      1
//!   Section 1.1  2
//!   Section 1.2  6
//! Chapter 2      7
//! ```
//!
//! Levels are relative: a line indented deeper than the entry above opens a
//! new level, equal indentation makes a sibling, and shallower indentation
//! returns to the nearest enclosing indentation that is not deeper.

use super::tree::build_numbered;
use super::{OutlineItem, OutlineWarning, ParsedOutline};
use crate::constants::TAB_WIDTH;
use log::warn;
use regex::Regex;
use std::sync::LazyLock;

static INDENTED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d+)$").expect("valid indented outline pattern"));

/// Parse indentation-based outline text
pub fn parse_indented_text(text: &str) -> ParsedOutline {
    let mut warnings = Vec::new();
    let mut items = Vec::new();
    let mut open_indents: Vec<usize> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let content = line.trim();
        if content.is_empty() {
            continue;
        }

        let Some((title, page)) = split_entry(content) else {
            warn!("line {}: invalid outline item: {}", idx + 1, line);
            warnings.push(OutlineWarning::MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            });
            continue;
        };

        let indent = indent_width(line);
        while open_indents.last().is_some_and(|&open| open > indent) {
            open_indents.pop();
        }
        if open_indents.last() != Some(&indent) {
            open_indents.push(indent);
        }

        let level = open_indents.len() as u32;
        items.push((Some(idx + 1), OutlineItem::new(level, title, page)));
    }

    let root = build_numbered(items, &mut warnings);
    ParsedOutline { root, warnings }
}

fn split_entry(content: &str) -> Option<(&str, u32)> {
    let caps = INDENTED_ENTRY.captures(content)?;
    let title = caps.get(1)?.as_str();
    let page = caps[2].parse().ok()?;
    Some((title, page))
}

/// Leading whitespace width in columns
fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

//! Outline text parsing
//!
//! One entry per line. The run of leading `#` gives the level, the trailing
//! digits give the page, everything in between is the title:
//!
//! ```text
//! # Chapter 1           1
//! ## Section 1.1        2
//! ### SubSection 1.1.1  3
//! # Chapter 2           7
//! ```
//!
//! Whitespace must separate the title from the page. The title may be empty
//! (`#   4`), which is how untitled bookmarks are written.
//!
//! The older compact form `#Chapter 1#1` (page after a second `#`) is still
//! accepted on input.

use super::tree::build_numbered;
use super::{OutlineItem, OutlineItemNode, OutlineWarning, ParsedOutline};
use crate::types::*;
use log::warn;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

static COMPACT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)(.+?)#(\d+)$").expect("valid compact outline pattern"));

static PADDED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)\s*(.*?)\s+(\d+)$").expect("valid outline pattern"));

/// Parse a single outline line.
///
/// Returns `None` when the line matches neither form.
pub fn parse_line(line: &str) -> Option<OutlineItem> {
    let line = line.trim();
    let caps = COMPACT_LINE
        .captures(line)
        .or_else(|| PADDED_LINE.captures(line))?;
    item_from_captures(&caps)
}

fn item_from_captures(caps: &Captures<'_>) -> Option<OutlineItem> {
    let level = u32::try_from(caps[1].len()).ok()?;
    let title = caps[2].trim();
    let page = caps[3].parse::<u32>().ok()?;
    Some(OutlineItem::new(level, title, page))
}

/// Parse lines into items, dropping (and logging) the ones that don't parse.
/// Blank lines are skipped.
pub fn parse_lines<I, S>(lines: I) -> Vec<OutlineItem>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .filter_map(|line| {
            let item = parse_line(line.as_ref());
            if item.is_none() {
                warn!("invalid outline item: {}", line.as_ref());
            }
            item
        })
        .collect()
}

/// Parse outline text, collecting dropped lines and level jumps as warnings.
pub fn parse_document(text: &str) -> ParsedOutline {
    let mut warnings = Vec::new();
    let mut items = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(item) => items.push((Some(idx + 1), item)),
            None => {
                warn!("line {}: invalid outline item: {}", idx + 1, line);
                warnings.push(OutlineWarning::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
        }
    }

    let root = build_numbered(items, &mut warnings);
    ParsedOutline { root, warnings }
}

/// Parse outline text into a tree. Malformed lines are dropped.
pub fn parse_from_text(text: &str) -> OutlineItemNode {
    parse_document(text).root
}

/// Read and parse an outline text file
pub async fn parse_from_file(path: impl AsRef<Path>) -> Result<ParsedOutline> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(parse_document(&text))
}

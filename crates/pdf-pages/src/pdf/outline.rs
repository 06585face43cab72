//! Document outline (bookmarks) access
//!
//! Reading walks `/Outlines` through `/First` and `/Next` links and resolves
//! each item's destination to a 1-based page number. Items whose destination
//! cannot be resolved are kept with page 0.
//!
//! Writing replaces the catalog `/Outlines` with a freshly built tree; every
//! item points at its page with a `[page /Fit]` destination.

use super::pages::{catalog_id, resolve, resolve_dict};
use crate::constants::{MAX_NAME_TREE_DEPTH, MAX_OUTLINE_DEPTH};
use crate::options::ToolOptions;
use crate::outline::{OutlineItem, OutlineItemNode};
use crate::types::*;
use log::{debug, info, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use std::collections::{BTreeMap, HashMap, HashSet};

const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

// =============================================================================
// Reading
// =============================================================================

/// Read the document outline as a flat pre-order list
pub fn read_outline(doc: &Document) -> Result<Vec<OutlineItem>> {
    let catalog = doc.get_dictionary(catalog_id(doc)?)?;

    let Some(outlines) = catalog
        .get(b"Outlines")
        .ok()
        .and_then(|o| resolve_dict(doc, o))
    else {
        return Ok(Vec::new());
    };
    let Ok(first) = outlines.get(b"First").and_then(Object::as_reference) else {
        return Ok(Vec::new());
    };

    let resolver = DestinationResolver::new(doc, catalog);
    let mut items = Vec::new();
    let mut visited = HashSet::new();
    walk_siblings(&resolver, first, 1, &mut visited, &mut items);

    debug!("Read {} outline items", items.len());
    Ok(items)
}

fn walk_siblings(
    resolver: &DestinationResolver,
    first: ObjectId,
    level: u32,
    visited: &mut HashSet<ObjectId>,
    items: &mut Vec<OutlineItem>,
) {
    if level as usize > MAX_OUTLINE_DEPTH {
        warn!("Outline deeper than {} levels, truncating", MAX_OUTLINE_DEPTH);
        return;
    }

    let doc = resolver.doc;
    let mut current = Some(first);
    while let Some(id) = current {
        if !visited.insert(id) {
            warn!("Outline item {:?} visited twice, stopping", id);
            break;
        }
        let Ok(node) = doc.get_dictionary(id) else {
            warn!("Outline item {:?} is not a dictionary", id);
            break;
        };

        let title = node
            .get(b"Title")
            .ok()
            .and_then(|t| resolve(doc, t))
            .and_then(|t| t.as_str().ok())
            .map(decode_text_string)
            .unwrap_or_default();
        let page = resolver.page_of_item(node).unwrap_or_else(|| {
            warn!("Outline item '{}' has no resolvable destination", title);
            0
        });
        items.push(OutlineItem::new(level, title, page));

        if let Ok(child) = node.get(b"First").and_then(Object::as_reference) {
            walk_siblings(resolver, child, level + 1, visited, items);
        }
        current = node.get(b"Next").and_then(Object::as_reference).ok();
    }
}

/// Maps outline destinations to 1-based page numbers
struct DestinationResolver<'a> {
    doc: &'a Document,
    catalog: &'a Dictionary,
    page_numbers: HashMap<ObjectId, u32>,
    page_count: u32,
}

impl<'a> DestinationResolver<'a> {
    fn new(doc: &'a Document, catalog: &'a Dictionary) -> Self {
        let pages = doc.get_pages();
        let page_count = pages.len() as u32;
        let page_numbers = pages.into_iter().map(|(number, id)| (id, number)).collect();
        Self {
            doc,
            catalog,
            page_numbers,
            page_count,
        }
    }

    fn page_of_item(&self, node: &Dictionary) -> Option<u32> {
        if let Ok(dest) = node.get(b"Dest") {
            return self.page_of_destination(dest, 0);
        }

        let action = resolve_dict(self.doc, node.get(b"A").ok()?)?;
        match action.get(b"S") {
            Ok(Object::Name(kind)) if kind.as_slice() == b"GoTo" => {}
            _ => return None,
        }
        self.page_of_destination(action.get(b"D").ok()?, 0)
    }

    fn page_of_destination(&self, dest: &Object, depth: usize) -> Option<u32> {
        if depth > MAX_NAME_TREE_DEPTH {
            return None;
        }

        match resolve(self.doc, dest)? {
            Object::Array(array) => match array.first()? {
                Object::Reference(page_id) => self.page_numbers.get(page_id).copied(),
                Object::Integer(index) => self.page_of_index(*index),
                _ => None,
            },
            Object::Integer(index) => self.page_of_index(*index),
            Object::Dictionary(dict) => self.page_of_destination(dict.get(b"D").ok()?, depth + 1),
            Object::String(name, _) | Object::Name(name) => {
                let target = self.named_destination(name)?;
                self.page_of_destination(&target, depth + 1)
            }
            _ => None,
        }
    }

    /// Zero-based page index to page number
    fn page_of_index(&self, index: i64) -> Option<u32> {
        let number = u32::try_from(index).ok()?.checked_add(1)?;
        (number <= self.page_count).then_some(number)
    }

    fn named_destination(&self, name: &[u8]) -> Option<Object> {
        let doc = self.doc;

        let from_tree = self
            .catalog
            .get(b"Names")
            .ok()
            .and_then(|names| resolve_dict(doc, names))
            .and_then(|names| names.get(b"Dests").ok())
            .and_then(|tree| resolve_dict(doc, tree))
            .and_then(|tree| lookup_name_tree(doc, tree, name, 0));
        if from_tree.is_some() {
            return from_tree;
        }

        let dests = resolve_dict(doc, self.catalog.get(b"Dests").ok()?)?;
        dests.get(name).ok().cloned()
    }
}

fn lookup_name_tree(doc: &Document, node: &Dictionary, name: &[u8], depth: usize) -> Option<Object> {
    if depth > MAX_NAME_TREE_DEPTH {
        return None;
    }

    if let Some(Object::Array(pairs)) = node.get(b"Names").ok().and_then(|n| resolve(doc, n)) {
        for pair in pairs.chunks_exact(2) {
            if let Some(Object::String(key, _)) = resolve(doc, &pair[0]) {
                if key.as_slice() == name {
                    return Some(pair[1].clone());
                }
            }
        }
    }

    if let Some(Object::Array(kids)) = node.get(b"Kids").ok().and_then(|k| resolve(doc, k)) {
        for kid in kids {
            let found = resolve_dict(doc, kid)
                .and_then(|kid| lookup_name_tree(doc, kid, name, depth + 1));
            if found.is_some() {
                return found;
            }
        }
    }

    None
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8 with BOM, or
/// single-byte)
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16_BOM) {
        let units = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        return char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
    }
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Replace the document outline with `root`, shifting pages by `offset`.
///
/// With [`ToolOptions::strict_page_bounds`] every shifted page must exist in
/// the document.
/// Otherwise items pointing past the last page are written without a
/// destination. Returns the number of items written.
pub fn write_outline(
    doc: &mut Document,
    root: &OutlineItemNode,
    offset: i64,
    options: &ToolOptions,
) -> Result<usize> {
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(PagesError::NoPages);
    }
    let page_count = u32::try_from(pages.len()).unwrap_or(u32::MAX);
    let shifted = root.with_page_offset(offset, options.page_bound(page_count))?;

    let outlines_id = doc.new_object_id();
    let mut outlines = Dictionary::new();
    outlines.set("Type", Object::Name(b"Outlines".to_vec()));
    let written = match write_children(doc, &shifted.children, outlines_id, &pages) {
        Some(children) => {
            outlines.set("First", Object::Reference(children.first));
            outlines.set("Last", Object::Reference(children.last));
            outlines.set("Count", Object::Integer(children.open_count));
            children.open_count as usize
        }
        None => {
            outlines.set("Count", Object::Integer(0));
            0
        }
    };
    doc.objects.insert(outlines_id, Object::Dictionary(outlines));

    let catalog_id = catalog_id(doc)?;
    let catalog = doc.get_object_mut(catalog_id)?.as_dict_mut()?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    doc.prune_objects();

    info!("Wrote {} outline items (page offset {})", written, offset);
    Ok(written)
}

struct WrittenChildren {
    first: ObjectId,
    last: ObjectId,
    /// Visible descendants with every item open
    open_count: i64,
}

fn write_children(
    doc: &mut Document,
    children: &[OutlineItemNode],
    parent_id: ObjectId,
    pages: &BTreeMap<u32, ObjectId>,
) -> Option<WrittenChildren> {
    let ids: Vec<ObjectId> = children.iter().map(|_| doc.new_object_id()).collect();
    let mut open_count = 0;

    for (idx, child) in children.iter().enumerate() {
        let mut dict = Dictionary::new();
        dict.set("Title", encode_text_string(&child.item.title));
        dict.set("Parent", Object::Reference(parent_id));
        if idx > 0 {
            dict.set("Prev", Object::Reference(ids[idx - 1]));
        }
        if let Some(&next) = ids.get(idx + 1) {
            dict.set("Next", Object::Reference(next));
        }

        match pages.get(&child.item.page) {
            Some(&page_id) => dict.set(
                "Dest",
                Object::Array(vec![Object::Reference(page_id), Object::Name(b"Fit".to_vec())]),
            ),
            None if child.item.page != 0 => {
                warn!(
                    "Outline item '{}' points past the last page ({}), writing it without a destination",
                    child.item.title, child.item.page
                );
            }
            None => {}
        }

        if let Some(grandchildren) = write_children(doc, &child.children, ids[idx], pages) {
            dict.set("First", Object::Reference(grandchildren.first));
            dict.set("Last", Object::Reference(grandchildren.last));
            dict.set("Count", Object::Integer(grandchildren.open_count));
            open_count += grandchildren.open_count;
        }

        open_count += 1;
        doc.objects.insert(ids[idx], Object::Dictionary(dict));
    }

    Some(WrittenChildren {
        first: *ids.first()?,
        last: *ids.last()?,
        open_count,
    })
}

/// Encode a title as a PDF text string
fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = UTF16_BOM.to_vec();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

// =============================================================================
// Removal
// =============================================================================

/// Remove the document outline. Returns whether there was one.
pub fn remove_outline(doc: &mut Document) -> Result<bool> {
    let catalog_id = catalog_id(doc)?;
    let catalog = doc.get_object_mut(catalog_id)?.as_dict_mut()?;
    let removed = catalog.remove(b"Outlines").is_some();
    if removed {
        doc.prune_objects();
        info!("Removed document outline");
    }
    Ok(removed)
}

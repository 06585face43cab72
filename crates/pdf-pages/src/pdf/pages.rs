//! Page tree access shared by the reorder and outline drivers

use crate::constants::INHERITABLE_PAGE_KEYS;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;

/// Object id of the document catalog
pub(crate) fn catalog_id(doc: &Document) -> Result<ObjectId> {
    Ok(doc.trailer.get(b"Root")?.as_reference()?)
}

/// Object id of the root `/Pages` node
pub(crate) fn pages_root_id(doc: &Document) -> Result<ObjectId> {
    let catalog = doc.get_dictionary(catalog_id(doc)?)?;
    Ok(catalog.get(b"Pages")?.as_reference()?)
}

/// Page object ids in document order
pub(crate) fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Look up a page attribute, walking `/Parent` links for inherited values
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut seen = HashSet::new();
    let mut current = Some(page_id);

    while let Some(id) = current {
        if !seen.insert(id) {
            break;
        }
        let node = doc.get_dictionary(id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        current = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

/// Page MediaBox, inherited if necessary, resolved to a 4-number array
pub(crate) fn media_box(doc: &Document, page_id: ObjectId) -> Option<Vec<Object>> {
    let value = inherited_attribute(doc, page_id, b"MediaBox")?;
    let array = match value {
        Object::Reference(id) => doc.get_object(id).ok()?.as_array().ok()?.clone(),
        Object::Array(array) => array,
        _ => return None,
    };
    (array.len() == 4 && array.iter().all(|v| extract_number(v).is_some())).then_some(array)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Replace the page tree with a single flat `/Kids` array in `order`.
///
/// Inheritable attributes are copied onto each page first so intermediate
/// `/Pages` nodes can be dropped without changing how any page renders.
pub(crate) fn rewrite_page_order(doc: &mut Document, order: &[ObjectId]) -> Result<()> {
    let root_id = pages_root_id(doc)?;

    for &page_id in order {
        let inherited: Vec<(&[u8], Object)> = {
            let page = doc.get_dictionary(page_id)?;
            INHERITABLE_PAGE_KEYS
                .iter()
                .filter(|&&key| !page.has(key))
                .filter_map(|&key| inherited_attribute(doc, page_id, key).map(|v| (key, v)))
                .collect()
        };

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in inherited {
            page.set(key.to_vec(), value);
        }
        page.set("Parent", Object::Reference(root_id));
    }

    let kids: Vec<Object> = order.iter().map(|&id| Object::Reference(id)).collect();
    let count = kids.len() as i64;

    let root = doc.get_object_mut(root_id)?.as_dict_mut()?;
    root.set("Kids", Object::Array(kids));
    root.set("Count", Object::Integer(count));

    doc.prune_objects();
    Ok(())
}

/// Resolve one level of indirection
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Resolve an object that should be a dictionary
pub(crate) fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, obj)?.as_dict().ok()
}

//! Page-order driver for booklet printing

use super::blank::{blank_media_box, create_blank_page};
use super::pages::{page_ids, pages_root_id, rewrite_page_order};
use crate::booklet::{from_booklet, padded_len, to_booklet};
use crate::options::ToolOptions;
use crate::types::*;
use log::{debug, info};
use lopdf::{Document, ObjectId};
use std::collections::HashSet;

/// Pad a document to whole sheets and put its pages in booklet order
pub async fn make_booklet(doc: Document, options: &ToolOptions) -> Result<Document> {
    options.validate()?;
    let fallback = options.blank_page_dimensions();

    tokio::task::spawn_blocking(move || make_booklet_sync(doc, fallback)).await?
}

/// Restore reading order from a document in booklet order
pub async fn restore_booklet(doc: Document) -> Result<Document> {
    reorder_pages(doc, from_booklet::<ObjectId>).await
}

/// Rewrite the page order of `doc` with `order_fn`.
///
/// `order_fn` receives the page ids in current order and must return a
/// permutation of them.
pub async fn reorder_pages<F>(doc: Document, order_fn: F) -> Result<Document>
where
    F: FnOnce(&[ObjectId]) -> Result<Vec<ObjectId>> + Send + 'static,
{
    tokio::task::spawn_blocking(move || reorder_pages_sync(doc, order_fn)).await?
}

fn make_booklet_sync(mut doc: Document, fallback: (f32, f32)) -> Result<Document> {
    let mut pages = page_ids(&doc);
    if pages.is_empty() {
        return Err(PagesError::NoPages);
    }

    let blanks = padded_len(pages.len()) - pages.len();
    if blanks > 0 {
        let media_box = blank_media_box(&doc, pages.first().copied(), fallback);
        let root_id = pages_root_id(&doc)?;
        for _ in 0..blanks {
            pages.push(create_blank_page(&mut doc, &media_box, root_id));
        }
        info!("Padded {} pages with {} blank pages", pages.len() - blanks, blanks);
    }

    let order = to_booklet(&pages)?;
    rewrite_page_order(&mut doc, &order)?;
    info!("Arranged {} pages in booklet order", order.len());
    Ok(doc)
}

fn reorder_pages_sync<F>(mut doc: Document, order_fn: F) -> Result<Document>
where
    F: FnOnce(&[ObjectId]) -> Result<Vec<ObjectId>>,
{
    let pages = page_ids(&doc);
    if pages.is_empty() {
        return Err(PagesError::NoPages);
    }

    let order = order_fn(&pages)?;
    check_permutation(&pages, &order)?;

    debug!("Rewriting page tree with {} pages", order.len());
    rewrite_page_order(&mut doc, &order)?;
    Ok(doc)
}

fn check_permutation(pages: &[ObjectId], order: &[ObjectId]) -> Result<()> {
    let known: HashSet<ObjectId> = pages.iter().copied().collect();
    let mut seen = HashSet::new();

    for id in order {
        if !known.contains(id) || !seen.insert(*id) {
            return Err(PagesError::Structure(format!(
                "Page order refers to {:?} more than once or not at all",
                id
            )));
        }
    }

    if seen.len() != known.len() {
        return Err(PagesError::Structure(format!(
            "Page order has {} of {} pages",
            seen.len(),
            known.len()
        )));
    }

    Ok(())
}

//! Reading and writing whole documents
//!
//! Every driver in this crate works on an in-memory [`Document`]. Parsing
//! and serializing are CPU bound, so they run on the blocking pool while the
//! file itself is read and written with `tokio::fs`. Saved files always have
//! their streams compressed, which keeps booklet output close to the size of
//! its source even after blank pages are added.

use crate::types::*;
use log::debug;
use lopdf::Document;
use std::path::Path;

/// Load a PDF from disk
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

/// Save a document, compressing its streams first
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = tokio::task::spawn_blocking(move || {
        doc.compress();
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, PagesError>(writer)
    })
    .await??;
    debug!("Writing {} bytes to {}", bytes.len(), path.display());
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Number of pages in a PDF file
pub async fn count_pages(path: impl AsRef<Path>) -> Result<usize> {
    let doc = load_pdf(path).await?;
    Ok(doc.get_pages().len())
}

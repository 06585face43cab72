//! `lopdf` collaborators
//!
//! The pure sequencing and outline code in this crate never touches a PDF.
//! This module applies it to real documents:
//! 1. Load and save documents
//! 2. Reorder the page tree (booklet and reading order)
//! 3. Read, write and remove outlines
//! 4. Count pages over files and directories

mod blank;
mod io;
mod outline;
mod pages;
mod reorder;
mod stats;

pub use io::{count_pages, load_pdf, save_pdf};
pub use outline::{read_outline, remove_outline, write_outline};
pub use reorder::{make_booklet, reorder_pages, restore_booklet};
pub use stats::collect_page_statistics;

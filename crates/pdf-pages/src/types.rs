use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagesError {
    #[error("Page count must be a multiple of 4, got {len}")]
    InvalidLength { len: usize },
    #[error("Outline page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: i64, page_count: u32 },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Malformed document structure: {0}")]
    Structure(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages in document")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, PagesError>;

/// Number of pages found in a single PDF file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageCount {
    pub path: PathBuf,
    pub pages: usize,
}

/// A file that could not be read while collecting statistics
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Page statistics over a set of files and directories
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageStatistics {
    /// Successfully read files, in traversal order
    pub files: Vec<PageCount>,
    /// Files that looked like PDFs but could not be loaded
    pub failures: Vec<StatFailure>,
}

impl PageStatistics {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn page_count(&self) -> usize {
        self.files.iter().map(|f| f.pages).sum()
    }
}

//! Page counting over files and directory trees

use super::io::count_pages;
use crate::types::*;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Count pages of every PDF under `paths`.
///
/// Files are counted directly; directories are searched recursively for
/// `*.pdf` (any case). Anything that cannot be read is recorded in
/// [`PageStatistics::failures`] and the run continues.
pub async fn collect_page_statistics<P: AsRef<Path>>(paths: &[P]) -> PageStatistics {
    let mut stats = PageStatistics::default();

    for path in paths {
        let path = path.as_ref();
        let files = match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => match find_pdf_files(path).await {
                Ok(files) => files,
                Err(e) => {
                    record_failure(&mut stats, path, &e);
                    continue;
                }
            },
            Ok(_) => vec![path.to_path_buf()],
            Err(e) => {
                record_failure(&mut stats, path, &e.into());
                continue;
            }
        };

        for file in files {
            match count_pages(&file).await {
                Ok(pages) => {
                    debug!("{}: {} pages", file.display(), pages);
                    stats.files.push(PageCount { path: file, pages });
                }
                Err(e) => record_failure(&mut stats, &file, &e),
            }
        }
    }

    stats
}

fn record_failure(stats: &mut PageStatistics, path: &Path, error: &PagesError) {
    warn!("Skipping {}: {}", path.display(), error);
    stats.failures.push(StatFailure {
        path: path.to_path_buf(),
        reason: error.to_string(),
    });
}

/// Every PDF below `dir`, sorted by path
async fn find_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&current).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
            } else if is_pdf(&path) {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

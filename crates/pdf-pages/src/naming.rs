//! Output path derivation
//!
//! Commands never overwrite their input. Outputs are written next to it as
//! `<stem>_yymmdd_HHMMSS<ext>`; running a command on its own output replaces
//! the old timestamp instead of stacking a second one.

use crate::constants::{PLAIN_OUTPUT_SUFFIX, TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static TIMESTAMP_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d{6}_\d{6}$").expect("valid timestamp pattern"));

/// Derive a timestamped sibling of `path` using the current local time.
///
/// `extension` replaces the input's extension when given (without the dot).
pub fn timestamped_path(path: &Path, extension: Option<&str>) -> PathBuf {
    timestamped_path_at(path, extension, Local::now().naive_local())
}

/// Derive a timestamped sibling of `path` for a fixed point in time
pub fn timestamped_path_at(path: &Path, extension: Option<&str>, now: NaiveDateTime) -> PathBuf {
    let stem = file_stem(path);
    let stem = TIMESTAMP_SUFFIX.replace(&stem, "");
    let suffix = now.format(TIMESTAMP_FORMAT).to_string();
    sibling(path, &format!("{}{}", stem, suffix), extension)
}

/// Derive an output path, timestamped or with a plain `_new` suffix
pub fn derived_path(path: &Path, extension: Option<&str>, timestamped: bool) -> PathBuf {
    if timestamped {
        timestamped_path(path, extension)
    } else {
        let stem = file_stem(path);
        sibling(path, &format!("{}{}", stem, PLAIN_OUTPUT_SUFFIX), extension)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sibling(path: &Path, stem: &str, extension: Option<&str>) -> PathBuf {
    let extension = extension
        .map(str::to_owned)
        .or_else(|| path.extension().map(|e| e.to_string_lossy().into_owned()));
    let name = match extension {
        Some(ext) if !ext.is_empty() => format!("{}.{}", stem, ext),
        _ => stem.to_string(),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 20)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap()
    }

    #[test]
    fn test_appends_timestamp() {
        let path = timestamped_path_at(Path::new("docs/report.pdf"), None, at());
        assert_eq!(path, PathBuf::from("docs/report_250120_090530.pdf"));
    }

    #[test]
    fn test_replaces_existing_timestamp() {
        let path = timestamped_path_at(Path::new("report_241231_235959.pdf"), None, at());
        assert_eq!(path, PathBuf::from("report_250120_090530.pdf"));
    }

    #[test]
    fn test_overrides_extension() {
        let path = timestamped_path_at(Path::new("book.pdf"), Some("txt"), at());
        assert_eq!(path, PathBuf::from("book_250120_090530.txt"));
    }

    #[test]
    fn test_plain_suffix() {
        let path = derived_path(Path::new("a/book.pdf"), None, false);
        assert_eq!(path, PathBuf::from("a/book_new.pdf"));
    }

    #[test]
    fn test_no_extension() {
        let path = timestamped_path_at(Path::new("outline"), None, at());
        assert_eq!(path, PathBuf::from("outline_250120_090530"));
    }
}

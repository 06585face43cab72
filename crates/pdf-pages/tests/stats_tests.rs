mod common;

use common::*;
use pdf_pages::*;

#[tokio::test]
async fn test_directory_is_scanned_recursively() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    write_pdf(&mut create_test_pdf(3), &dir.path().join("one.pdf"));
    write_pdf(&mut create_test_pdf(5), &nested.join("two.PDF"));
    std::fs::write(dir.path().join("notes.txt"), "not a pdf").unwrap();

    let stats = collect_page_statistics(&[dir.path()]).await;

    assert_eq!(stats.file_count(), 2);
    assert_eq!(stats.page_count(), 8);
    assert!(stats.failures.is_empty());
}

#[tokio::test]
async fn test_files_are_counted_directly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.pdf");
    write_pdf(&mut create_test_pdf(4), &path);

    let stats = collect_page_statistics(&[&path]).await;

    assert_eq!(stats.files, vec![PageCount { path, pages: 4 }]);
}

#[tokio::test]
async fn test_unreadable_files_are_recorded() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(&mut create_test_pdf(2), &dir.path().join("good.pdf"));
    std::fs::write(dir.path().join("broken.pdf"), b"this is not a pdf").unwrap();
    let missing = dir.path().join("missing.pdf");

    let stats = collect_page_statistics(&[dir.path().to_path_buf(), missing.clone()]).await;

    assert_eq!(stats.file_count(), 1);
    assert_eq!(stats.page_count(), 2);
    assert_eq!(stats.failures.len(), 2);
    assert_eq!(stats.failures[0].path, dir.path().join("broken.pdf"));
    assert_eq!(stats.failures[1].path, missing);
}

#[tokio::test]
async fn test_results_follow_path_order() {
    let dir = tempfile::tempdir().unwrap();
    for (name, pages) in [("c.pdf", 1), ("a.pdf", 2), ("b.pdf", 3)] {
        write_pdf(&mut create_test_pdf(pages), &dir.path().join(name));
    }

    let stats = collect_page_statistics(&[dir.path()]).await;
    let pages: Vec<usize> = stats.files.iter().map(|f| f.pages).collect();

    assert_eq!(pages, vec![2, 3, 1]);
}

#[tokio::test]
async fn test_empty_input() {
    let paths: [&std::path::Path; 0] = [];
    let stats = collect_page_statistics(&paths).await;
    assert_eq!(stats, PageStatistics::default());
}

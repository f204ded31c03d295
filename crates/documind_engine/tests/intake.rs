use std::fs;

use documind_engine::{describe_file, describe_files, guess_mime_type, IntakeError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn describes_file_from_metadata() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Contract_2024.pdf");
    fs::write(&path, vec![0u8; 1536]).unwrap();

    let file = describe_file(&path).unwrap();
    assert_eq!(file.name, "Contract_2024.pdf");
    assert_eq!(file.mime_type, "application/pdf");
    assert_eq!(file.size_bytes, 1536);
}

#[test]
fn mime_type_follows_extension_case_insensitively() {
    assert_eq!(guess_mime_type("scan.JPEG"), "image/jpeg");
    assert_eq!(guess_mime_type("notes.txt"), "text/plain");
    assert_eq!(
        guess_mime_type("offer.docx"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(guess_mime_type("archive.zip"), "application/octet-stream");
    assert_eq!(guess_mime_type("README"), "application/octet-stream");
}

#[test]
fn missing_paths_and_directories_are_reported_separately() {
    let temp = TempDir::new().unwrap();
    let good = temp.path().join("a.txt");
    fs::write(&good, "hello").unwrap();
    let missing = temp.path().join("missing.pdf");

    let (files, errors) = describe_files(&[missing.clone(), good, temp.path().to_path_buf()]);

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "a.txt");
    assert_eq!(errors.len(), 2);
    assert!(matches!(&errors[0], IntakeError::NotFound(p) if *p == missing));
    assert!(matches!(&errors[1], IntakeError::NotAFile(_)));
}

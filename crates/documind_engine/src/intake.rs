use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use documind_core::IncomingFile;
use documind_logging::dm_debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Mime type guessed from the file extension; unknown extensions are octet streams.
pub fn guess_mime_type(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Builds an upload descriptor from file metadata. The content is never read.
pub fn describe_file(path: &Path) -> Result<IncomingFile, IntakeError> {
    let meta = fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => IntakeError::NotFound(path.to_path_buf()),
        _ => IntakeError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if !meta.is_file() {
        return Err(IntakeError::NotAFile(path.to_path_buf()));
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| IntakeError::NotAFile(path.to_path_buf()))?;
    let mime_type = guess_mime_type(&name);
    dm_debug!("Described {} ({}, {} bytes)", name, mime_type, meta.len());
    Ok(IncomingFile::new(name, mime_type, meta.len()))
}

/// Describes every path, keeping input order. Failures are returned separately
/// so one bad path does not drop the rest of the batch.
pub fn describe_files<P: AsRef<Path>>(paths: &[P]) -> (Vec<IncomingFile>, Vec<IntakeError>) {
    let mut files = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();
    for path in paths {
        match describe_file(path.as_ref()) {
            Ok(file) => files.push(file),
            Err(err) => errors.push(err),
        }
    }
    (files, errors)
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use documind_core::{ActionKind, ActionResult, GeneratedContract};
use documind_logging::dm_info;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use export directory {}: {source}", .dir.display())]
    ExportDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("export path has no file name: {}", .0.display())]
    NoFileName(PathBuf),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Serialize)]
struct ReportFile<'a> {
    format_version: u32,
    kind: ActionKind,
    #[serde(flatten)]
    result: &'a ActionResult,
}

/// File name used when the user exports without naming a file.
pub fn default_report_filename(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Summary => "summary-report.json",
        ActionKind::Extract => "extraction-report.json",
        ActionKind::Compare => "comparison-report.json",
    }
}

/// Serialises `result` as pretty JSON to `path`, replacing any existing file.
pub fn export_report(result: &ActionResult, path: &Path) -> Result<PathBuf, PersistError> {
    let body = serde_json::to_string_pretty(&ReportFile {
        format_version: 1,
        kind: result.kind(),
        result,
    })?;
    let written = write_at(path, &body)?;
    dm_info!("Exported {} to {}", result.title, written.display());
    Ok(written)
}

/// Writes the generated contract text to `path`.
pub fn export_contract(contract: &GeneratedContract, path: &Path) -> Result<PathBuf, PersistError> {
    let written = write_at(path, &contract.content)?;
    dm_info!(
        "Exported contract from template '{}' to {}",
        contract.template_id,
        written.display()
    );
    Ok(written)
}

/// Replaces `path` with `content` in one step. The bytes go to a temp file
/// beside the target which is then renamed over it, so a failed export never
/// leaves a truncated file behind.
fn write_at(path: &Path, content: &str) -> Result<PathBuf, PersistError> {
    if path.file_name().is_none() {
        return Err(PersistError::NoFileName(path.to_path_buf()));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir_error = |source| PersistError::ExportDir {
        dir: dir.to_path_buf(),
        source,
    };
    fs::create_dir_all(dir).map_err(dir_error)?;

    let mut staged = NamedTempFile::new_in(dir).map_err(dir_error)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| PersistError::Io(e.error))?;
    Ok(path.to_path_buf())
}

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::ParseNameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Department {
    Sales,
    Legal,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    Operations,
    Title,
    #[default]
    General,
}

impl Department {
    pub fn label(self) -> &'static str {
        match self {
            Department::Sales => "Sales",
            Department::Legal => "Legal",
            Department::Hr => "HR",
            Department::Finance => "Finance",
            Department::Operations => "Operations",
            Department::Title => "Title",
            Department::General => "General",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::fixtures::DEPARTMENTS
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError {
                what: "department",
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file picked by the user. Only metadata crosses into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub uploaded_at: NaiveDateTime,
    pub department: Department,
}

/// True when the file name ends in one of `accepted` (case-insensitive, no dot).
pub fn is_accepted_file(name: &str, accepted: &[String]) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            accepted.iter().any(|a| a.eq_ignore_ascii_case(ext))
        }
        _ => false,
    }
}

/// Uploaded documents in upload order plus the current selection.
///
/// The selection only ever holds ids of registered documents; `delete` drops
/// the id from both in one call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DocumentRegistry {
    documents: Vec<DocumentRecord>,
    /// Selection in the order documents were picked.
    selected: Vec<DocumentId>,
    next_seq: u64,
}

impl DocumentRegistry {
    pub(crate) fn upload(
        &mut self,
        files: Vec<IncomingFile>,
        department: Department,
        at: NaiveDateTime,
    ) -> Vec<DocumentId> {
        let millis = at.and_utc().timestamp_millis();
        let mut ids = Vec::with_capacity(files.len());
        for file in files {
            self.next_seq += 1;
            let id = DocumentId(format!("{millis}-{}-{}", self.next_seq, file.name));
            ids.push(id.clone());
            self.documents.push(DocumentRecord {
                id,
                name: file.name,
                mime_type: file.mime_type,
                size_bytes: file.size_bytes,
                uploaded_at: at,
                department,
            });
        }
        ids
    }

    pub(crate) fn select(&mut self, id: &DocumentId) -> bool {
        if !self.contains(id) || self.is_selected(id) {
            return false;
        }
        self.selected.push(id.clone());
        true
    }

    pub(crate) fn deselect(&mut self, id: &DocumentId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        self.selected.len() != before
    }

    pub(crate) fn toggle(&mut self, id: &DocumentId) -> bool {
        if self.is_selected(id) {
            self.deselect(id)
        } else {
            self.select(id)
        }
    }

    pub(crate) fn delete(&mut self, id: &DocumentId) -> Option<DocumentRecord> {
        let index = self.documents.iter().position(|d| &d.id == id)?;
        self.selected.retain(|s| s != id);
        Some(self.documents.remove(index))
    }

    pub(crate) fn contains(&self, id: &DocumentId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: &DocumentId) -> Option<&DocumentRecord> {
        self.documents.iter().find(|d| &d.id == id)
    }

    pub(crate) fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub(crate) fn selected_ids(&self) -> &[DocumentId] {
        &self.selected
    }

    pub(crate) fn is_selected(&self, id: &DocumentId) -> bool {
        self.selected.contains(id)
    }

    pub(crate) fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Names of the selected documents in registry order.
    pub(crate) fn selected_names(&self) -> Vec<String> {
        self.documents
            .iter()
            .filter(|d| self.is_selected(&d.id))
            .map(|d| d.name.clone())
            .collect()
    }

    /// Names for the given ids in the given order, skipping unknown ids.
    pub(crate) fn names_of(&self, ids: &[DocumentId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.get(id))
            .map(|d| d.name.clone())
            .collect()
    }
}

use chrono::NaiveDateTime;

use crate::{
    ActionResult, ActiveView, ChatMessage, Department, DocumentId, Notification, Overlay,
};

/// Which action triggers are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionAvailability {
    pub summarize: bool,
    pub extract: bool,
    pub compare: bool,
    pub generate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub active_view: ActiveView,
    pub department: Department,
    pub documents: Vec<DocumentRow>,
    pub selected_count: usize,
    pub processing: bool,
    pub actions: ActionAvailability,
    pub result: Option<ActionResult>,
    pub chat: Vec<ChatMessage>,
    pub chat_visible: bool,
    pub awaiting_reply: bool,
    pub queued_messages: usize,
    pub overlay: Option<Overlay>,
    pub notification: Option<Notification>,
    pub generator_template: Option<String>,
    /// Filter applied to the template library.
    pub template_search: String,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    pub id: DocumentId,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub uploaded_at: NaiveDateTime,
    pub department: Department,
    pub selected: bool,
}

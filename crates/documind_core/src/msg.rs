use chrono::NaiveDateTime;

use crate::{ActiveView, Department, DocumentId, IncomingFile, Notification, Overlay, TimerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped files.
    FilesUploaded {
        files: Vec<IncomingFile>,
        at: NaiveDateTime,
    },
    DocumentSelected(DocumentId),
    DocumentDeselected(DocumentId),
    /// User clicked a document card's checkbox.
    DocumentToggled(DocumentId),
    DocumentDeleted(DocumentId),
    DepartmentChanged(Department),
    SummarizeClicked,
    ExtractClicked,
    CompareClicked,
    /// User submitted the contract generator form.
    GenerateContract {
        template_id: String,
        document_ids: Vec<DocumentId>,
        description: String,
    },
    /// User closed the action result panel.
    ResultDismissed,
    ChatSubmitted {
        text: String,
        at: NaiveDateTime,
    },
    /// User showed or hid the assistant panel.
    ChatToggled,
    ViewChanged(ActiveView),
    OverlayOpened(Overlay),
    OverlayClosed,
    /// User typed in the template library search box.
    TemplateSearchChanged(String),
    /// User picked "Use template" in the library or preview.
    TemplateUsed(String),
    Notify(Notification),
    NotificationDismissed,
    /// A timer started through `Effect::StartTimer` elapsed.
    TimerFired {
        timer: TimerId,
        at: NaiveDateTime,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseNameError;
use crate::simulator::GeneratedContract;
use crate::{DocumentId, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Documents,
    Templates,
    Generate,
    Analytics,
    Info,
}

impl ActiveView {
    pub const ALL: [ActiveView; 5] = [
        ActiveView::Documents,
        ActiveView::Templates,
        ActiveView::Generate,
        ActiveView::Analytics,
        ActiveView::Info,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ActiveView::Documents => "documents",
            ActiveView::Templates => "templates",
            ActiveView::Generate => "generate",
            ActiveView::Analytics => "analytics",
            ActiveView::Info => "info",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveView::Documents => "Documents",
            ActiveView::Templates => "Templates",
            ActiveView::Generate => "Generate",
            ActiveView::Analytics => "Analytics",
            ActiveView::Info => "How It Helps",
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActiveView {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveView::ALL
            .into_iter()
            .find(|v| v.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError {
                what: "view",
                name: s.to_string(),
            })
    }
}

/// The single modal drawn above the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    ViewDocument(DocumentId),
    PreviewTemplate(String),
    GeneratedContract(GeneratedContract),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Active view, at most one overlay, at most one notification with its expiry timer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Navigator {
    active_view: ActiveView,
    overlay: Option<Overlay>,
    notification: Option<(Notification, TimerId)>,
}

impl Navigator {
    pub(crate) fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub(crate) fn set_view(&mut self, view: ActiveView) -> bool {
        let changed = self.active_view != view;
        self.active_view = view;
        changed
    }

    pub(crate) fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Returns the overlay that was replaced, if any.
    pub(crate) fn open_overlay(&mut self, overlay: Overlay) -> Option<Overlay> {
        self.overlay.replace(overlay)
    }

    pub(crate) fn close_overlay(&mut self) -> Option<Overlay> {
        self.overlay.take()
    }

    pub(crate) fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().map(|(n, _)| n)
    }

    /// Shows `notification`, returning the expiry timer of the one it replaced.
    pub(crate) fn show(&mut self, notification: Notification, timer: TimerId) -> Option<TimerId> {
        self.notification
            .replace((notification, timer))
            .map(|(_, previous)| previous)
    }

    /// Returns the expiry timer that should be cancelled.
    pub(crate) fn dismiss(&mut self) -> Option<TimerId> {
        self.notification.take().map(|(_, timer)| timer)
    }

    /// Clears the notification only if `timer` is its current expiry timer.
    pub(crate) fn expire(&mut self, timer: TimerId) -> bool {
        match &self.notification {
            Some((_, current)) if *current == timer => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }
}

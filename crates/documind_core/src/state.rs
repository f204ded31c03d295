use chrono::NaiveDateTime;

use crate::chat::{time_label, ChatEngine};
use crate::navigation::Navigator;
use crate::registry::DocumentRegistry;
use crate::simulator::ActionSimulator;
use crate::view_model::{ActionAvailability, AppViewModel, DocumentRow};
use crate::{
    ActionKind, ActionResult, ActiveView, ChatMessage, Department, DocumentId, DocumentRecord,
    Effect, Notification, Overlay, Settings, TimerId,
};

/// The whole application state. Mutated only through `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) settings: Settings,
    pub(crate) registry: DocumentRegistry,
    pub(crate) simulator: ActionSimulator,
    pub(crate) chat: ChatEngine,
    pub(crate) navigator: Navigator,
    pub(crate) department: Department,
    /// Template chosen from the library for the generator form.
    pub(crate) generator_template: Option<String>,
    pub(crate) template_search: String,
    next_timer: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::build(settings, String::new())
    }

    /// State whose greeting is stamped with the session start time.
    pub fn started_at(settings: Settings, at: NaiveDateTime) -> Self {
        Self::build(settings, time_label(at))
    }

    fn build(settings: Settings, greeting_label: String) -> Self {
        Self {
            settings,
            registry: DocumentRegistry::default(),
            simulator: ActionSimulator::default(),
            chat: ChatEngine::new(greeting_label),
            navigator: Navigator::default(),
            department: Department::default(),
            generator_template: None,
            template_search: String::new(),
            next_timer: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let selected = self.registry.selected_count();
        let idle = !self.simulator.is_processing();
        AppViewModel {
            active_view: self.navigator.active_view(),
            department: self.department,
            documents: self
                .registry
                .documents()
                .iter()
                .map(|doc| DocumentRow {
                    id: doc.id.clone(),
                    name: doc.name.clone(),
                    mime_type: doc.mime_type.clone(),
                    size_bytes: doc.size_bytes,
                    uploaded_at: doc.uploaded_at,
                    department: doc.department,
                    selected: self.registry.is_selected(&doc.id),
                })
                .collect(),
            selected_count: selected,
            processing: self.simulator.is_processing(),
            actions: ActionAvailability {
                summarize: idle && ActionKind::Summary.check_selection(selected).is_ok(),
                extract: idle && ActionKind::Extract.check_selection(selected).is_ok(),
                compare: idle && ActionKind::Compare.check_selection(selected).is_ok(),
                generate: idle,
            },
            result: self.simulator.result().cloned(),
            chat: self.chat.messages().to_vec(),
            chat_visible: self.chat.is_visible(),
            awaiting_reply: self.chat.is_awaiting_reply(),
            queued_messages: self.chat.queued_len(),
            overlay: self.navigator.overlay().cloned(),
            notification: self.navigator.notification().cloned(),
            generator_template: self.generator_template.clone(),
            template_search: self.template_search.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        self.registry.documents()
    }

    pub fn document(&self, id: &DocumentId) -> Option<&DocumentRecord> {
        self.registry.get(id)
    }

    pub fn selected_ids(&self) -> &[DocumentId] {
        self.registry.selected_ids()
    }

    pub fn is_processing(&self) -> bool {
        self.simulator.is_processing()
    }

    pub fn action_result(&self) -> Option<&ActionResult> {
        self.simulator.result()
    }

    pub fn chat_messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    pub fn active_view(&self) -> ActiveView {
        self.navigator.active_view()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.navigator.overlay()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.navigator.notification()
    }

    pub fn department(&self) -> Department {
        self.department
    }

    pub(crate) fn allocate_timer(&mut self) -> TimerId {
        let timer = TimerId(self.next_timer);
        self.next_timer += 1;
        timer
    }

    /// Replaces the visible notification and arms its expiry timer.
    pub(crate) fn notify(&mut self, notification: Notification, effects: &mut Vec<Effect>) {
        let timer = self.allocate_timer();
        if let Some(previous) = self.navigator.show(notification, timer) {
            effects.push(Effect::CancelTimer { timer: previous });
        }
        effects.push(Effect::StartTimer {
            timer,
            delay: self.settings.notification_timeout,
        });
        self.mark_dirty();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Once;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use documind_core::{
    update, AppState, Department, Effect, IncomingFile, Msg, NotificationKind, Overlay, Settings,
    Simulation,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(documind_logging::initialize_for_tests);
}

fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid origin")
}

fn files(names: &[&str]) -> Vec<IncomingFile> {
    names
        .iter()
        .map(|name| IncomingFile::new(*name, "application/pdf", 2048))
        .collect()
}

#[test]
fn upload_appends_in_input_order_with_unique_ids() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.upload(files(&["a.pdf", "b.pdf"]));
    sim.upload(files(&["c.pdf", "a.pdf"]));

    let docs = sim.state().documents();
    let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf", "a.pdf"]);

    let mut ids: Vec<_> = docs.iter().map(|d| d.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert!(sim.state().selected_ids().is_empty());
}

#[test]
fn upload_tags_current_department_and_notifies() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::DepartmentChanged(Department::Legal));
    let (mut state, effects) = update(
        state,
        Msg::FilesUploaded {
            files: files(&["nda.pdf"]),
            at: origin(),
        },
    );

    assert_eq!(state.documents()[0].department, Department::Legal);
    assert_eq!(state.documents()[0].uploaded_at, origin());
    let notification = state.notification().expect("notification");
    assert_eq!(notification.message, "Document(s) uploaded successfully");
    assert_eq!(notification.kind, NotificationKind::Success);
    assert!(matches!(effects.as_slice(), [Effect::StartTimer { .. }]));
    assert!(state.consume_dirty());
}

#[test]
fn empty_upload_is_noop() {
    init_logging();
    let state = AppState::new();
    let (mut next, effects) = update(
        state.clone(),
        Msg::FilesUploaded {
            files: Vec::new(),
            at: origin(),
        },
    );
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, state);
}

#[test]
fn permissive_upload_accepts_any_extension() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.upload(files(&["archive.zip"]));
    assert_eq!(sim.state().documents().len(), 1);
}

#[test]
fn enforced_upload_rejects_unlisted_extensions() {
    init_logging();
    let settings = Settings {
        enforce_accepted_extensions: true,
        ..Settings::default()
    };
    let mut sim = Simulation::new(settings, origin());
    sim.upload(files(&["ok.pdf", "bad.exe", "photo.PNG"]));

    let names: Vec<_> = sim
        .state()
        .documents()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["ok.pdf", "photo.PNG"]);
    let notification = sim.state().notification().expect("notification");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Unsupported file type: bad.exe");
}

#[test]
fn toggle_selects_and_deselects() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.upload(files(&["a.pdf"]));
    let id = sim.state().documents()[0].id.clone();

    sim.dispatch(Msg::DocumentToggled(id.clone()));
    assert_eq!(sim.state().selected_ids(), &[id.clone()]);
    sim.dispatch(Msg::DocumentToggled(id.clone()));
    assert!(sim.state().selected_ids().is_empty());

    sim.dispatch(Msg::DocumentSelected(id.clone()));
    sim.dispatch(Msg::DocumentSelected(id.clone()));
    assert_eq!(sim.state().selected_ids().len(), 1);
    sim.dispatch(Msg::DocumentDeselected(id));
    assert!(sim.state().selected_ids().is_empty());
}

#[test]
fn selecting_unknown_id_changes_nothing() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.consume_dirty();
    let effects = sim.dispatch(Msg::DocumentSelected(documind_core::DocumentId::new("ghost")));
    assert!(effects.is_empty());
    assert!(sim.state().selected_ids().is_empty());
    assert!(!sim.consume_dirty());
}

#[test]
fn deleting_selected_document_clears_selection_in_same_step() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.upload(files(&["a.pdf", "b.pdf"]));
    let a = sim.state().documents()[0].id.clone();
    let b = sim.state().documents()[1].id.clone();
    sim.dispatch(Msg::DocumentSelected(a.clone()));
    sim.dispatch(Msg::DocumentSelected(b.clone()));

    sim.dispatch(Msg::DocumentDeleted(a.clone()));

    assert!(sim.state().document(&a).is_none());
    assert_eq!(sim.state().selected_ids(), &[b]);
    assert_eq!(
        sim.state().notification().map(|n| n.message.as_str()),
        Some("Document deleted")
    );
}

#[test]
fn deleting_unknown_document_is_noop() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.upload(files(&["a.pdf"]));
    sim.advance(Duration::from_secs(5));
    sim.consume_dirty();

    let effects = sim.dispatch(Msg::DocumentDeleted(documind_core::DocumentId::new("ghost")));

    assert!(effects.is_empty());
    assert_eq!(sim.state().documents().len(), 1);
    assert_eq!(sim.state().notification(), None);
    assert!(!sim.consume_dirty());
}

#[test]
fn deleting_viewed_document_closes_its_overlay() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.upload(files(&["a.pdf", "b.pdf"]));
    let a = sim.state().documents()[0].id.clone();
    let b = sim.state().documents()[1].id.clone();

    sim.dispatch(Msg::OverlayOpened(Overlay::ViewDocument(a.clone())));
    sim.dispatch(Msg::DocumentDeleted(b));
    assert_eq!(sim.state().overlay(), Some(&Overlay::ViewDocument(a.clone())));

    sim.dispatch(Msg::DocumentDeleted(a));
    assert_eq!(sim.state().overlay(), None);
}

#[test]
fn view_model_marks_selected_rows() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.upload(files(&["a.pdf", "b.pdf"]));
    let b = sim.state().documents()[1].id.clone();
    sim.dispatch(Msg::DocumentSelected(b));

    let view = sim.state().view();
    let flags: Vec<_> = view.documents.iter().map(|row| row.selected).collect();
    assert_eq!(flags, vec![false, true]);
    assert_eq!(view.selected_count, 1);
}

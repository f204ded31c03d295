use chrono::NaiveDateTime;
use documind_logging::{dm_debug, dm_info, dm_warn};

use crate::registry::is_accepted_file;
use crate::simulator::Resolution;
use crate::{
    fixtures, ActionKind, ActiveView, AppState, CommandError, DocumentId, Effect, IncomingFile,
    Msg, Notification, Overlay, TimerId,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    let outcome = match msg {
        Msg::FilesUploaded { files, at } => upload(&mut state, files, at, &mut effects),
        Msg::DocumentSelected(id) => {
            if state.registry.select(&id) {
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::DocumentDeselected(id) => {
            if state.registry.deselect(&id) {
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::DocumentToggled(id) => {
            if state.registry.toggle(&id) {
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::DocumentDeleted(id) => {
            delete(&mut state, &id, &mut effects);
            Ok(())
        }
        Msg::DepartmentChanged(department) => {
            if state.department != department {
                state.department = department;
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::SummarizeClicked => start_action(&mut state, ActionKind::Summary, &mut effects),
        Msg::ExtractClicked => start_action(&mut state, ActionKind::Extract, &mut effects),
        Msg::CompareClicked => start_action(&mut state, ActionKind::Compare, &mut effects),
        Msg::GenerateContract {
            template_id,
            document_ids,
            description,
        } => start_contract(
            &mut state,
            &template_id,
            &document_ids,
            description,
            &mut effects,
        ),
        Msg::ResultDismissed => {
            if state.simulator.dismiss_result() {
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::ChatSubmitted { text, at } => {
            submit_chat(&mut state, text, at, &mut effects);
            Ok(())
        }
        Msg::ChatToggled => {
            state.chat.toggle_visible();
            state.mark_dirty();
            Ok(())
        }
        Msg::ViewChanged(view) => {
            if state.navigator.set_view(view) {
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::OverlayOpened(overlay) => {
            open_overlay(&mut state, overlay);
            Ok(())
        }
        Msg::OverlayClosed => {
            if state.navigator.close_overlay().is_some() {
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::TemplateSearchChanged(term) => {
            if state.template_search != term {
                state.template_search = term;
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::TemplateUsed(template_id) => {
            use_template(&mut state, template_id, &mut effects);
            Ok(())
        }
        Msg::Notify(notification) => {
            state.notify(notification, &mut effects);
            Ok(())
        }
        Msg::NotificationDismissed => {
            if let Some(timer) = state.navigator.dismiss() {
                effects.push(Effect::CancelTimer { timer });
                state.mark_dirty();
            }
            Ok(())
        }
        Msg::TimerFired { timer, at } => {
            timer_fired(&mut state, timer, at, &mut effects);
            Ok(())
        }
        Msg::Tick | Msg::NoOp => Ok(()),
    };

    if let Err(err) = outcome {
        report(&mut state, err, &mut effects);
    }

    (state, effects)
}

fn report(state: &mut AppState, err: CommandError, effects: &mut Vec<Effect>) {
    match err {
        CommandError::Busy => dm_warn!("Ignoring command while processing"),
        err => {
            dm_warn!("Command rejected: {}", err);
            state.notify(Notification::error(err.to_string()), effects);
        }
    }
}

fn upload(
    state: &mut AppState,
    files: Vec<IncomingFile>,
    at: NaiveDateTime,
    effects: &mut Vec<Effect>,
) -> Result<(), CommandError> {
    if files.is_empty() {
        return Ok(());
    }
    let (accepted, rejected): (Vec<_>, Vec<_>) = if state.settings.enforce_accepted_extensions {
        let allow = &state.settings.accepted_extensions;
        files
            .into_iter()
            .partition(|f| is_accepted_file(&f.name, allow))
    } else {
        (files, Vec::new())
    };

    if !accepted.is_empty() {
        let ids = state.registry.upload(accepted, state.department, at);
        dm_info!(
            "Uploaded {} document(s) into department {}",
            ids.len(),
            state.department
        );
        state.mark_dirty();
        if rejected.is_empty() {
            state.notify(
                Notification::success("Document(s) uploaded successfully"),
                effects,
            );
        }
    }

    if rejected.is_empty() {
        Ok(())
    } else {
        Err(CommandError::UnsupportedFileType {
            names: rejected.into_iter().map(|f| f.name).collect(),
        })
    }
}

fn delete(state: &mut AppState, id: &DocumentId, effects: &mut Vec<Effect>) {
    let Some(removed) = state.registry.delete(id) else {
        dm_debug!("Delete of unknown document {} ignored", id);
        return;
    };
    dm_info!("Deleted document {} ({})", removed.id, removed.name);
    if matches!(state.navigator.overlay(), Some(Overlay::ViewDocument(open)) if open == id) {
        state.navigator.close_overlay();
    }
    state.mark_dirty();
    state.notify(Notification::success("Document deleted"), effects);
}

fn start_action(
    state: &mut AppState,
    kind: ActionKind,
    effects: &mut Vec<Effect>,
) -> Result<(), CommandError> {
    let source_documents = match kind {
        ActionKind::Summary => state.registry.names_of(state.registry.selected_ids()),
        ActionKind::Extract | ActionKind::Compare => state.registry.selected_names(),
    };
    let selected = state.registry.selected_count();
    let pending = state
        .simulator
        .prepare_action(kind, selected, source_documents)?;
    let timer = state.allocate_timer();
    state.simulator.start(pending, timer);
    dm_info!("Started {:?} on {}", kind, timer);
    effects.push(Effect::StartTimer {
        timer,
        delay: state.settings.action_delay,
    });
    state.mark_dirty();
    Ok(())
}

fn start_contract(
    state: &mut AppState,
    template_id: &str,
    document_ids: &[DocumentId],
    description: String,
    effects: &mut Vec<Effect>,
) -> Result<(), CommandError> {
    let source_documents = state.registry.names_of(document_ids);
    let pending = state
        .simulator
        .prepare_contract(template_id, source_documents, description)?;
    let timer = state.allocate_timer();
    state.simulator.start(pending, timer);
    dm_info!("Started contract generation from template '{}' on {}", template_id, timer);
    effects.push(Effect::StartTimer {
        timer,
        delay: state.settings.contract_delay,
    });
    state.mark_dirty();
    Ok(())
}

fn submit_chat(state: &mut AppState, text: String, at: NaiveDateTime, effects: &mut Vec<Effect>) {
    use crate::chat::Submission;

    match state.chat.submit(text) {
        Submission::Ignored => {}
        Submission::Queued => {
            dm_debug!("Chat message queued behind pending reply");
            state.mark_dirty();
        }
        Submission::Ready(text) => begin_exchange(state, text, at, effects),
    }
}

fn begin_exchange(state: &mut AppState, text: String, at: NaiveDateTime, effects: &mut Vec<Effect>) {
    let timer = state.allocate_timer();
    let placeholder = state.chat.begin_exchange(text, at, timer);
    dm_debug!("Awaiting reply {} on {}", placeholder, timer);
    effects.push(Effect::StartTimer {
        timer,
        delay: state.settings.chat_reply_delay,
    });
    state.mark_dirty();
}

fn open_overlay(state: &mut AppState, overlay: Overlay) {
    let known = match &overlay {
        Overlay::ViewDocument(id) => state.registry.contains(id),
        Overlay::PreviewTemplate(id) => fixtures::find_template(id).is_some(),
        Overlay::GeneratedContract(_) => true,
    };
    if !known {
        dm_warn!("Ignoring overlay for unknown target: {:?}", overlay);
        return;
    }
    state.navigator.open_overlay(overlay);
    state.mark_dirty();
}

fn use_template(state: &mut AppState, template_id: String, effects: &mut Vec<Effect>) {
    if fixtures::find_template(&template_id).is_none() {
        dm_warn!("Ignoring unknown template '{}'", template_id);
        return;
    }
    state.navigator.close_overlay();
    state.navigator.set_view(ActiveView::Generate);
    state.generator_template = Some(template_id);
    state.notify(
        Notification::success("Template selected. Fill in the details to generate."),
        effects,
    );
}

fn timer_fired(state: &mut AppState, timer: TimerId, at: NaiveDateTime, effects: &mut Vec<Effect>) {
    if state.navigator.expire(timer) {
        state.mark_dirty();
        return;
    }

    if let Some(resolution) = state.simulator.resolve(timer) {
        state.mark_dirty();
        match resolution {
            Resolution::Action(kind) => {
                dm_info!("{:?} finished", kind);
                state.notify(Notification::success(kind.success_message()), effects);
            }
            Resolution::Contract(contract) => {
                dm_info!("Contract generated from template '{}'", contract.template_id);
                state
                    .navigator
                    .open_overlay(Overlay::GeneratedContract(contract));
                state.notify(Notification::success("Contract generated successfully!"), effects);
                state.navigator.set_view(ActiveView::Documents);
            }
        }
        return;
    }

    if let Some(message) = state.chat.resolve(timer, at) {
        dm_debug!("Reply {} delivered", message);
        state.mark_dirty();
        if let Some(next) = state.chat.take_queued() {
            begin_exchange(state, next, at, effects);
        }
        return;
    }

    dm_debug!("Stale {} ignored", timer);
}

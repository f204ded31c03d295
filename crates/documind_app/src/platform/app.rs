use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use documind_core::{
    fixtures, update, ActiveView, AppState, AppViewModel, DocumentId, Msg, Notification, Overlay,
    Settings,
};
use documind_engine::{default_report_filename, describe_files, export_contract, export_report};
use documind_logging::{dm_debug, dm_info, dm_warn};

use super::command::{parse_command, Command, DocRef, HELP};
use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::render::render;

/// Everything the main loop reacts to, funnelled through one channel.
pub enum AppEvent {
    Input(String),
    InputClosed,
    Msg(Msg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path(std::env::args());
    let config = config::load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    logging::initialize(config.log_destination, config.level()?);
    dm_info!("DocuMind starting with config {}", config_path.display());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(event_tx.clone()).context("starting timer engine")?;
    spawn_input_reader(event_tx);

    let mut app = App::new(config.settings(), runner);
    println!("{HELP}");
    app.draw();

    while let Ok(event) = event_rx.recv() {
        let flow = match event {
            AppEvent::Msg(msg) => {
                app.dispatch(msg);
                Flow::Continue
            }
            AppEvent::Input(line) => app.handle_line(&line),
            AppEvent::InputClosed => Flow::Quit,
        };
        if flow == Flow::Quit {
            break;
        }
        if app.state.consume_dirty() {
            app.draw();
        }
    }

    dm_info!("DocuMind shutting down");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(settings: Settings, runner: EffectRunner) -> Self {
        Self {
            state: AppState::started_at(settings, now()),
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.dispatch(Msg::Notify(Notification::error(message)));
    }

    fn draw(&self) {
        let screen = render(&self.state.view(), now());
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\n{screen}> ");
        let _ = stdout.flush();
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => {
                self.draw();
                Flow::Continue
            }
            Err(err) => {
                dm_debug!("Rejected input {:?}: {}", line, err);
                self.notify_error(err.to_string());
                Flow::Continue
            }
        }
    }

    fn execute(&mut self, command: Command) -> Flow {
        let view = self.state.view();
        match command {
            Command::Upload(paths) => self.upload(&paths),
            Command::Select(refs) => self.for_each_doc(&view, &refs, Msg::DocumentSelected),
            Command::Deselect(refs) => self.for_each_doc(&view, &refs, Msg::DocumentDeselected),
            Command::Toggle(refs) => self.for_each_doc(&view, &refs, Msg::DocumentToggled),
            Command::Delete(doc) => self.for_each_doc(&view, &[doc], Msg::DocumentDeleted),
            Command::Open(doc) => self.for_each_doc(&view, &[doc], |id| {
                Msg::OverlayOpened(Overlay::ViewDocument(id))
            }),
            Command::Summarize => self.dispatch(Msg::SummarizeClicked),
            Command::Extract => self.dispatch(Msg::ExtractClicked),
            Command::Compare => self.dispatch(Msg::CompareClicked),
            Command::Generate {
                template_id,
                documents,
                description,
            } => {
                let template_id = template_id
                    .or_else(|| view.generator_template.clone())
                    .unwrap_or_default();
                let Some(document_ids) = resolve_all(&view, &documents) else {
                    self.notify_error("Unknown document reference.");
                    return Flow::Continue;
                };
                self.dispatch(Msg::GenerateContract {
                    template_id,
                    document_ids,
                    description: description
                        .unwrap_or_else(|| fixtures::DEFAULT_CONTRACT_DESCRIPTION.to_string()),
                });
            }
            Command::DismissResult => self.dispatch(Msg::ResultDismissed),
            Command::Ask(text) => self.dispatch(Msg::ChatSubmitted { text, at: now() }),
            Command::ToggleChat => self.dispatch(Msg::ChatToggled),
            Command::View(active) => self.dispatch(Msg::ViewChanged(active)),
            Command::Department(department) => self.dispatch(Msg::DepartmentChanged(department)),
            Command::Templates(term) => {
                self.dispatch(Msg::TemplateSearchChanged(term));
                self.dispatch(Msg::ViewChanged(ActiveView::Templates));
            }
            Command::Preview(id) => self.dispatch(Msg::OverlayOpened(Overlay::PreviewTemplate(id))),
            Command::UseTemplate(id) => self.dispatch(Msg::TemplateUsed(id)),
            Command::Close => self.dispatch(Msg::OverlayClosed),
            Command::DismissNotification => self.dispatch(Msg::NotificationDismissed),
            Command::Export(path) => self.export(&view, path.as_deref()),
            Command::Help => {
                println!("{HELP}");
                self.draw();
            }
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn upload(&mut self, paths: &[PathBuf]) {
        let (files, errors) = describe_files(paths);
        for err in &errors {
            dm_warn!("Upload skipped: {}", err);
        }
        self.dispatch(Msg::FilesUploaded { files, at: now() });
        if let Some(first) = errors.first() {
            self.notify_error(first.to_string());
        }
    }

    fn for_each_doc(&mut self, view: &AppViewModel, refs: &[DocRef], msg: impl Fn(DocumentId) -> Msg) {
        match resolve_all(view, refs) {
            Some(ids) => {
                for id in ids {
                    self.dispatch(msg(id));
                }
            }
            None => self.notify_error("Unknown document reference."),
        }
    }

    fn export(&mut self, view: &AppViewModel, path: Option<&Path>) {
        let outcome = match (&view.overlay, &view.result) {
            (Some(Overlay::GeneratedContract(contract)), _) => {
                let fallback = PathBuf::from(format!("contract-{}.txt", contract.template_id));
                export_contract(contract, path.unwrap_or(&fallback))
            }
            (_, Some(result)) => {
                let fallback = PathBuf::from(default_report_filename(result.kind()));
                export_report(result, path.unwrap_or(&fallback))
            }
            _ => {
                self.notify_error("Nothing to export yet.");
                return;
            }
        };
        match outcome {
            Ok(written) => self.dispatch(Msg::Notify(Notification::success(format!(
                "Exported to {}",
                written.display()
            )))),
            Err(err) => self.notify_error(format!("Export failed: {err}")),
        }
    }
}

fn resolve(view: &AppViewModel, doc: &DocRef) -> Option<DocumentId> {
    match doc {
        DocRef::Index(n) => view.documents.get(n.checked_sub(1)?).map(|row| row.id.clone()),
        DocRef::Id(raw) => {
            let id = DocumentId::new(raw.as_str());
            view.documents.iter().any(|row| row.id == id).then_some(id)
        }
    }
}

/// Resolves every reference, or `None` if any of them names no document.
fn resolve_all(view: &AppViewModel, refs: &[DocRef]) -> Option<Vec<DocumentId>> {
    refs.iter().map(|doc| resolve(view, doc)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use documind_core::{IncomingFile, Simulation};
    use pretty_assertions::assert_eq;

    fn view_with(names: &[&str]) -> AppViewModel {
        let origin = chrono::NaiveDate::from_ymd_opt(2025, 1, 15)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();
        let mut sim = Simulation::new(Settings::default(), origin);
        sim.upload(
            names
                .iter()
                .map(|n| IncomingFile::new(*n, "text/plain", 1))
                .collect(),
        );
        sim.state().view()
    }

    #[test]
    fn row_numbers_are_one_based() {
        let view = view_with(&["a.txt", "b.txt"]);
        assert_eq!(resolve(&view, &DocRef::Index(2)), Some(view.documents[1].id.clone()));
        assert_eq!(resolve(&view, &DocRef::Index(3)), None);
    }

    #[test]
    fn ids_must_exist() {
        let view = view_with(&["a.txt"]);
        let id = view.documents[0].id.clone();
        assert_eq!(resolve(&view, &DocRef::Id(id.as_str().to_string())), Some(id));
        assert_eq!(resolve(&view, &DocRef::Id("ghost".into())), None);
    }

    #[test]
    fn one_bad_reference_rejects_the_batch() {
        let view = view_with(&["a.txt", "b.txt"]);
        assert_eq!(
            resolve_all(&view, &[DocRef::Index(1), DocRef::Index(9)]),
            None
        );
        assert_eq!(
            resolve_all(&view, &[DocRef::Index(2), DocRef::Index(1)]).map(|ids| ids.len()),
            Some(2)
        );
    }
}

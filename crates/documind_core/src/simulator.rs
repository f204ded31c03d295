use serde::Serialize;

use crate::error::{CommandError, Precondition};
use crate::fixtures;
use crate::report::{ComparisonReport, ExtractionReport, SummaryReport};
use crate::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Summary,
    Extract,
    Compare,
}

impl ActionKind {
    pub fn title(self) -> &'static str {
        match self {
            ActionKind::Summary => "Document Summary",
            ActionKind::Extract => "Extracted Data",
            ActionKind::Compare => "Document Comparison",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            ActionKind::Summary => "Summary generated!",
            ActionKind::Extract => "Data extracted successfully!",
            ActionKind::Compare => "Comparison complete!",
        }
    }

    /// Checks the selection size this action needs.
    pub fn check_selection(self, selected: usize) -> Result<(), CommandError> {
        let (ok, precondition) = match self {
            ActionKind::Summary => (selected == 1, Precondition::ExactlyOneSelected),
            ActionKind::Extract => (selected >= 1, Precondition::AtLeastOneSelected),
            ActionKind::Compare => (selected >= 2, Precondition::AtLeastTwoSelected),
        };
        if ok {
            Ok(())
        } else {
            Err(CommandError::InvalidPrecondition(precondition))
        }
    }

    fn fixture(self) -> ResultPayload {
        match self {
            ActionKind::Summary => ResultPayload::Summary(fixtures::summary_report()),
            ActionKind::Extract => ResultPayload::Extraction(fixtures::extraction_report()),
            ActionKind::Compare => ResultPayload::Comparison(fixtures::comparison_report()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ResultPayload {
    Summary(SummaryReport),
    Extraction(ExtractionReport),
    Comparison(ComparisonReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub title: String,
    pub source_documents: Vec<String>,
    pub payload: ResultPayload,
}

impl ActionResult {
    pub fn kind(&self) -> ActionKind {
        match self.payload {
            ResultPayload::Summary(_) => ActionKind::Summary,
            ResultPayload::Extraction(_) => ActionKind::Extract,
            ResultPayload::Comparison(_) => ActionKind::Compare,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContract {
    pub template_id: String,
    pub template_name: Option<String>,
    pub source_documents: Vec<String>,
    pub description: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    Action {
        kind: ActionKind,
        source_documents: Vec<String>,
    },
    Contract {
        template_id: String,
        source_documents: Vec<String>,
        description: String,
    },
}

/// A validated operation waiting for its timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingOperation(Operation);

/// What a finished operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Action(ActionKind),
    Contract(GeneratedContract),
}

/// Idle → Processing → Idle. While processing, the timer id identifies the
/// one outstanding operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ActionSimulator {
    processing: Option<(TimerId, Operation)>,
    result: Option<ActionResult>,
}

impl ActionSimulator {
    pub(crate) fn is_processing(&self) -> bool {
        self.processing.is_some()
    }

    pub(crate) fn result(&self) -> Option<&ActionResult> {
        self.result.as_ref()
    }

    pub(crate) fn dismiss_result(&mut self) -> bool {
        self.result.take().is_some()
    }

    fn ensure_idle(&self) -> Result<(), CommandError> {
        if self.is_processing() {
            Err(CommandError::Busy)
        } else {
            Ok(())
        }
    }

    /// Validates an analysis action against the current selection size.
    pub(crate) fn prepare_action(
        &self,
        kind: ActionKind,
        selected: usize,
        source_documents: Vec<String>,
    ) -> Result<PendingOperation, CommandError> {
        self.ensure_idle()?;
        kind.check_selection(selected)?;
        Ok(PendingOperation(Operation::Action {
            kind,
            source_documents,
        }))
    }

    /// Validates a contract request. A missing template is reported even while busy.
    pub(crate) fn prepare_contract(
        &self,
        template_id: &str,
        source_documents: Vec<String>,
        description: String,
    ) -> Result<PendingOperation, CommandError> {
        let template_id = template_id.trim();
        if template_id.is_empty() {
            return Err(CommandError::InvalidPrecondition(
                Precondition::TemplateRequired,
            ));
        }
        self.ensure_idle()?;
        Ok(PendingOperation(Operation::Contract {
            template_id: template_id.to_string(),
            source_documents,
            description,
        }))
    }

    /// Enters processing. The previous result is cleared now.
    pub(crate) fn start(&mut self, pending: PendingOperation, timer: TimerId) {
        self.result = None;
        self.processing = Some((timer, pending.0));
    }

    /// Completes the outstanding operation if `timer` belongs to it.
    pub(crate) fn resolve(&mut self, timer: TimerId) -> Option<Resolution> {
        match &self.processing {
            Some((pending, _)) if *pending == timer => {}
            _ => return None,
        }
        let (_, operation) = self.processing.take()?;
        match operation {
            Operation::Action {
                kind,
                source_documents,
            } => {
                self.result = Some(ActionResult {
                    title: kind.title().to_string(),
                    source_documents,
                    payload: kind.fixture(),
                });
                Some(Resolution::Action(kind))
            }
            Operation::Contract {
                template_id,
                source_documents,
                description,
            } => {
                let template_name = fixtures::find_template(&template_id).map(|t| t.name.to_string());
                Some(Resolution::Contract(GeneratedContract {
                    template_id,
                    template_name,
                    source_documents,
                    description,
                    content: fixtures::GENERATED_CONTRACT.to_string(),
                }))
            }
        }
    }
}

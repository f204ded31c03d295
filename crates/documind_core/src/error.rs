use std::fmt;

use thiserror::Error;

/// Condition a command needs before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    ExactlyOneSelected,
    AtLeastOneSelected,
    AtLeastTwoSelected,
    TemplateRequired,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::ExactlyOneSelected => write!(f, "Select exactly one document to summarize."),
            Precondition::AtLeastOneSelected => {
                write!(f, "Select at least one document to extract data.")
            }
            Precondition::AtLeastTwoSelected => write!(f, "Select at least two documents to compare."),
            Precondition::TemplateRequired => write!(f, "Please select a template first."),
        }
    }
}

/// Why a user command was not carried out.
///
/// Everything except `Busy` is surfaced to the user as an error notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidPrecondition(Precondition),
    #[error("Unsupported file type: {}", .names.join(", "))]
    UnsupportedFileType { names: Vec<String> },
    #[error("another operation is still processing")]
    Busy,
}

/// A name that does not match any known view or department.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} '{name}'")]
pub struct ParseNameError {
    pub what: &'static str,
    pub name: String,
}

//! DocuMind core: pure application state machine, fixtures and view-model helpers.
mod chat;
mod effect;
mod error;
pub mod fixtures;
mod msg;
mod navigation;
mod registry;
mod report;
mod settings;
mod simulation;
mod simulator;
mod state;
mod timer;
mod update;
mod view_model;

pub use chat::{reply_for, ChatMessage, MessageId, Reply, Sender};
pub use effect::Effect;
pub use error::{CommandError, ParseNameError, Precondition};
pub use msg::Msg;
pub use navigation::{ActiveView, Notification, NotificationKind, Overlay};
pub use registry::{is_accepted_file, Department, DocumentId, DocumentRecord, IncomingFile};
pub use report::{
    ComparisonReport, Contact, Difference, ExtractionReport, LabeledValue, SummaryReport,
};
pub use settings::Settings;
pub use simulation::Simulation;
pub use simulator::{ActionKind, ActionResult, GeneratedContract, ResultPayload};
pub use state::AppState;
pub use timer::{TimerId, VirtualClock};
pub use update::update;
pub use view_model::{ActionAvailability, AppViewModel, DocumentRow};

//! DocuMind engine: real-time timers and filesystem IO for the terminal app.
mod engine;
mod intake;
mod persist;
mod types;

pub use engine::{EngineCommander, EngineEvents, EngineHandle};
pub use intake::{describe_file, describe_files, guess_mime_type, IntakeError};
pub use persist::{default_report_filename, export_contract, export_report, PersistError};
pub use types::{EngineCommand, EngineError, EngineEvent};

use std::time::Duration;

/// Extensions the upload surface advertises.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "jpg", "jpeg", "png"];

/// Tunables for the simulated backend. `Default` matches the product's timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Delay for summarize, extract and compare.
    pub action_delay: Duration,
    /// Delay for contract generation.
    pub contract_delay: Duration,
    /// Delay before the assistant's reply replaces the typing placeholder.
    pub chat_reply_delay: Duration,
    /// Lifetime of a notification.
    pub notification_timeout: Duration,
    pub accepted_extensions: Vec<String>,
    /// When false, `accepted_extensions` is advisory only.
    pub enforce_accepted_extensions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            action_delay: Duration::from_millis(2000),
            contract_delay: Duration::from_millis(3000),
            chat_reply_delay: Duration::from_millis(1500),
            notification_timeout: Duration::from_millis(3000),
            accepted_extensions: ACCEPTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            enforce_accepted_extensions: false,
        }
    }
}

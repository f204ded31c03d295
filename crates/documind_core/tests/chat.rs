use std::sync::Once;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use documind_core::{fixtures, Msg, Sender, Settings, Simulation};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(documind_logging::initialize_for_tests);
}

fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .and_then(|d| d.and_hms_opt(14, 5, 30))
        .expect("valid origin")
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn log_starts_with_greeting() {
    init_logging();
    let sim = Simulation::new(Settings::default(), origin());
    let messages = sim.state().chat_messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::Assistant);
    assert_eq!(messages[0].text, fixtures::INITIAL_GREETING);
    assert_eq!(messages[0].time_label, "14:05");
}

#[test]
fn closing_date_question_gets_cited_reply_after_delay() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.send_chat("What's the closing date?");

    let messages = sim.state().chat_messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "What's the closing date?");
    assert!(messages[2].is_placeholder);
    assert!(messages[2].text.is_empty());
    let placeholder_id = messages[2].id;

    sim.advance(ms(1499));
    assert!(sim.state().chat_messages()[2].is_placeholder);

    sim.advance(ms(60_000));
    let messages = sim.state().chat_messages();
    assert_eq!(messages.len(), 3);
    let reply = &messages[2];
    assert_eq!(reply.id, placeholder_id);
    assert!(!reply.is_placeholder);
    assert_eq!(reply.sender, Sender::Assistant);
    assert!(reply.text.contains("February 15, 2025"));
    assert_eq!(reply.source.as_deref(), Some(fixtures::CHAT_SOURCE_DOCUMENT));
    assert_eq!(reply.time_label, "14:05");
}

#[test]
fn whitespace_only_text_adds_nothing() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.consume_dirty();
    let effects = sim.send_chat("   \n\t");
    assert!(effects.is_empty());
    assert_eq!(sim.state().chat_messages().len(), 1);
    assert!(!sim.consume_dirty());
}

#[test]
fn unmatched_question_gets_fallback_without_source() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.send_chat("Tell me a joke");
    sim.run_until_idle();
    let reply = sim.state().chat_messages().last().cloned().expect("reply");
    assert_eq!(reply.source, None);
    assert!(reply.text.starts_with("I'm not sure how to answer that."));
}

#[test]
fn second_send_waits_for_first_reply() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.send_chat("How much does it cost?");
    sim.advance(ms(500));
    sim.send_chat("Who are the parties?");

    // Still a single placeholder directly after the first question.
    let messages = sim.state().chat_messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages.iter().filter(|m| m.is_placeholder).count(), 1);
    assert_eq!(sim.state().view().queued_messages, 1);

    // First reply lands at 1500ms and the queued question starts right away.
    sim.advance(ms(1000));
    let messages = sim.state().chat_messages();
    assert_eq!(messages.len(), 5);
    assert!(messages[2].text.contains("$450,000"));
    assert_eq!(messages[3].text, "Who are the parties?");
    assert!(messages[4].is_placeholder);
    assert_eq!(sim.state().view().queued_messages, 0);

    sim.advance(ms(1500));
    let messages = sim.state().chat_messages();
    assert!(messages[4].text.contains("Robert Johnson"));
    assert!(messages.iter().all(|m| !m.is_placeholder));
}

#[test]
fn message_ids_are_unique_and_increasing() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    sim.send_chat("when?");
    sim.send_chat("price?");
    sim.run_until_idle();

    let ids: Vec<_> = sim.state().chat_messages().iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 5);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn chat_panel_toggles() {
    init_logging();
    let mut sim = Simulation::new(Settings::default(), origin());
    assert!(sim.state().view().chat_visible);
    sim.dispatch(Msg::ChatToggled);
    assert!(!sim.state().view().chat_visible);
}

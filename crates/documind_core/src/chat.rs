use std::collections::VecDeque;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::fixtures::{CHAT_SOURCE_DOCUMENT, INITIAL_GREETING};
use crate::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    /// Local wall-clock time as "HH:MM"; empty for placeholders.
    pub time_label: String,
    pub source: Option<String>,
    pub is_placeholder: bool,
}

/// A canned assistant answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub text: &'static str,
    pub source: Option<&'static str>,
}

struct ReplyRule {
    keywords: &'static [&'static str],
    text: &'static str,
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
const REPLY_RULES: &[ReplyRule] = &[
    ReplyRule {
        keywords: &["closing date", "when"],
        text: "Based on the purchase agreement (Contract_2024.pdf), the closing date is \
February 15, 2025 at 2:00 PM.",
    },
    ReplyRule {
        keywords: &["price", "cost"],
        text: "The purchase price is $450,000. Additional costs include: Earnest Money \
($15,000), Down Payment ($90,000), and estimated closing costs ($4,500).",
    },
    ReplyRule {
        keywords: &["contingenc"],
        text: "There are 4 contingencies: 1) Financing (30 days), 2) Inspection (10 days), \
3) Appraisal (must meet price), 4) Title (seller provides clear title).",
    },
    ReplyRule {
        keywords: &["parties", "who"],
        text: "The parties are: Buyer - John Smith, Seller - Jane Doe, and Agent - Robert Johnson.",
    },
];

const FALLBACK_REPLY: &str = "I'm not sure how to answer that. Try asking about key dates, \
prices, or parties involved in your documents.";

/// Picks the canned answer for `question` by case-insensitive keyword match.
pub fn reply_for(question: &str) -> Reply {
    let question = question.to_lowercase();
    REPLY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| question.contains(k)))
        .map(|rule| Reply {
            text: rule.text,
            source: Some(CHAT_SOURCE_DOCUMENT),
        })
        .unwrap_or(Reply {
            text: FALLBACK_REPLY,
            source: None,
        })
}

pub(crate) fn time_label(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingReply {
    placeholder: MessageId,
    question: String,
    timer: TimerId,
}

/// Outcome of a user submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Submission {
    /// Blank text.
    Ignored,
    /// Another reply is outstanding; the text waits its turn.
    Queued,
    /// The exchange can start right away.
    Ready(String),
}

/// Message log with at most one outstanding placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChatEngine {
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: Option<PendingReply>,
    queued: VecDeque<String>,
    visible: bool,
}

impl ChatEngine {
    pub(crate) fn new(greeting_label: String) -> Self {
        Self {
            messages: vec![ChatMessage {
                id: MessageId(0),
                sender: Sender::Assistant,
                text: INITIAL_GREETING.to_string(),
                time_label: greeting_label,
                source: None,
                is_placeholder: false,
            }],
            next_id: 1,
            pending: None,
            queued: VecDeque::new(),
            visible: true,
        }
    }

    pub(crate) fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub(crate) fn is_awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub(crate) fn submit(&mut self, text: String) -> Submission {
        if text.trim().is_empty() {
            return Submission::Ignored;
        }
        if self.pending.is_some() {
            self.queued.push_back(text);
            return Submission::Queued;
        }
        Submission::Ready(text)
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends the user entry and its placeholder; the reply lands when `timer` fires.
    pub(crate) fn begin_exchange(
        &mut self,
        text: String,
        at: NaiveDateTime,
        timer: TimerId,
    ) -> MessageId {
        let user_id = self.allocate_id();
        self.messages.push(ChatMessage {
            id: user_id,
            sender: Sender::User,
            text: text.clone(),
            time_label: time_label(at),
            source: None,
            is_placeholder: false,
        });
        let placeholder = self.allocate_id();
        self.messages.push(ChatMessage {
            id: placeholder,
            sender: Sender::Assistant,
            text: String::new(),
            time_label: String::new(),
            source: None,
            is_placeholder: true,
        });
        self.pending = Some(PendingReply {
            placeholder,
            question: text,
            timer,
        });
        placeholder
    }

    /// Replaces the placeholder owned by `timer` in place.
    pub(crate) fn resolve(&mut self, timer: TimerId, at: NaiveDateTime) -> Option<MessageId> {
        if self.pending.as_ref().map(|p| p.timer) != Some(timer) {
            return None;
        }
        let pending = self.pending.take()?;
        let reply = reply_for(&pending.question);
        let slot = self
            .messages
            .iter_mut()
            .find(|m| m.id == pending.placeholder)?;
        slot.text = reply.text.to_string();
        slot.source = reply.source.map(str::to_string);
        slot.time_label = time_label(at);
        slot.is_placeholder = false;
        Some(pending.placeholder)
    }

    pub(crate) fn take_queued(&mut self) -> Option<String> {
        if self.pending.is_some() {
            return None;
        }
        self.queued.pop_front()
    }
}

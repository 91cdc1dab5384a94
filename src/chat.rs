use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::crisis::{CrisisLexicon, Reply};

pub const GREETING: &str = "Hello! I'm your AI wellness counselor. I'm here to listen and support you. How are you feeling today?";

/// Receives the delayed escalation for a crisis-positive message
pub trait CrisisListener {
    fn on_crisis_detected(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Only ever set on user messages
    pub is_crisis: bool,
}

/// Simulated latencies, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatTimings {
    /// From submission to the assistant reply
    pub reply_delay_ms: i64,
    /// From the assistant reply to the crisis escalation
    pub crisis_delay_ms: i64,
}

impl ChatTimings {
    pub fn immediate() -> Self {
        Self {
            reply_delay_ms: 0,
            crisis_delay_ms: 0,
        }
    }
}

impl Default for ChatTimings {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1500,
            crisis_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingReply {
    due_at: i64,
    reply: Reply,
    crisis: bool,
}

/// Append-only counselor conversation with simulated reply latency.
///
/// Work scheduled by `submit` is carried out by `poll`, which the host calls
/// on every tick. Replies land strictly in submission order, and a crisis
/// escalation is only scheduled once its reply has been appended.
pub struct ChatEngine {
    clock: Arc<dyn Clock>,
    lexicon: CrisisLexicon,
    timings: ChatTimings,
    messages: Vec<ChatMessage>,
    pending_replies: VecDeque<PendingReply>,
    pending_alerts: VecDeque<i64>,
    next_id: u64,
}

impl ChatEngine {
    pub fn new(clock: Arc<dyn Clock>, lexicon: CrisisLexicon, timings: ChatTimings) -> Self {
        let mut engine = Self {
            clock,
            lexicon,
            timings,
            messages: Vec::new(),
            pending_replies: VecDeque::new(),
            pending_alerts: VecDeque::new(),
            next_id: 1,
        };
        engine.seed_greeting();
        engine
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while at least one reply is still pending
    pub fn is_busy(&self) -> bool {
        !self.pending_replies.is_empty()
    }

    pub fn lexicon(&self) -> &CrisisLexicon {
        &self.lexicon
    }

    pub fn timings(&self) -> ChatTimings {
        self.timings
    }

    pub fn user_message_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender == Sender::User)
            .count()
    }

    /// Appends a user message and schedules its reply.
    ///
    /// Blank input is ignored and yields None; otherwise returns the id of the
    /// new user message. Submissions while busy are accepted and queued.
    pub fn submit(&mut self, text: &str) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }

        let now = self.clock.now_millis();
        let crisis = self.lexicon.classify(text);
        let id = self.push(text.to_string(), Sender::User, now, crisis);

        // never schedule ahead of an earlier submission
        let earliest = self.pending_replies.back().map_or(i64::MIN, |p| p.due_at);
        self.pending_replies.push_back(PendingReply {
            due_at: now.saturating_add(self.timings.reply_delay_ms).max(earliest),
            reply: self.lexicon.compose_reply(text),
            crisis,
        });

        debug!(len = text.len(), crisis, queued = self.pending_replies.len(), "chat message submitted");
        if crisis {
            info!("crisis-positive message received");
        }
        Some(id)
    }

    /// Runs every reply and escalation that is due, in time order.
    ///
    /// Returns the number of events processed.
    pub fn poll(&mut self, listener: &mut dyn CrisisListener) -> usize {
        let now = self.clock.now_millis();
        let mut processed = 0;

        loop {
            let next_reply = self.pending_replies.front().map(|p| p.due_at);
            let next_alert = self.pending_alerts.front().copied();

            match (next_reply, next_alert) {
                (Some(reply_at), alert) if reply_at <= now && alert.map_or(true, |a| reply_at <= a) => {
                    if let Some(pending) = self.pending_replies.pop_front() {
                        self.push(
                            pending.reply.text().to_string(),
                            Sender::Assistant,
                            pending.due_at,
                            false,
                        );
                        if pending.crisis {
                            let alert_at =
                                pending.due_at.saturating_add(self.timings.crisis_delay_ms);
                            self.pending_alerts.push_back(alert_at);
                        }
                    }
                }
                (_, Some(alert_at)) if alert_at <= now => {
                    self.pending_alerts.pop_front();
                    listener.on_crisis_detected();
                }
                _ => break,
            }
            processed += 1;
        }

        processed
    }

    /// Drops the conversation and anything still scheduled
    pub fn reset(&mut self) {
        self.messages.clear();
        self.pending_replies.clear();
        self.pending_alerts.clear();
        self.seed_greeting();
    }

    fn seed_greeting(&mut self) {
        let now = self.clock.now_millis();
        self.push(GREETING.to_string(), Sender::Assistant, now, false);
    }

    fn push(&mut self, content: String, sender: Sender, created_at: i64, is_crisis: bool) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            content,
            sender,
            created_at,
            is_crisis,
        });
        id
    }
}

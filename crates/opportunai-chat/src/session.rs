//! Conversation session.
//!
//! Holds the ordered message history, appends the user turn on submit and
//! appends the resolver's reply once the delay elapses. Only one reply can
//! be pending at a time; submissions made meanwhile are ignored.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::delay::Delay;
use crate::error::ChatError;
use crate::resolver::IntentResolver;
use crate::types::{ChatMessage, IgnoreReason, SubmitOutcome, TurnState};

struct SessionInner {
    messages: Vec<ChatMessage>,
    state: TurnState,
    next_seq: u64,
}

impl SessionInner {
    fn next_id(&mut self) -> String {
        self.next_seq += 1;
        self.next_seq.to_string()
    }

    fn transition(&mut self, session: Uuid, target: TurnState) {
        if self.state.can_transition_to(&target) {
            tracing::debug!(%session, "Chat state: {} -> {}", self.state, target);
            self.state = target;
        } else {
            tracing::warn!(%session, "Ignored chat state transition: {} -> {}", self.state, target);
        }
    }
}

/// Handle to a bot reply that is waiting for its delay.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<Result<ChatMessage, ChatError>>,
}

impl PendingReply {
    /// Wait for the bot turn to be appended and return it.
    ///
    /// Fails with [`ChatError::SessionClosed`] when the conversation was
    /// closed before the delay elapsed.
    pub async fn wait(self) -> Result<ChatMessage, ChatError> {
        self.handle.await?
    }
}

/// A single conversation with the assistant.
///
/// Cheap to clone; clones share the same history. Submitting requires a
/// Tokio runtime because the reply is revealed from a spawned task.
#[derive(Clone)]
pub struct ConversationSession {
    id: Uuid,
    resolver: Arc<IntentResolver>,
    delay: Arc<dyn Delay>,
    inner: Arc<Mutex<SessionInner>>,
}

impl ConversationSession {
    /// Open a conversation seeded with the greeting.
    pub fn new(resolver: Arc<IntentResolver>, delay: Arc<dyn Delay>) -> Self {
        let id = Uuid::new_v4();
        let greeting = ChatMessage::bot("1", resolver.greeting());
        tracing::info!(session = %id, "Conversation opened");
        Self {
            id,
            resolver,
            delay,
            inner: Arc::new(Mutex::new(SessionInner {
                messages: vec![greeting],
                state: TurnState::AwaitingReply,
                next_seq: 1,
            })),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Submit user text.
    ///
    /// The text is trimmed. Empty text, or any text while a reply is
    /// pending, is ignored and leaves the history untouched.
    pub fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Empty);
        }

        let (text, history) = {
            let mut inner = self.lock();
            match inner.state {
                TurnState::Processing => {
                    tracing::debug!(
                        session = %self.id,
                        "Submission ignored while a reply is pending"
                    );
                    return SubmitOutcome::Ignored(IgnoreReason::Busy);
                }
                TurnState::Closed => return SubmitOutcome::Ignored(IgnoreReason::Closed),
                TurnState::AwaitingReply => {}
            }

            let history = inner.messages.clone();
            let id = inner.next_id();
            inner.messages.push(ChatMessage::user(id, text));
            inner.transition(self.id, TurnState::Processing);
            (text.to_string(), history)
        };

        let session = self.clone();
        let handle = tokio::spawn(async move {
            session.delay.wait().await;
            let reply = session.resolver.resolve(&text, &history);

            let mut inner = session.lock();
            if inner.state == TurnState::Closed {
                tracing::debug!(session = %session.id, "Reply discarded after close");
                return Err(ChatError::SessionClosed);
            }
            let id = inner.next_id();
            tracing::debug!(session = %session.id, rule = %reply.rule, "Bot reply appended");
            let message = ChatMessage::bot(id, reply);
            inner.messages.push(message.clone());
            inner.transition(session.id, TurnState::AwaitingReply);
            Ok(message)
        });

        SubmitOutcome::Accepted(PendingReply { handle })
    }

    /// Tap a quick reply. Identical to submitting its label as text.
    pub fn select_quick_reply(&self, label: &str) -> SubmitOutcome {
        if !self.active_quick_replies().iter().any(|r| r == label) {
            tracing::debug!(session = %self.id, label, "Quick reply is not in the active set");
        }
        self.submit(label)
    }

    /// Snapshot of the history in append order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().messages.clone()
    }

    pub fn state(&self) -> TurnState {
        self.lock().state
    }

    /// Quick replies of the latest bot message. Empty while a reply is
    /// pending or after close.
    pub fn active_quick_replies(&self) -> Vec<String> {
        let inner = self.lock();
        if inner.state != TurnState::AwaitingReply {
            return Vec::new();
        }
        inner
            .messages
            .last()
            .filter(|m| m.is_bot())
            .map(|m| m.quick_replies.clone())
            .unwrap_or_default()
    }

    /// Close the conversation and discard its history. A pending reply is
    /// dropped.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.transition(self.id, TurnState::Closed);
        inner.messages.clear();
        tracing::info!(session = %self.id, "Conversation closed");
    }
}

// =============================================================================
// Tests
// =============================================================================

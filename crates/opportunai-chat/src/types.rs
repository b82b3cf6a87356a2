//! Core data types for the chat assistant.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::PendingReply;

// =============================================================================
// Messages
// =============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry of a conversation history.
///
/// Messages are never mutated after they are appended. Quick replies are
/// stored on every bot message but only the latest bot message's set is
/// actionable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Decimal sequence number, unique within the session.
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<String>,
}

impl ChatMessage {
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender: Sender::User,
            created_at: Utc::now(),
            quick_replies: Vec::new(),
        }
    }

    pub fn bot(id: impl Into<String>, reply: Reply) -> Self {
        Self {
            id: id.into(),
            text: reply.text,
            sender: Sender::Bot,
            created_at: Utc::now(),
            quick_replies: reply.quick_replies,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

// =============================================================================
// Replies
// =============================================================================

/// The rule that produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Greeting,
    ListTenders,
    ListCompanies,
    DetailLookup,
    SearchPrompt,
    KeywordSearch,
    Totals,
    Menu,
    Fallback,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::Greeting => "greeting",
            RuleKind::ListTenders => "list_tenders",
            RuleKind::ListCompanies => "list_companies",
            RuleKind::DetailLookup => "detail_lookup",
            RuleKind::SearchPrompt => "search_prompt",
            RuleKind::KeywordSearch => "keyword_search",
            RuleKind::Totals => "totals",
            RuleKind::Menu => "menu",
            RuleKind::Fallback => "fallback",
        };
        write!(f, "{}", name)
    }
}

/// Resolver output for one user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub quick_replies: Vec<String>,
    pub rule: RuleKind,
}

impl Reply {
    pub fn new(rule: RuleKind, text: impl Into<String>, quick_replies: &[&str]) -> Self {
        Self {
            text: text.into(),
            quick_replies: quick_replies.iter().map(|s| s.to_string()).collect(),
            rule,
        }
    }
}

// =============================================================================
// Session state
// =============================================================================

/// Turn state of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// Ready for the next user turn.
    AwaitingReply,
    /// A bot reply is pending; new submissions are ignored.
    Processing,
    /// The conversation was closed and its history discarded.
    Closed,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnState::AwaitingReply => write!(f, "AwaitingReply"),
            TurnState::Processing => write!(f, "Processing"),
            TurnState::Closed => write!(f, "Closed"),
        }
    }
}

impl TurnState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &TurnState) -> bool {
        matches!(
            (self, target),
            (TurnState::AwaitingReply, TurnState::Processing)
                | (TurnState::Processing, TurnState::AwaitingReply)
                | (TurnState::AwaitingReply, TurnState::Closed)
                | (TurnState::Processing, TurnState::Closed)
        )
    }
}

/// Why a submission produced no turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The text was empty after trimming.
    Empty,
    /// A reply is still pending.
    Busy,
    /// The conversation was closed.
    Closed,
}

/// Result of submitting text to a session.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The user turn was appended; the bot turn follows.
    Accepted(PendingReply),
    /// Nothing was appended.
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn into_pending(self) -> Option<PendingReply> {
        match self {
            SubmitOutcome::Accepted(pending) => Some(pending),
            SubmitOutcome::Ignored(_) => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_display() {
        assert_eq!(RuleKind::ListTenders.to_string(), "list_tenders");
        assert_eq!(RuleKind::DetailLookup.to_string(), "detail_lookup");
        assert_eq!(RuleKind::Fallback.to_string(), "fallback");
    }

    #[test]
    fn test_turn_state_transitions() {
        assert!(TurnState::AwaitingReply.can_transition_to(&TurnState::Processing));
        assert!(TurnState::Processing.can_transition_to(&TurnState::AwaitingReply));
        assert!(TurnState::Processing.can_transition_to(&TurnState::Closed));
        assert!(!TurnState::Processing.can_transition_to(&TurnState::Processing));
        assert!(!TurnState::Closed.can_transition_to(&TurnState::AwaitingReply));
        assert!(!TurnState::Closed.can_transition_to(&TurnState::Processing));
    }

    #[test]
    fn test_bot_message_carries_quick_replies() {
        let reply = Reply::new(RuleKind::Menu, "menu", &["📋 Ver Editais", "🔙 Menu"]);
        let msg = ChatMessage::bot("3", reply);
        assert!(msg.is_bot());
        assert_eq!(msg.quick_replies, vec!["📋 Ver Editais", "🔙 Menu"]);
    }

    #[test]
    fn test_message_serialization_skips_empty_quick_replies() {
        let msg = ChatMessage::user("1", "oi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "user");
        assert!(json.get("quick_replies").is_none());
    }
}

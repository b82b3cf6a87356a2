//! Scripted chat assistant for OpportunAI.
//!
//! Resolves free-text input against an ordered list of keyword rules and
//! drives a conversation session that reveals each bot reply after a fixed
//! delay.

pub mod delay;
pub mod error;
pub mod resolver;
pub mod response;
pub mod rules;
pub mod session;
pub mod types;

pub use delay::{Delay, FixedDelay, ManualDelay, NoDelay};
pub use error::ChatError;
pub use resolver::IntentResolver;
pub use session::{ConversationSession, PendingReply};
pub use types::{
    ChatMessage, IgnoreReason, Reply, RuleKind, Sender, SubmitOutcome, TurnState,
};

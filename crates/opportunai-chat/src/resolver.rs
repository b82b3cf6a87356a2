//! Intent resolution over the rule chain.

use std::sync::Arc;

use opportunai_core::{Catalog, Dataset};

use crate::error::ChatError;
use crate::response;
use crate::rules::{default_rules, Rule, RuleContext, RuleInput};
use crate::types::{ChatMessage, Reply, RuleKind};

/// Default minimum compatibility counted as "high" by the totals reply.
pub const DEFAULT_HIGH_COMPATIBILITY: u8 = 90;

/// Maps one user text to a reply.
///
/// Resolution is a pure function of the input, the prior history and the
/// catalog. It never fails: unmatched input gets the fallback reply.
pub struct IntentResolver {
    catalog: Arc<Catalog>,
    rules: Vec<Rule>,
    high_compatibility: u8,
}

impl IntentResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            rules: default_rules(),
            high_compatibility: DEFAULT_HIGH_COMPATIBILITY,
        }
    }

    /// Build a resolver over a validated dataset.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, ChatError> {
        let catalog = Catalog::new(dataset)?;
        Ok(Self::new(Arc::new(catalog)))
    }

    pub fn with_high_compatibility(mut self, threshold: u8) -> Self {
        self.high_compatibility = threshold;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Opening message of every conversation.
    pub fn greeting(&self) -> Reply {
        response::greeting(self.catalog.tender_count(), self.catalog.company_count())
    }

    pub fn rule_order(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|r| r.kind).collect()
    }

    /// Resolve `text` given the history as it stood before this turn.
    pub fn resolve(&self, text: &str, history: &[ChatMessage]) -> Reply {
        let input = RuleInput::new(text, history);
        let ctx = RuleContext {
            catalog: &self.catalog,
            high_compatibility: self.high_compatibility,
        };

        for rule in &self.rules {
            if let Some(reply) = rule.apply(&ctx, &input) {
                tracing::debug!(rule = %rule.kind, "Resolved user input");
                return reply;
            }
        }
        response::fallback()
    }
}

// =============================================================================
// Tests
// =============================================================================

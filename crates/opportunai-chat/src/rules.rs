//! Ordered intent rules.
//!
//! Each rule pairs a trigger predicate over the lowercased input with a
//! handler that builds the reply. Rules are evaluated in list order and the
//! first handler that returns a reply wins. A handler may decline by
//! returning `None`, in which case evaluation continues with the next rule.

use std::sync::LazyLock;

use regex::Regex;

use opportunai_core::{Catalog, DEFAULT_TOP_LIMIT};

use crate::response;
use crate::types::{ChatMessage, Reply, RuleKind};

// =============================================================================
// Triggers
// =============================================================================

const TENDER_TRIGGERS: &[&str] = &["editais", "📋"];
const COMPANY_TRIGGERS: &[&str] = &["empresas", "🏭"];
const SEARCH_TRIGGERS: &[&str] = &["buscar", "🔍"];
const TOTALS_TRIGGERS: &[&str] = &["totais", "📊"];
const MENU_TRIGGERS: &[&str] = &["menu", "voltar", "🔙"];

/// Domain terms that run a catalog search with the raw input as query.
pub const SEARCH_KEYWORDS: &[&str] = &[
    "segurança",
    "monitoramento",
    "química",
    "mineração",
    "energia",
    "controle",
];

static DETAIL_SHORTCUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"detalhes #[1-3]").expect("Invalid detail regex"));
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-3]$").expect("Invalid number regex"));

// =============================================================================
// Rule types
// =============================================================================

/// One user turn as seen by the rules.
pub struct RuleInput<'a> {
    /// Trimmed text as typed.
    pub raw: &'a str,
    /// Lowercased `raw`.
    pub lower: String,
    /// Conversation history before this turn was appended.
    pub history: &'a [ChatMessage],
}

impl<'a> RuleInput<'a> {
    pub fn new(raw: &'a str, history: &'a [ChatMessage]) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
            history,
        }
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }
}

/// Read-only data the handlers draw from.
pub struct RuleContext<'a> {
    pub catalog: &'a Catalog,
    pub high_compatibility: u8,
}

pub type Trigger = fn(&RuleInput<'_>) -> bool;
pub type Handler = fn(&RuleContext<'_>, &RuleInput<'_>) -> Option<Reply>;

pub struct Rule {
    pub kind: RuleKind,
    pub trigger: Trigger,
    pub handler: Handler,
}

impl Rule {
    /// Run the rule against one input. `None` when the trigger does not
    /// fire or the handler declines.
    pub fn apply(&self, ctx: &RuleContext<'_>, input: &RuleInput<'_>) -> Option<Reply> {
        if (self.trigger)(input) {
            (self.handler)(ctx, input)
        } else {
            None
        }
    }
}

/// The rule chain in evaluation order. The last rule always fires.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            kind: RuleKind::ListTenders,
            trigger: |input| input.contains_any(TENDER_TRIGGERS),
            handler: list_tenders,
        },
        Rule {
            kind: RuleKind::ListCompanies,
            trigger: |input| input.contains_any(COMPANY_TRIGGERS),
            handler: list_companies,
        },
        Rule {
            kind: RuleKind::DetailLookup,
            trigger: is_detail_request,
            handler: detail_lookup,
        },
        Rule {
            kind: RuleKind::SearchPrompt,
            trigger: |input| input.contains_any(SEARCH_TRIGGERS),
            handler: |_, _| Some(response::search_prompt()),
        },
        Rule {
            kind: RuleKind::KeywordSearch,
            trigger: |input| input.contains_any(SEARCH_KEYWORDS),
            handler: keyword_search,
        },
        Rule {
            kind: RuleKind::Totals,
            trigger: |input| input.contains_any(TOTALS_TRIGGERS),
            handler: totals,
        },
        Rule {
            kind: RuleKind::Menu,
            trigger: |input| input.contains_any(MENU_TRIGGERS),
            handler: |_, _| Some(response::menu()),
        },
        Rule {
            kind: RuleKind::Fallback,
            trigger: |_| true,
            handler: |_, _| Some(response::fallback()),
        },
    ]
}

// =============================================================================
// Handlers
// =============================================================================

fn list_tenders(ctx: &RuleContext<'_>, _input: &RuleInput<'_>) -> Option<Reply> {
    Some(response::tender_list(&ctx.catalog.top_tenders(DEFAULT_TOP_LIMIT)))
}

fn list_companies(ctx: &RuleContext<'_>, _input: &RuleInput<'_>) -> Option<Reply> {
    Some(response::company_list(
        &ctx.catalog.top_companies(DEFAULT_TOP_LIMIT),
    ))
}

fn is_detail_request(input: &RuleInput<'_>) -> bool {
    DETAIL_SHORTCUT.is_match(&input.lower) || BARE_NUMBER.is_match(&input.lower)
}

/// First digit 1 to 3 in the input.
fn detail_number(lower: &str) -> Option<u32> {
    lower
        .chars()
        .find(|c| matches!(c, '1'..='3'))
        .and_then(|c| c.to_digit(10))
}

/// Whether a detail request refers to a tender.
///
/// True when the input names an "edital", or when the second-to-last
/// message of the prior history mentions "editais" (case-sensitive).
fn refers_to_tender(input: &RuleInput<'_>) -> bool {
    if input.lower.contains("edital") {
        return true;
    }
    let len = input.history.len();
    len >= 2 && input.history[len - 2].text.contains("editais")
}

fn detail_lookup(ctx: &RuleContext<'_>, input: &RuleInput<'_>) -> Option<Reply> {
    let number = detail_number(&input.lower)?;

    if refers_to_tender(input) {
        if let Some(tender) = ctx.catalog.tender_by_id(number) {
            return Some(response::tender_detail(number, tender));
        }
    }
    ctx.catalog
        .company_by_id(number)
        .map(|company| response::company_detail(number, company))
}

fn keyword_search(ctx: &RuleContext<'_>, input: &RuleInput<'_>) -> Option<Reply> {
    let tenders = ctx.catalog.search_tenders(input.raw);
    let companies = ctx.catalog.search_companies(input.raw);
    tracing::debug!(
        query = input.raw,
        tenders = tenders.len(),
        companies = companies.len(),
        "Keyword search"
    );
    Some(response::search_results(&tenders, &companies))
}

fn totals(ctx: &RuleContext<'_>, _input: &RuleInput<'_>) -> Option<Reply> {
    let catalog = ctx.catalog;
    Some(response::totals(
        catalog.tender_count(),
        catalog.company_count(),
        catalog.count_tenders_at_least(ctx.high_compatibility),
    ))
}

// =============================================================================
// Tests
// =============================================================================

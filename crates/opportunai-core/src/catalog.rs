//! Read-only opportunity catalog.
//!
//! Pure query helpers over an injected [`Dataset`]: substring search,
//! top-N by compatibility and point lookup. Nothing here mutates records.

use std::collections::HashSet;

use crate::dataset::Dataset;
use crate::error::{CoreError, Result};
use crate::types::{CompanyRecord, Record, RecordKind, TenderRecord};

/// Number of records returned by the top-N helpers when no limit is given.
pub const DEFAULT_TOP_LIMIT: usize = 3;

/// Immutable catalog of tenders and companies.
#[derive(Debug, Clone)]
pub struct Catalog {
    tenders: Vec<TenderRecord>,
    companies: Vec<CompanyRecord>,
}

impl Catalog {
    /// Build a catalog from a dataset.
    ///
    /// Fails if ids repeat within a collection or a compatibility score
    /// exceeds 100.
    pub fn new(dataset: Dataset) -> Result<Self> {
        let Dataset { tenders, companies } = dataset;

        check_unique(tenders.iter().map(|t| t.id), RecordKind::Tender)?;
        check_unique(companies.iter().map(|c| c.id), RecordKind::Company)?;

        if let Some(t) = tenders.iter().find(|t| t.compatibility_score > 100) {
            return Err(CoreError::InvalidDataset(format!(
                "tender {} has compatibility {} (max 100)",
                t.id, t.compatibility_score
            )));
        }
        if let Some(c) = companies.iter().find(|c| c.compatibility_score > 100) {
            return Err(CoreError::InvalidDataset(format!(
                "company {} has compatibility {} (max 100)",
                c.id, c.compatibility_score
            )));
        }

        tracing::debug!(
            tenders = tenders.len(),
            companies = companies.len(),
            "Catalog loaded"
        );
        Ok(Self { tenders, companies })
    }

    /// Catalog over the compiled-in reference dataset.
    pub fn reference() -> Self {
        let Dataset { tenders, companies } = Dataset::reference();
        Self { tenders, companies }
    }

    pub fn tenders(&self) -> &[TenderRecord] {
        &self.tenders
    }

    pub fn companies(&self) -> &[CompanyRecord] {
        &self.companies
    }

    pub fn tender_count(&self) -> usize {
        self.tenders.len()
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    /// Number of tenders whose compatibility is at least `score`.
    pub fn count_tenders_at_least(&self, score: u8) -> usize {
        self.tenders
            .iter()
            .filter(|t| t.compatibility_score >= score)
            .count()
    }

    /// Case-insensitive substring search over title, organ, location and
    /// description. Dataset order is preserved.
    pub fn search_tenders(&self, query: &str) -> Vec<&TenderRecord> {
        let needle = query.to_lowercase();
        self.tenders
            .iter()
            .filter(|t| {
                contains_ci(&t.title, &needle)
                    || contains_ci(&t.issuing_organ, &needle)
                    || contains_ci(&t.location, &needle)
                    || t.description
                        .as_deref()
                        .is_some_and(|d| contains_ci(d, &needle))
            })
            .collect()
    }

    /// Case-insensitive substring search over name, sector, location and
    /// description. Dataset order is preserved.
    pub fn search_companies(&self, query: &str) -> Vec<&CompanyRecord> {
        let needle = query.to_lowercase();
        self.companies
            .iter()
            .filter(|c| {
                contains_ci(&c.name, &needle)
                    || contains_ci(&c.sector, &needle)
                    || contains_ci(&c.location, &needle)
                    || c.description
                        .as_deref()
                        .is_some_and(|d| contains_ci(d, &needle))
            })
            .collect()
    }

    /// Tenders sorted by compatibility descending, truncated to `limit`.
    /// Ties keep their dataset order.
    pub fn top_tenders(&self, limit: usize) -> Vec<&TenderRecord> {
        let mut ranked: Vec<&TenderRecord> = self.tenders.iter().collect();
        ranked.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
        ranked.truncate(limit);
        ranked
    }

    /// Companies sorted by compatibility descending, truncated to `limit`.
    /// Ties keep their dataset order.
    pub fn top_companies(&self, limit: usize) -> Vec<&CompanyRecord> {
        let mut ranked: Vec<&CompanyRecord> = self.companies.iter().collect();
        ranked.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
        ranked.truncate(limit);
        ranked
    }

    pub fn tender_by_id(&self, id: u32) -> Option<&TenderRecord> {
        self.tenders.iter().find(|t| t.id == id)
    }

    pub fn company_by_id(&self, id: u32) -> Option<&CompanyRecord> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Point lookup in the collection named by `kind`.
    pub fn by_id(&self, kind: RecordKind, id: u32) -> Option<Record<'_>> {
        match kind {
            RecordKind::Tender => self.tender_by_id(id).map(Record::Tender),
            RecordKind::Company => self.company_by_id(id).map(Record::Company),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn check_unique(ids: impl Iterator<Item = u32>, kind: RecordKind) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::InvalidDataset(format!(
                "duplicate {} id {}",
                kind, id
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

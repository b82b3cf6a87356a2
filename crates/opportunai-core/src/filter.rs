//! Dashboard filter predicates.
//!
//! Each predicate is independent; a record passes a filter when every
//! predicate accepts it. Filtering preserves dataset order.

use serde::{Deserialize, Serialize};

use crate::types::{CompanyRecord, TenderRecord, TenderStatus};

// =============================================================================
// Bands
// =============================================================================

/// Monetary value range of a tender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBand {
    /// Up to R$ 100k.
    Low,
    /// Above R$ 100k, up to R$ 500k.
    Mid,
    /// Above R$ 500k.
    High,
}

impl ValueBand {
    pub fn contains(&self, value: f64) -> bool {
        match self {
            ValueBand::Low => value <= 100_000.0,
            ValueBand::Mid => value > 100_000.0 && value <= 500_000.0,
            ValueBand::High => value > 500_000.0,
        }
    }

    /// Parse a dashboard option key. `"all"` and unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "low" => Some(ValueBand::Low),
            "mid" => Some(ValueBand::Mid),
            "high" => Some(ValueBand::High),
            _ => None,
        }
    }
}

/// Compatibility range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityBand {
    /// 80 and above.
    High,
    /// 60 to 79.
    Mid,
    /// Below 60.
    Low,
}

impl CompatibilityBand {
    pub fn contains(&self, score: u8) -> bool {
        match self {
            CompatibilityBand::High => score >= 80,
            CompatibilityBand::Mid => (60..80).contains(&score),
            CompatibilityBand::Low => score < 60,
        }
    }

    /// Parse a dashboard option key. `"all"` and unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "high" => Some(CompatibilityBand::High),
            "mid" => Some(CompatibilityBand::Mid),
            "low" => Some(CompatibilityBand::Low),
            _ => None,
        }
    }
}

/// Parse a display value such as `"R$ 450.000,00"` into `450000.0`.
///
/// Keeps digits and commas, then reads the first comma as the decimal
/// separator. Returns `None` when no number remains.
pub fn parse_monetary_value(display: &str) -> Option<f64> {
    let kept: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let normalized = kept.replacen(',', ".", 1);
    // Anything after a second comma is not part of the number.
    let numeric = match normalized.find(',') {
        Some(idx) => &normalized[..idx],
        None => normalized.as_str(),
    };
    numeric.parse::<f64>().ok()
}

// =============================================================================
// Filters
// =============================================================================

/// Filter over tenders. `Default` accepts everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TenderFilter {
    /// Substring of title, organ or location. Empty matches all.
    pub query: String,
    /// Substring of location.
    pub location: Option<String>,
    pub value_band: Option<ValueBand>,
    pub compatibility_band: Option<CompatibilityBand>,
    pub status: Option<TenderStatus>,
}

impl TenderFilter {
    pub fn matches(&self, tender: &TenderRecord) -> bool {
        let query = self.query.to_lowercase();
        let matches_query = query.is_empty()
            || tender.title.to_lowercase().contains(&query)
            || tender.issuing_organ.to_lowercase().contains(&query)
            || tender.location.to_lowercase().contains(&query);

        let matches_location = match &self.location {
            Some(loc) => tender.location.to_lowercase().contains(&loc.to_lowercase()),
            None => true,
        };

        let matches_value = match self.value_band {
            Some(band) => parse_monetary_value(&tender.monetary_value)
                .is_some_and(|v| band.contains(v)),
            None => true,
        };

        let matches_compatibility = self
            .compatibility_band
            .map_or(true, |band| band.contains(tender.compatibility_score));

        let matches_status = self.status.map_or(true, |s| s == tender.status);

        matches_query
            && matches_location
            && matches_value
            && matches_compatibility
            && matches_status
    }

    pub fn apply<'a>(&self, tenders: &'a [TenderRecord]) -> Vec<&'a TenderRecord> {
        tenders.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Filter over companies. `Default` accepts everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFilter {
    /// Substring of name, sector or location. Empty matches all.
    pub query: String,
    /// Substring of location.
    pub location: Option<String>,
    pub compatibility_band: Option<CompatibilityBand>,
}

impl CompanyFilter {
    pub fn matches(&self, company: &CompanyRecord) -> bool {
        let query = self.query.to_lowercase();
        let matches_query = query.is_empty()
            || company.name.to_lowercase().contains(&query)
            || company.sector.to_lowercase().contains(&query)
            || company.location.to_lowercase().contains(&query);

        let matches_location = match &self.location {
            Some(loc) => company.location.to_lowercase().contains(&loc.to_lowercase()),
            None => true,
        };

        let matches_compatibility = self
            .compatibility_band
            .map_or(true, |band| band.contains(company.compatibility_score));

        matches_query && matches_location && matches_compatibility
    }

    pub fn apply<'a>(&self, companies: &'a [CompanyRecord]) -> Vec<&'a CompanyRecord> {
        companies.iter().filter(|c| self.matches(c)).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

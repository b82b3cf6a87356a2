use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Lifecycle status of a tender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    /// Accepting proposals.
    Open,
    /// Deadline is close.
    Closing,
    /// No longer accepting proposals.
    Closed,
}

impl TenderStatus {
    /// Label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            TenderStatus::Open => "Aberto",
            TenderStatus::Closing => "Encerrando",
            TenderStatus::Closed => "Encerrado",
        }
    }

    /// Parse a status from its label or dashboard option key ("aberto",
    /// "encerrando", "encerrado"), case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "aberto" | "open" => Some(TenderStatus::Open),
            "encerrando" | "closing" => Some(TenderStatus::Closing),
            "encerrado" | "closed" => Some(TenderStatus::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which catalog collection a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Tender,
    Company,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Tender => write!(f, "tender"),
            RecordKind::Company => write!(f, "company"),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A public-sector procurement opportunity ("edital").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderRecord {
    pub id: u32,
    pub title: String,
    pub issuing_organ: String,
    /// Display string, e.g. "R$ 450.000,00".
    pub monetary_value: String,
    /// Display string, e.g. "15/12/2024".
    pub deadline: String,
    pub location: String,
    /// Precomputed match quality, 0 to 100.
    pub compatibility_score: u8,
    pub status: TenderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A candidate business partner ("empresa").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: u32,
    pub name: String,
    pub sector: String,
    pub location: String,
    /// Precomputed match quality, 0 to 100.
    pub compatibility_score: u8,
    /// Free-text tier label, e.g. "Médio-Alto".
    pub potential_tier: String,
    /// e.g. "2000-5000".
    pub employee_range_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A borrowed record from either collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Record<'a> {
    Tender(&'a TenderRecord),
    Company(&'a CompanyRecord),
}

impl Record<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Tender(_) => RecordKind::Tender,
            Record::Company(_) => RecordKind::Company,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Record::Tender(t) => t.id,
            Record::Company(c) => c.id,
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
    fn test_status_labels() {
        assert_eq!(TenderStatus::Open.label(), "Aberto");
        assert_eq!(TenderStatus::Closing.label(), "Encerrando");
        assert_eq!(TenderStatus::Closed.to_string(), "Encerrado");
    }

    #[test]
    fn test_status_from_key() {
        assert_eq!(TenderStatus::from_key("aberto"), Some(TenderStatus::Open));
        assert_eq!(TenderStatus::from_key("Encerrando"), Some(TenderStatus::Closing));
        assert_eq!(TenderStatus::from_key(" ENCERRADO "), Some(TenderStatus::Closed));
        assert_eq!(TenderStatus::from_key("all"), None);
        assert_eq!(TenderStatus::from_key(""), None);
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&TenderStatus::Closing).unwrap();
        assert_eq!(json, "\"closing\"");
    }

    #[test]
    fn test_tender_description_omitted_when_absent() {
        let tender = TenderRecord {
            id: 1,
            title: "T".into(),
            issuing_organ: "O".into(),
            monetary_value: "R$ 1,00".into(),
            deadline: "01/01/2025".into(),
            location: "Recife, PE".into(),
            compatibility_score: 50,
            status: TenderStatus::Open,
            description: None,
        };
        let json = serde_json::to_string(&tender).unwrap();
        assert!(!json.contains("description"));
        let back: TenderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tender);
    }

    #[test]
    fn test_record_kind_and_id() {
        let company = CompanyRecord {
            id: 7,
            name: "C".into(),
            sector: "S".into(),
            location: "L".into(),
            compatibility_score: 10,
            potential_tier: "Alto".into(),
            employee_range_label: "5000+".into(),
            description: None,
        };
        let record = Record::Company(&company);
        assert_eq!(record.kind(), RecordKind::Company);
        assert_eq!(record.id(), 7);
        assert_eq!(record.kind().to_string(), "company");
    }
}

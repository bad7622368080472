//! Core types for split core

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Participant identifier (person name as entered by the group)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create new participant ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank identifiers are never valid participants
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Rule governing how an expense amount is divided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitType {
    /// Amount divided evenly between all listed participants
    Equal,
    /// Each value is a percentage of the amount
    Percentage,
    /// Each value is a weight relative to the total of all weights
    Share,
    /// Each value is the exact amount owed
    Exact,
}

impl SplitType {
    /// Wire name of the split type
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "EQUAL",
            SplitType::Percentage => "PERCENTAGE",
            SplitType::Share => "SHARE",
            SplitType::Exact => "EXACT",
        }
    }
}

impl std::fmt::Display for SplitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SplitType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "EQUAL" => Ok(SplitType::Equal),
            "PERCENTAGE" => Ok(SplitType::Percentage),
            "SHARE" => Ok(SplitType::Share),
            "EXACT" => Ok(SplitType::Exact),
            other => Err(format!("Invalid split type: {}", other)),
        }
    }
}

/// One `{person, value}` pair of a split
///
/// On input `value` is the raw figure for the split type (ignored for
/// EQUAL). After computation it is the monetary share owed by `person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntry {
    /// Participant
    pub person: ParticipantId,

    /// Raw split value or computed share
    #[serde(default)]
    pub value: Decimal,
}

impl SplitEntry {
    /// Create new split entry
    pub fn new(person: impl Into<ParticipantId>, value: Decimal) -> Self {
        Self {
            person: person.into(),
            value,
        }
    }
}

/// Net position per participant: positive is owed money, negative owes money
pub type Balances = BTreeMap<ParticipantId, Decimal>;

/// Single payer → payee money movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Debtor (pays)
    pub from: ParticipantId,

    /// Creditor (receives)
    pub to: ParticipantId,

    /// Amount to transfer, always positive
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_type_wire_format() {
        let json = serde_json::to_string(&SplitType::Percentage).unwrap();
        assert_eq!(json, "\"PERCENTAGE\"");

        let parsed: SplitType = serde_json::from_str("\"EXACT\"").unwrap();
        assert_eq!(parsed, SplitType::Exact);
        assert!(serde_json::from_str::<SplitType>("\"HALF\"").is_err());
    }

    #[test]
    fn test_split_type_from_str() {
        assert_eq!("SHARE".parse::<SplitType>().unwrap(), SplitType::Share);
        assert!("share".parse::<SplitType>().is_err());
    }

    #[test]
    fn test_participant_id_is_plain_string() {
        let entry = SplitEntry::new("Alice", Decimal::new(1050, 2));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["person"], "Alice");
        assert_eq!(json["value"], "10.50");
    }

    #[test]
    fn test_blank_participant() {
        assert!(ParticipantId::new("  ").is_blank());
        assert!(!ParticipantId::new("Bob").is_blank());
    }
}

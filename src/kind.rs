//! PII categories and their display attributes
//!
//! `PiiKind` is closed: every presentation table below matches it
//! exhaustively, so a new kind must be given a label and risk level
//! before the crate compiles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a detected PII span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PiiKind {
    /// Indian national identity number (12 digits)
    Aadhaar,
    /// Indian permanent account number
    Pan,
    Name,
    Address,
    Phone,
    Email,
    /// Bank account number
    Account,
    Other,
}

impl PiiKind {
    /// All kinds, in display order
    pub const ALL: [PiiKind; 8] = [
        PiiKind::Aadhaar,
        PiiKind::Pan,
        PiiKind::Name,
        PiiKind::Address,
        PiiKind::Phone,
        PiiKind::Email,
        PiiKind::Account,
        PiiKind::Other,
    ];

    /// Wire tag (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Pan => "pan",
            Self::Name => "name",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Account => "account",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aadhaar => "Aadhaar",
            Self::Pan => "PAN",
            Self::Name => "Name",
            Self::Address => "Address",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Account => "Account",
            Self::Other => "Other",
        }
    }

    /// Risk level used to color the detection badge
    pub fn risk(&self) -> RiskLevel {
        match self {
            Self::Aadhaar | Self::Pan => RiskLevel::Danger,
            Self::Name | Self::Phone | Self::Email => RiskLevel::Warning,
            Self::Address | Self::Account => RiskLevel::Secondary,
            Self::Other => RiskLevel::Default,
        }
    }

    /// Map a detector entity type (e.g. `EMAIL_ADDRESS`) to a kind
    ///
    /// Matching is case-insensitive. Unknown entity types map to `Other`.
    pub fn from_entity_type(entity: &str) -> Self {
        match entity.to_ascii_uppercase().as_str() {
            "IN_AADHAAR" | "AADHAAR" => Self::Aadhaar,
            "IN_PAN" | "PAN" => Self::Pan,
            "PERSON" | "NAME" => Self::Name,
            "LOCATION" | "ADDRESS" => Self::Address,
            "PHONE_NUMBER" | "PHONE" => Self::Phone,
            "EMAIL_ADDRESS" | "EMAIL" => Self::Email,
            "IBAN_CODE" | "US_BANK_NUMBER" | "IN_BANK_ACCOUNT" | "ACCOUNT" => Self::Account,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge color class for a PII kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Danger,
    Warning,
    Secondary,
    Default,
}

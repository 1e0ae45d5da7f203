//! Inquiry Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Inquiry UUID
pub type InquiryUuid = TypedUuid<Inquiry>;

/// Service a customer is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Consultation,
    Custom,
    Shopping,
    General,
}

impl ServiceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consultation => "consultation",
            Self::Custom => "custom",
            Self::Shopping => "shopping",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a service keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised service `{0}`")]
pub struct ParseServiceKindError(String);

impl FromStr for ServiceKind {
    type Err = ParseServiceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consultation" => Ok(Self::Consultation),
            "custom" => Ok(Self::Custom),
            "shopping" => Ok(Self::Shopping),
            "general" => Ok(Self::General),
            other => Err(ParseServiceKindError(other.to_string())),
        }
    }
}

/// Back-office triage status of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Contacted,
    Resolved,
}

impl InquiryStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an inquiry status keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised inquiry status `{0}`")]
pub struct ParseInquiryStatusError(String);

impl FromStr for InquiryStatus {
    type Err = ParseInquiryStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "resolved" => Ok(Self::Resolved),
            other => Err(ParseInquiryStatusError(other.to_string())),
        }
    }
}

/// Inquiry Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub uuid: InquiryUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: ServiceKind,
    pub message: String,
    pub status: InquiryStatus,
    pub admin_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Inquiry Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub uuid: InquiryUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: ServiceKind,
    pub message: String,
}

/// Inquiry Update Model
///
/// Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryUpdate {
    pub status: Option<InquiryStatus>,
    pub admin_notes: Option<String>,
}

/// Inquiry counters for the back office.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InquiryStats {
    pub total: u64,
    pub new: u64,
    pub contacted: u64,
    pub resolved: u64,
}

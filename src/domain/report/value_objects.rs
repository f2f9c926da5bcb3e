use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ReportParseError;

// ============================================================================
// Field Report Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TribeSize {
    Small,
    Medium,
    Large,
}

impl TribeSize {
    /// Accepts the word or its 1/2/3 numeral
    pub fn parse(value: &str) -> Result<Self, ReportParseError> {
        match value.trim().to_lowercase().as_str() {
            "1" | "small" => Ok(Self::Small),
            "2" | "medium" => Ok(Self::Medium),
            "3" | "large" => Ok(Self::Large),
            _ => Err(ReportParseError::InvalidTribeSize(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// Accepts the word or its 1/2/3 numeral
    pub fn parse(value: &str) -> Result<Self, ReportParseError> {
        match value.trim().to_lowercase().as_str() {
            "1" | "low" => Ok(Self::Low),
            "2" | "medium" => Ok(Self::Medium),
            "3" | "high" => Ok(Self::High),
            _ => Err(ReportParseError::InvalidActivityLevel(value.trim().to_string())),
        }
    }
}

/// Everything a report command carries, before it is attributed to anyone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFields {
    pub address: String,
    pub tribe_size: TribeSize,
    pub activity_level: ActivityLevel,
    pub current_activity: String,
}

/// A submitted field report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_id: Uuid,
    pub subscriber_id: String,
    #[serde(flatten)]
    pub fields: ReportFields,
    pub posted_at: DateTime<Utc>,
}

impl Report {
    pub fn new(subscriber_id: impl Into<String>, fields: ReportFields) -> Self {
        Self {
            report_id: Uuid::now_v7(),
            subscriber_id: subscriber_id.into(),
            fields,
            posted_at: Utc::now(),
        }
    }
}

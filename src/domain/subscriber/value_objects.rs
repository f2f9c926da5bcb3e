use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ProfileError;

// ============================================================================
// Subscriber Value Objects
// ============================================================================

const NOT_SET: &str = "Not set";

/// Profile fields a subscriber may change with `update <field>: <value>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    Email,
    Nickname,
    Social,
    Consent,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Email,
        ProfileField::Nickname,
        ProfileField::Social,
        ProfileField::Consent,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            ProfileField::Email => "email",
            ProfileField::Nickname => "nickname",
            ProfileField::Social => "social",
            ProfileField::Consent => "consent",
        }
    }

    pub fn from_keyword(keyword: &str) -> Result<Self, ProfileError> {
        Self::ALL
            .into_iter()
            .find(|field| field.keyword() == keyword)
            .ok_or_else(|| ProfileError::UnknownField(keyword.to_string()))
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A subscriber, keyed by phone number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub social: Option<String>,
    pub consent: Option<bool>,
    /// Only verified subscribers may submit field reports
    pub is_verified: bool,
    pub joined_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nickname: None,
            email: None,
            social: None,
            consent: None,
            is_verified: false,
            joined_at: Utc::now(),
        }
    }

    /// Set a profile field from raw command text. An empty value clears it.
    pub fn apply_field(&mut self, field: ProfileField, value: &str) -> Result<(), ProfileError> {
        let value = value.trim();
        let text = (!value.is_empty()).then(|| value.to_string());

        match field {
            ProfileField::Email => {
                if let Some(email) = &text {
                    validate_email(email)?;
                }
                self.email = text;
            }
            ProfileField::Nickname => self.nickname = text,
            ProfileField::Social => self.social = text,
            ProfileField::Consent => {
                self.consent = match text {
                    Some(answer) => Some(parse_consent(&answer)?),
                    None => None,
                }
            }
        }

        Ok(())
    }

    pub fn render(&self) -> String {
        let consent = self
            .consent
            .map(|c| c.to_string())
            .unwrap_or_else(|| NOT_SET.to_string());

        format!(
            "Date Time Joined: {}\n\nYour Nickname: {}\nYour Email: {}\nSocial: {}\n\nConsent: {}\n(_needed to store & process your personal data_)",
            self.joined_at.format("%Y-%m-%d %H:%M:%S"),
            self.nickname.as_deref().unwrap_or(NOT_SET),
            self.email.as_deref().unwrap_or(NOT_SET),
            self.social.as_deref().unwrap_or(NOT_SET),
            consent,
        )
    }
}

fn validate_email(email: &str) -> Result<(), ProfileError> {
    if !email.contains('@') {
        return Err(ProfileError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

fn parse_consent(answer: &str) -> Result<bool, ProfileError> {
    match answer.to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(ProfileError::InvalidConsent(answer.to_string())),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

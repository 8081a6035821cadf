//! Core data types shared by the text client and the resource verifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identity recorded on every verification status.
pub const CHECKED_BY_SYSTEM: &str = "system";

/// Days until a verified resource should be checked again.
pub const RECHECK_AFTER_SUCCESS_DAYS: i64 = 7;

/// Days until a failed resource should be checked again.
pub const RECHECK_AFTER_FAILURE_DAYS: i64 = 1;

/// A religious text category used to select a provider set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tradition {
    Bible,
    Quran,
    Buddhist,
    Hindu,
    Sikh,
}

impl Tradition {
    pub fn all() -> &'static [Tradition] {
        &[
            Tradition::Bible,
            Tradition::Quran,
            Tradition::Buddhist,
            Tradition::Hindu,
            Tradition::Sikh,
        ]
    }

    /// Lowercase identifier used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tradition::Bible => "bible",
            Tradition::Quran => "quran",
            Tradition::Buddhist => "buddhist",
            Tradition::Hindu => "hindu",
            Tradition::Sikh => "sikh",
        }
    }

    /// Label stored in `TextResult::source`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tradition::Bible => "Bible",
            Tradition::Quran => "Quran",
            Tradition::Buddhist => "Buddhist",
            Tradition::Hindu => "Hindu",
            Tradition::Sikh => "Sikh",
        }
    }

    /// Conventional translation code used when the caller gives none.
    pub fn default_translation(&self) -> &'static str {
        match self {
            Tradition::Bible => "WEB",
            Tradition::Quran => "131",
            Tradition::Buddhist | Tradition::Hindu | Tradition::Sikh => "en",
        }
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Tradition {
    type Err = TextsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bible" | "christian" => Ok(Tradition::Bible),
            "quran" | "koran" | "islam" => Ok(Tradition::Quran),
            "buddhist" | "buddhism" => Ok(Tradition::Buddhist),
            "hindu" | "hinduism" => Ok(Tradition::Hindu),
            "sikh" | "sikhism" => Ok(Tradition::Sikh),
            other => Err(TextsError::UnknownTradition(other.to_string())),
        }
    }
}

/// A passage fetched from one provider, mapped into the common shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResult {
    pub reference: String,
    pub original_text: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    pub source: Tradition,
    /// Name of the provider that satisfied the request.
    pub api: String,
    pub metadata: TextMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetadata {
    pub language: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A search hit. No search backend produces these yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub reference: String,
    pub text: String,
    pub source: Tradition,
    pub api: String,
    pub relevance: f32,
}

/// Outcome of a liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationState {
    Pending,
    Verified,
    Failed,
}

impl VerificationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationState::Pending => "pending",
            VerificationState::Verified => "verified",
            VerificationState::Failed => "failed",
        }
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamped result of checking one resource URL.
///
/// `next_check` is advisory: the verifier never reads it back. A scheduler
/// outside this crate decides when to re-run verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatus {
    pub status: VerificationState,
    pub last_checked: DateTime<Utc>,
    pub next_check: DateTime<Utc>,
    pub checked_by: String,
    pub notes: String,
}

impl VerificationStatus {
    /// A resource that has not been checked yet. Due immediately.
    pub fn pending(now: DateTime<Utc>) -> Self {
        Self {
            status: VerificationState::Pending,
            last_checked: now,
            next_check: now,
            checked_by: CHECKED_BY_SYSTEM.to_string(),
            notes: "Awaiting verification".to_string(),
        }
    }

    pub fn verified(now: DateTime<Utc>) -> Self {
        Self {
            status: VerificationState::Verified,
            last_checked: now,
            next_check: now + Duration::days(RECHECK_AFTER_SUCCESS_DAYS),
            checked_by: CHECKED_BY_SYSTEM.to_string(),
            notes: "Resource available".to_string(),
        }
    }

    pub fn failed(now: DateTime<Utc>, notes: impl Into<String>) -> Self {
        Self {
            status: VerificationState::Failed,
            last_checked: now,
            next_check: now + Duration::days(RECHECK_AFTER_FAILURE_DAYS),
            checked_by: CHECKED_BY_SYSTEM.to_string(),
            notes: notes.into(),
        }
    }

    /// Classify an HTTP response status received at `now`.
    pub fn from_http_status(status: u16, now: DateTime<Utc>) -> Self {
        if (200..300).contains(&status) {
            Self::verified(now)
        } else {
            Self::failed(now, format!("Failed with status: {status}"))
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status == VerificationState::Verified
    }

    /// Whether `now` has reached the advisory re-check time.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_check
    }
}

/// All errors produced inside the crate.
///
/// The public text and verification operations never return these; they are
/// collapsed into `None` or a `failed` status at the per-provider or per-URL
/// boundary.
#[derive(thiserror::Error, Debug)]
pub enum TextsError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Failed to decode {provider} response: {source}")]
    Decode {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No credential configured for {0}")]
    MissingCredential(String),

    #[error("{0} returned an empty passage")]
    EmptyResult(String),

    #[error("Invalid reference for {provider}: {reference}")]
    InvalidReference { provider: String, reference: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unknown tradition: {0}")]
    UnknownTradition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type TextsResult<T> = Result<T, TextsError>;

//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ticket.
///
/// `Created -> Translated`, `Created -> Failed` and `Failed -> Translated` are
/// the only transitions. `Translated` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Accepted, no translation attempted yet.
    Created,
    /// Translation delivered by the provider.
    Translated,
    /// Last attempt failed at the provider; may be retried.
    Failed,
}

impl TicketStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Created,
        TicketStatus::Translated,
        TicketStatus::Failed,
    ];

    /// Returns the wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Created => "CREATED",
            TicketStatus::Translated => "TRANSLATED",
            TicketStatus::Failed => "FAILED",
        }
    }

    /// Whether a translation attempt may start from this status.
    pub fn can_translate(&self) -> bool {
        !matches!(self, TicketStatus::Translated)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status token is not one of the known statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for TicketStatus {
    type Err = ParseStatusError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CREATED" => Ok(TicketStatus::Created),
            "TRANSLATED" => Ok(TicketStatus::Translated),
            "FAILED" => Ok(TicketStatus::Failed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A single translation request and its evolving result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Store-assigned identifier.
    pub id: i64,
    /// Text to translate.
    pub original_text: String,
    /// Source language tag; empty means auto-detect.
    pub source_lang: String,
    /// Target language tag.
    pub target_lang: String,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Present iff `status == Translated`.
    pub translated_text: Option<String>,
    /// When the ticket was created.
    pub created_at: DateTime<Utc>,
    /// Present iff `status == Translated`.
    pub translated_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Record a successful translation.
    pub fn mark_translated(&mut self, translated_text: String, at: DateTime<Utc>) {
        self.status = TicketStatus::Translated;
        self.translated_text = Some(translated_text);
        self.translated_at = Some(at);
    }

    /// Record a failed attempt, clearing any previous result.
    pub fn mark_failed(&mut self) {
        self.status = TicketStatus::Failed;
        self.translated_text = None;
        self.translated_at = None;
    }

    /// Snapshot of the delivered content, if the ticket is translated.
    pub fn delivery_payload(&self) -> Option<DeliveryPayload> {
        if self.status != TicketStatus::Translated {
            return None;
        }
        let translated_text = self.translated_text.clone()?;
        Some(DeliveryPayload {
            original_text: self.original_text.clone(),
            translated_text,
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
        })
    }
}

/// Content handed to the client on delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

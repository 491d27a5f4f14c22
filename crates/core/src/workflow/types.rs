use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ticket::{DeliveryPayload, TicketStatus};

/// Input for creating a ticket. Validated by the engine.
#[derive(Debug, Clone, Default)]
pub struct CreateTicket {
    pub original_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Delivery confirmation for a translated ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub delivered: bool,
    pub ticket_id: i64,
    pub delivered_at: DateTime<Utc>,
    pub payload: DeliveryPayload,
}

/// Lightweight view of where a ticket is in its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationStatus {
    pub id: i64,
    pub status: TicketStatus,
    pub translated_text: Option<String>,
}

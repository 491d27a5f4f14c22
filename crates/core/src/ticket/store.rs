//! Ticket storage trait and types.

use thiserror::Error;

use crate::ticket::{Ticket, TicketStatus};

/// Error type for ticket storage operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(i64),
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Fields needed to persist a new ticket. The store assigns id, status and
/// creation time.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub original_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Filter for querying tickets.
#[derive(Debug, Clone)]
pub struct TicketFilter {
    /// Filter by status.
    pub status: Option<TicketStatus>,
    /// Maximum number of results.
    pub limit: i64,
    /// Offset for pagination.
    pub offset: i64,
}

impl Default for TicketFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketFilter {
    /// Create a new filter with defaults.
    pub fn new() -> Self {
        Self {
            status: None,
            limit: 100,
            offset: 0,
        }
    }

    /// Filter by status.
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set limit.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set offset.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}

/// Trait for ticket storage backends.
///
/// Stores persist whatever they are given; status transitions are decided by
/// the workflow engine.
pub trait TicketStore: Send + Sync {
    /// Create a new ticket in `Created` status.
    fn create(&self, request: NewTicket) -> Result<Ticket, TicketError>;

    /// Get a ticket by ID.
    fn get(&self, id: i64) -> Result<Option<Ticket>, TicketError>;

    /// List tickets matching the filter, ordered by id.
    fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, TicketError>;

    /// Count tickets matching the filter (limit/offset ignored).
    fn count(&self, filter: &TicketFilter) -> Result<i64, TicketError>;

    /// Overwrite the mutable fields (status, translated text, translated
    /// time) of an existing ticket.
    fn save(&self, ticket: &Ticket) -> Result<Ticket, TicketError>;
}

//! The ticket state machine.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::locks::TicketLocks;
use super::{CreateTicket, Delivery, TranslationStatus, WorkflowError};
use crate::metrics::{DELIVERIES, TICKETS_CREATED, TICKET_STATE_TRANSITIONS, TRANSLATION_ATTEMPTS};
use crate::ticket::{NewTicket, Ticket, TicketFilter, TicketStatus, TicketStore};
use crate::translator::TranslationProvider;

/// Drives tickets through `CREATED -> TRANSLATED | FAILED -> TRANSLATED`.
///
/// `translate` calls on the same ticket are serialized by a per-ticket lock
/// held from load to persist, so two concurrent attempts never both reach the
/// provider for a ticket that ends up translated. Different tickets proceed
/// in parallel.
pub struct TicketWorkflow {
    store: Arc<dyn TicketStore>,
    provider: Arc<dyn TranslationProvider>,
    locks: TicketLocks,
}

impl TicketWorkflow {
    pub fn new(store: Arc<dyn TicketStore>, provider: Arc<dyn TranslationProvider>) -> Self {
        Self {
            store,
            provider,
            locks: TicketLocks::default(),
        }
    }

    /// The underlying store (read access for status gauges).
    pub fn store(&self) -> &Arc<dyn TicketStore> {
        &self.store
    }

    /// Validate and persist a new ticket in `CREATED` status.
    pub fn create_ticket(&self, request: CreateTicket) -> Result<Ticket, WorkflowError> {
        for (field, value) in [
            ("originalText", &request.original_text),
            ("sourceLang", &request.source_lang),
            ("targetLang", &request.target_lang),
        ] {
            if value.trim().is_empty() {
                return Err(WorkflowError::Validation(format!(
                    "{field}: {field} is required"
                )));
            }
        }

        let ticket = self.store.create(NewTicket {
            original_text: request.original_text,
            source_lang: request.source_lang,
            target_lang: request.target_lang,
        })?;

        TICKETS_CREATED.inc();
        info!(
            ticket_id = ticket.id,
            source_lang = %ticket.source_lang,
            target_lang = %ticket.target_lang,
            "Ticket created"
        );

        Ok(ticket)
    }

    /// Load a ticket or fail with `NotFound`.
    pub fn get_or_throw(&self, id: i64) -> Result<Ticket, WorkflowError> {
        self.store.get(id)?.ok_or(WorkflowError::NotFound(id))
    }

    /// All tickets, or only those with the given status.
    ///
    /// A blank token means no filter. Status tokens are case-insensitive;
    /// unknown tokens are a validation error.
    pub fn list_tickets(&self, status: Option<&str>) -> Result<Vec<Ticket>, WorkflowError> {
        let mut filter = TicketFilter::new().with_limit(i64::MAX);

        if let Some(token) = status.filter(|s| !s.trim().is_empty()) {
            let parsed = token
                .parse::<TicketStatus>()
                .map_err(|e| WorkflowError::Validation(e.to_string()))?;
            filter = filter.with_status(parsed);
        }

        Ok(self.store.list(&filter)?)
    }

    /// Attempt a translation.
    ///
    /// On provider failure the ticket is persisted as `FAILED` before the
    /// `BadGateway` error is returned, so a later lookup always reflects the
    /// attempt.
    pub async fn translate(&self, id: i64) -> Result<Ticket, WorkflowError> {
        let _lock = self.locks.acquire(id).await;

        let mut ticket = self.get_or_throw(id)?;

        if !ticket.status.can_translate() {
            TRANSLATION_ATTEMPTS.with_label_values(&["rejected"]).inc();
            return Err(WorkflowError::AlreadyTranslated(id));
        }

        let previous = ticket.status;

        let outcome = self
            .provider
            .translate(
                &ticket.original_text,
                Some(ticket.source_lang.as_str()),
                Some(ticket.target_lang.as_str()),
            )
            .await;

        match outcome {
            Ok(translated) => {
                ticket.mark_translated(translated, Utc::now());
                let saved = self.store.save(&ticket)?;

                record_transition(previous, saved.status);
                TRANSLATION_ATTEMPTS.with_label_values(&["translated"]).inc();
                info!(
                    ticket_id = id,
                    provider = self.provider.name(),
                    "Ticket translated"
                );

                Ok(saved)
            }
            Err(provider_error) => {
                warn!(
                    ticket_id = id,
                    provider = self.provider.name(),
                    error = %provider_error,
                    "Translation provider failed, marking ticket as failed"
                );

                ticket.mark_failed();
                if let Err(e) = self.store.save(&ticket) {
                    error!(ticket_id = id, error = %e, "Failed to persist FAILED status");
                    return Err(e.into());
                }

                record_transition(previous, TicketStatus::Failed);
                TRANSLATION_ATTEMPTS.with_label_values(&["failed"]).inc();

                Err(WorkflowError::BadGateway(provider_error.to_string()))
            }
        }
    }

    /// Hand out a translated ticket's content. Read-only and repeatable.
    pub fn deliver(&self, id: i64) -> Result<Delivery, WorkflowError> {
        let ticket = self.get_or_throw(id)?;

        let payload = ticket
            .delivery_payload()
            .ok_or(WorkflowError::NotTranslated(id))?;

        DELIVERIES.inc();

        Ok(Delivery {
            delivered: true,
            ticket_id: ticket.id,
            delivered_at: Utc::now(),
            payload,
        })
    }

    /// Current status and result of a ticket.
    pub fn translation_status(&self, id: i64) -> Result<TranslationStatus, WorkflowError> {
        let ticket = self.get_or_throw(id)?;
        Ok(TranslationStatus {
            id: ticket.id,
            status: ticket.status,
            translated_text: ticket.translated_text,
        })
    }
}

fn record_transition(from: TicketStatus, to: TicketStatus) {
    TICKET_STATE_TRANSITIONS
        .with_label_values(&[from.as_str(), to.as_str()])
        .inc();
}

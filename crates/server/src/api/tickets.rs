//! Ticket API handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use parlance_core::{CreateTicket, Delivery, Ticket, TicketStatus, TranslationStatus};

use super::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a ticket.
///
/// Fields are optional here so that a missing field is reported as a
/// validation error naming it, rather than as a decode failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketBody {
    pub original_text: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
}

/// Query parameters for listing tickets
#[derive(Debug, Deserialize)]
pub struct ListTicketsParams {
    /// Filter by status (case-insensitive)
    pub status: Option<String>,
}

/// Response for ticket operations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: i64,
    pub original_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub status: TicketStatus,
    pub translated_text: Option<String>,
    pub created_at: String,
    pub translated_at: Option<String>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            original_text: ticket.original_text,
            source_lang: ticket.source_lang,
            target_lang: ticket.target_lang,
            status: ticket.status,
            translated_text: ticket.translated_text,
            created_at: ticket.created_at.to_rfc3339(),
            translated_at: ticket.translated_at.map(|t| t.to_rfc3339()),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new ticket
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTicketBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let Json(body) = body?;

    let ticket = state.workflow().create_ticket(CreateTicket {
        original_text: body.original_text.unwrap_or_default(),
        source_lang: body.source_lang.unwrap_or_default(),
        target_lang: body.target_lang.unwrap_or_default(),
    })?;

    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
}

/// Get a ticket by ID
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TicketResponse>, ApiError> {
    let Path(id) = id?;
    let ticket = state.workflow().get_or_throw(id)?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// List tickets, optionally filtered by status
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListTicketsParams>, QueryRejection>,
) -> Result<Json<Vec<TicketResponse>>, ApiError> {
    let Query(params) = params?;
    let tickets = state.workflow().list_tickets(params.status.as_deref())?;
    Ok(Json(tickets.into_iter().map(TicketResponse::from).collect()))
}

/// Translate a ticket through the provider
pub async fn translate_ticket(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TicketResponse>, ApiError> {
    let Path(id) = id?;

    // Detached so a client disconnect cannot cancel the attempt between the
    // provider call and persisting its outcome.
    let workflow = Arc::clone(state.workflow());
    let ticket = tokio::spawn(async move { workflow.translate(id).await })
        .await
        .map_err(|e| ApiError::internal(format!("Translation task failed: {}", e)))??;

    Ok(Json(TicketResponse::from(ticket)))
}

/// Deliver a translated ticket
pub async fn deliver_ticket(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Delivery>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.workflow().deliver(id)?))
}

/// Status view of a ticket
pub async fn get_translation_status(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TranslationStatus>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.workflow().translation_status(id)?))
}

//! Ticket workflow engine.
//!
//! Owns every status transition of a ticket: creation, translation attempts
//! against the provider, and delivery of finished translations.

mod engine;
mod error;
mod locks;
mod types;

pub use engine::TicketWorkflow;
pub use error::{ErrorKind, WorkflowError};
pub use types::{CreateTicket, Delivery, TranslationStatus};

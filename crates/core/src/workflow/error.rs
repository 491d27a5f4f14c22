use thiserror::Error;

use crate::ticket::TicketError;

/// Errors surfaced by workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    #[error("Ticket with id {0} not found")]
    NotFound(i64),

    #[error("Ticket with id {0} is already translated")]
    AlreadyTranslated(i64),

    #[error("Ticket with id {0} is not translated yet")]
    NotTranslated(i64),

    /// The provider failed; the ticket has been stored as FAILED.
    #[error("Translation provider failed: {0}")]
    BadGateway(String),

    /// Unexpected persistence failure.
    #[error(transparent)]
    Store(TicketError),
}

/// Coarse classification used by transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    BadGateway,
    Internal,
}

impl WorkflowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Validation(_) => ErrorKind::Validation,
            WorkflowError::NotFound(_) => ErrorKind::NotFound,
            WorkflowError::AlreadyTranslated(_) | WorkflowError::NotTranslated(_) => {
                ErrorKind::Conflict
            }
            WorkflowError::BadGateway(_) => ErrorKind::BadGateway,
            WorkflowError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<TicketError> for WorkflowError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(id) => WorkflowError::NotFound(id),
            other => WorkflowError::Store(other),
        }
    }
}

//! Ticket model and persistence for translation requests.

mod sqlite_store;
mod store;
mod types;

pub use sqlite_store::SqliteTicketStore;
pub use store::{NewTicket, TicketError, TicketFilter, TicketStore};
pub use types::{DeliveryPayload, ParseStatusError, Ticket, TicketStatus};

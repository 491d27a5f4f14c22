pub mod config;
pub mod metrics;
pub mod testing;
pub mod ticket;
pub mod translator;
pub mod workflow;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, CorsConfig,
    DatabaseConfig, ProviderConfig, SanitizedConfig, ServerConfig,
};
pub use ticket::{
    DeliveryPayload, NewTicket, ParseStatusError, SqliteTicketStore, Ticket, TicketError,
    TicketFilter, TicketStatus, TicketStore,
};
pub use translator::{to_deepl_lang, DeeplClient, ProviderError, TranslationProvider};
pub use workflow::{
    CreateTicket, Delivery, ErrorKind, TicketWorkflow, TranslationStatus, WorkflowError,
};

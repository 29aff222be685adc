//! Ticket model and storage.

mod coerce;
mod memory_store;
mod store;
mod types;

pub use coerce::{coerce_status, is_truthy, parse_int_prefix, ticket_id_from_value, value_to_text};
pub use memory_store::MemoryTicketStore;
pub use store::TicketStore;
pub use types::{CreateTicketRequest, Ticket, TicketId, TicketSummary, UpdateTicketRequest};

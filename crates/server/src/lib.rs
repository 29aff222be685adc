//! HTTP transport for the ticketdesk RPC endpoint.

pub mod api;
pub mod metrics;
pub mod state;

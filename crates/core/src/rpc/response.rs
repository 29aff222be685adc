//! Transport-agnostic response shape.

use serde::{Deserialize, Serialize};

use super::RpcError;
use crate::ticket::{Ticket, TicketSummary};

/// Status code used for every successful operation.
pub const STATUS_OK: u16 = 200;

/// Body of the `deleteTicket` operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deletion {
    pub deleted: bool,
    pub ticket: Option<Ticket>,
}

/// Error body, `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl From<RpcError> for ErrorBody {
    fn from(error: RpcError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Response body, serialized without any enclosing tag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ResponseBody {
    Tickets(Vec<TicketSummary>),
    Ticket(Ticket),
    Deletion(Deletion),
    Error(ErrorBody),
}

/// Status code plus body, ready for the transport to render.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RpcResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl RpcResponse {
    pub fn ok(body: ResponseBody) -> Self {
        Self {
            status: STATUS_OK,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<RpcError> for RpcResponse {
    fn from(error: RpcError) -> Self {
        Self {
            status: error.status(),
            body: ResponseBody::Error(error.into()),
        }
    }
}

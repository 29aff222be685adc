//! Inbound request shape.

use std::fmt;

use serde_json::{Map, Value};

/// Flat key/value parameters decoded by the transport.
pub type Payload = Map<String, Value>;

/// Operations understood by the router, keyed by the `method` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AllTickets,
    TicketById,
    CreateTicket,
    EditTicket,
    DeleteTicket,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::AllTickets,
        Operation::TicketById,
        Operation::CreateTicket,
        Operation::EditTicket,
        Operation::DeleteTicket,
    ];

    /// Look up an operation by its wire name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::AllTickets => "allTickets",
            Operation::TicketById => "ticketById",
            Operation::CreateTicket => "createTicket",
            Operation::EditTicket => "editTicket",
            Operation::DeleteTicket => "deleteTicket",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded RPC request.
///
/// `query` holds the query-string parameters (as text values). `body` is
/// `None` when the transport received no body at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpcRequest {
    pub method: Option<String>,
    pub query: Payload,
    pub body: Option<Payload>,
}

impl RpcRequest {
    /// Create a request for the given operation name.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Default::default()
        }
    }

    /// Add a query-string parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Set the body. A JSON object becomes the payload; any other value
    /// yields a body without fields.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(match body {
            Value::Object(fields) => fields,
            _ => Payload::new(),
        });
        self
    }

    /// The operation this request names, if it is a known one.
    pub fn operation(&self) -> Option<Operation> {
        self.method.as_deref().and_then(Operation::from_name)
    }

    /// A body field, or `None` when the field or the whole body is missing.
    pub fn body_field(&self, key: &str) -> Option<&Value> {
        self.body.as_ref().and_then(|body| body.get(key))
    }
}

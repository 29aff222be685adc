//! Core ticket data types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Identifier assigned by the store. Starts at 0 and only ever grows.
pub type TicketId = u64;

// ============================================================================
// Ticket Records
// ============================================================================

/// Full ticket record, as returned by fetch and mutation operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    /// Store-assigned identifier, immutable.
    pub id: TicketId,
    /// Short title of the ticket.
    pub name: String,
    /// Free text, empty when the caller gave none.
    pub description: String,
    /// Done / not-done flag.
    pub status: bool,
    /// Creation time, immutable.
    #[serde(serialize_with = "serialize_timestamp")]
    pub created: DateTime<Utc>,
}

impl Ticket {
    /// Project this ticket into its list view (no description).
    pub fn summary(&self) -> TicketSummary {
        TicketSummary {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
            created: self.created,
        }
    }
}

/// List projection of a ticket. Never carries the description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketSummary {
    pub id: TicketId,
    pub name: String,
    pub status: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created: DateTime<Utc>,
}

impl From<&Ticket> for TicketSummary {
    fn from(ticket: &Ticket) -> Self {
        ticket.summary()
    }
}

/// Timestamps go over the wire as `2026-10-16T09:30:00.123Z`.
fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// ============================================================================
// Store Requests
// ============================================================================

/// Request to create a new ticket.
///
/// `status` is the raw caller-supplied value; the store applies
/// [`coerce_status`](crate::ticket::coerce_status) to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTicketRequest {
    pub name: String,
    pub description: String,
    pub status: Option<Value>,
}

impl CreateTicketRequest {
    /// Create a request with an empty description and no status.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the raw status value.
    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request to overwrite an existing ticket.
///
/// `name` and `description` always replace the stored values. `status` is
/// only applied when present: `None` leaves the stored flag untouched, while
/// `Some(Value::Null)` or `Some(false)` clear it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTicketRequest {
    pub name: String,
    pub description: String,
    pub status: Option<Value>,
}

impl UpdateTicketRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }
}

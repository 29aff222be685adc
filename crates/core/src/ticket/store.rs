//! Ticket storage trait.

use crate::ticket::{CreateTicketRequest, Ticket, TicketId, TicketSummary, UpdateTicketRequest};

/// Trait for ticket storage backends.
///
/// Every operation is total: "not found" is reported as `None`, never as an
/// error. Input validation belongs to the caller; a store accepts any name,
/// including an empty one.
pub trait TicketStore: Send + Sync {
    /// Summaries of every ticket, in insertion order.
    fn list_all(&self) -> Vec<TicketSummary>;

    /// Get a ticket by ID.
    fn find_by_id(&self, id: TicketId) -> Option<Ticket>;

    /// Create a new ticket with the next unused id.
    fn create(&self, request: CreateTicketRequest) -> Ticket;

    /// Overwrite name and description (and status, when supplied) of an
    /// existing ticket. Returns the updated ticket.
    fn update(&self, id: TicketId, request: UpdateTicketRequest) -> Option<Ticket>;

    /// Permanently delete a ticket.
    /// Returns the deleted ticket if found.
    fn delete(&self, id: TicketId) -> Option<Ticket>;

    /// Push the example tickets if the store is currently empty.
    ///
    /// Guarded by emptiness only, so an emptied store seeds again (with
    /// fresh ids). Returns `true` when tickets were added.
    fn seed_if_empty(&self) -> bool;

    /// Number of tickets currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! In-memory ticket store implementation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::debug;

use super::{
    coerce_status, CreateTicketRequest, Ticket, TicketId, TicketStore, TicketSummary,
    UpdateTicketRequest,
};

/// Example tickets pushed by [`TicketStore::seed_if_empty`].
const EXAMPLE_TICKETS: [(&str, &str, bool); 2] = [
    (
        "Install new version",
        "Install Windows 10, drivers for printer, MS Office, save documents and mediafiles",
        false,
    ),
    (
        "Replace cartridge",
        "Replace cartridge for printer Samsung in cabinet #404",
        true,
    ),
];

/// Ticket store backed by a `Vec` behind a mutex.
///
/// Insertion order is preserved. Each operation holds the lock for one short
/// synchronous step, so concurrent requests are applied one at a time with
/// last-write-wins semantics.
pub struct MemoryTicketStore {
    inner: Mutex<Inner>,
}

struct Inner {
    tickets: Vec<Ticket>,
    next_id: TicketId,
}

impl Inner {
    fn push(&mut self, name: String, description: String, status: bool) -> Ticket {
        let ticket = Ticket {
            id: self.next_id,
            name,
            description,
            status,
            created: Utc::now(),
        };
        self.next_id += 1;
        self.tickets.push(ticket.clone());
        ticket
    }

    fn position(&self, id: TicketId) -> Option<usize> {
        self.tickets.iter().position(|ticket| ticket.id == id)
    }
}

impl MemoryTicketStore {
    /// Create an empty store. Ids start at 0.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tickets: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Create a store holding the two example tickets (ids 0 and 1).
    pub fn seeded() -> Self {
        let store = Self::new();
        store.seed_if_empty();
        store
    }

    // A panic while the lock is held cannot leave `Inner` half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketStore for MemoryTicketStore {
    fn list_all(&self) -> Vec<TicketSummary> {
        self.lock().tickets.iter().map(Ticket::summary).collect()
    }

    fn find_by_id(&self, id: TicketId) -> Option<Ticket> {
        let inner = self.lock();
        inner.tickets.iter().find(|ticket| ticket.id == id).cloned()
    }

    fn create(&self, request: CreateTicketRequest) -> Ticket {
        let status = coerce_status(request.status.as_ref());
        let ticket = self
            .lock()
            .push(request.name, request.description, status);
        debug!(id = ticket.id, status = ticket.status, "ticket created");
        ticket
    }

    fn update(&self, id: TicketId, request: UpdateTicketRequest) -> Option<Ticket> {
        let mut inner = self.lock();
        let index = inner.position(id)?;
        let ticket = &mut inner.tickets[index];

        ticket.name = request.name;
        ticket.description = request.description;
        if let Some(raw) = request.status.as_ref() {
            ticket.status = coerce_status(Some(raw));
            debug!(id, status = ticket.status, "ticket status updated");
        }

        Some(ticket.clone())
    }

    fn delete(&self, id: TicketId) -> Option<Ticket> {
        let mut inner = self.lock();
        let index = inner.position(id)?;
        let removed = inner.tickets.remove(index);
        debug!(id, "ticket deleted");
        Some(removed)
    }

    fn seed_if_empty(&self) -> bool {
        let mut inner = self.lock();
        if !inner.tickets.is_empty() {
            return false;
        }

        for (name, description, status) in EXAMPLE_TICKETS {
            inner.push(name.to_string(), description.to_string(), status);
        }
        debug!(count = EXAMPLE_TICKETS.len(), "seeded example tickets");
        true
    }

    fn len(&self) -> usize {
        self.lock().tickets.len()
    }
}

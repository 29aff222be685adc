use std::sync::Arc;
use ticketdesk_core::{Config, RequestRouter, TicketStore};

/// Shared application state
pub struct AppState {
    config: Config,
    router: RequestRouter,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn TicketStore>) -> Self {
        Self {
            config,
            router: RequestRouter::new(store),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router(&self) -> &RequestRouter {
        &self.router
    }

    pub fn ticket_store(&self) -> &dyn TicketStore {
        self.router.store()
    }
}

//! Dispatch of RPC requests onto a [`TicketStore`].

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{Deletion, ErrorBody, Operation, ResponseBody, RpcError, RpcRequest, RpcResponse};
use crate::ticket::{
    is_truthy, ticket_id_from_value, value_to_text, CreateTicketRequest, TicketStore,
    UpdateTicketRequest,
};

/// Validates requests and turns them into store calls.
///
/// All input checks happen here; once a store method is called it cannot
/// fail.
#[derive(Clone)]
pub struct RequestRouter {
    store: Arc<dyn TicketStore>,
}

impl RequestRouter {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    /// The store this router dispatches to.
    pub fn store(&self) -> &dyn TicketStore {
        self.store.as_ref()
    }

    /// Resolve a request into a status code and body.
    pub fn dispatch(&self, request: &RpcRequest) -> RpcResponse {
        let Some(operation) = request.operation() else {
            debug!(method = ?request.method, "unknown rpc method");
            return RpcError::MethodNotFound.into();
        };

        let result = match operation {
            Operation::AllTickets => Ok(self.all_tickets()),
            Operation::TicketById => self.ticket_by_id(request),
            Operation::CreateTicket => self.create_ticket(request),
            Operation::EditTicket => self.edit_ticket(request),
            Operation::DeleteTicket => self.delete_ticket(request),
        };

        match result {
            Ok(body) => RpcResponse::ok(body),
            Err(error) => {
                debug!(%operation, %error, "rpc request rejected");
                error.into()
            }
        }
    }

    fn all_tickets(&self) -> ResponseBody {
        ResponseBody::Tickets(self.store.list_all())
    }

    fn ticket_by_id(&self, request: &RpcRequest) -> Result<ResponseBody, RpcError> {
        let id = required(request.query.get("id")).ok_or(RpcError::IdParameterRequired)?;

        ticket_id_from_value(id)
            .and_then(|id| self.store.find_by_id(id))
            .map(ResponseBody::Ticket)
            .ok_or(RpcError::TicketNotFound)
    }

    fn create_ticket(&self, request: &RpcRequest) -> Result<ResponseBody, RpcError> {
        let title = required(request.body_field("title")).ok_or(RpcError::TitleRequired)?;

        let ticket = self.store.create(CreateTicketRequest {
            name: value_to_text(title),
            description: description_of(request),
            status: request.body_field("status").cloned(),
        });
        Ok(ResponseBody::Ticket(ticket))
    }

    fn edit_ticket(&self, request: &RpcRequest) -> Result<ResponseBody, RpcError> {
        let (Some(id), Some(title)) = (
            required(request.body_field("id")),
            required(request.body_field("title")),
        ) else {
            return Err(RpcError::IdAndTitleRequired);
        };

        let update = UpdateTicketRequest {
            name: value_to_text(title),
            description: description_of(request),
            status: request.body_field("status").cloned(),
        };

        // A missing ticket still answers with the success status and an
        // error-shaped body; clients depend on this.
        Ok(ticket_id_from_value(id)
            .and_then(|id| self.store.update(id, update))
            .map(ResponseBody::Ticket)
            .unwrap_or_else(|| ResponseBody::Error(ErrorBody::from(RpcError::TicketNotFound))))
    }

    fn delete_ticket(&self, request: &RpcRequest) -> Result<ResponseBody, RpcError> {
        let id = required(request.body_field("id")).ok_or(RpcError::IdRequired)?;

        let ticket = ticket_id_from_value(id).and_then(|id| self.store.delete(id));
        Ok(ResponseBody::Deletion(Deletion {
            deleted: ticket.is_some(),
            ticket,
        }))
    }
}

/// Keep a parameter only if it is present and truthy.
fn required(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| is_truthy(value))
}

fn description_of(request: &RpcRequest) -> String {
    required(request.body_field("description"))
        .map(value_to_text)
        .unwrap_or_default()
}

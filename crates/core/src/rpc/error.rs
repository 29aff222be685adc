use thiserror::Error;

/// Failures reported to RPC callers.
///
/// The `Display` text is the exact `error` message placed in the response
/// body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("ID parameter is required")]
    IdParameterRequired,

    #[error("Title is required")]
    TitleRequired,

    #[error("ID and title are required")]
    IdAndTitleRequired,

    #[error("ID is required")]
    IdRequired,

    #[error("Ticket not found")]
    TicketNotFound,

    #[error("Method not found")]
    MethodNotFound,

    /// The transport could not decode the request body.
    #[error("Invalid request body")]
    InvalidBody,
}

impl RpcError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            RpcError::IdParameterRequired
            | RpcError::TitleRequired
            | RpcError::IdAndTitleRequired
            | RpcError::IdRequired
            | RpcError::InvalidBody => 400,
            RpcError::TicketNotFound | RpcError::MethodNotFound => 404,
        }
    }
}

//! Single-endpoint RPC contract on top of the ticket store.

mod error;
mod request;
mod response;
mod router;

pub use error::RpcError;
pub use request::{Operation, Payload, RpcRequest};
pub use response::{Deletion, ErrorBody, ResponseBody, RpcResponse, STATUS_OK};
pub use router::RequestRouter;

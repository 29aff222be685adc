pub mod config;
pub mod rpc;
pub mod ticket;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
    ServerConfig, StoreConfig,
};
pub use rpc::{
    Deletion, ErrorBody, Operation, Payload, RequestRouter, ResponseBody, RpcError, RpcRequest,
    RpcResponse,
};
pub use ticket::{
    CreateTicketRequest, MemoryTicketStore, Ticket, TicketId, TicketStore, TicketSummary,
    UpdateTicketRequest,
};

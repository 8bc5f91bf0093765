//! # JSON-RPC 2.0 Dispatcher
//!
//! A transport-agnostic routing table for JSON-RPC 2.0. Handlers are registered
//! against method names; each decoded request or notification is then routed to
//! its handler by name.
//!
//! ## Features
//! - Separate request and notification namespaces
//! - All-or-nothing registration with duplicate detection
//! - Standard `-32601 Method not found` responses that echo the request id
//! - Unknown notifications dropped silently, as the protocol requires
//! - Optional `xProcTime` processing time reporting
//! - Safe to share across tasks: lookups take a read lock, handlers run unlocked
//!
//! Parsing, transports and batching live elsewhere; this crate starts from
//! already-decoded messages.

pub mod context;
pub mod error;
pub mod notification;
pub mod request;
pub mod response;
pub mod types;

#[cfg(feature = "async")]
pub mod dispatcher;
#[cfg(feature = "async")]
pub mod handler;

pub mod prelude;

// Re-export main types
pub use context::MessageContext;
pub use error::{
    DispatchError, DispatchResult, HandlerKind, JsonRpcError, JsonRpcErrorCode,
    JsonRpcErrorObject,
};
pub use notification::JsonRpcNotification;
pub use request::{JsonRpcRequest, RequestParams};
pub use response::{JsonRpcMessage, JsonRpcResponse, NonStdAttributes, ResponseResult};
pub use types::{JsonRpcVersion, RequestId};

#[cfg(feature = "async")]
pub use dispatcher::{Dispatcher, DispatcherConfig, IncomingMessage, PROC_TIME_ATTRIBUTE};
#[cfg(feature = "async")]
pub use handler::{FnNotificationHandler, FnRequestHandler, NotificationHandler, RequestHandler};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Server error range: -32099 to -32000
    pub const SERVER_ERROR_START: i64 = -32099;
    pub const SERVER_ERROR_END: i64 = -32000;
}

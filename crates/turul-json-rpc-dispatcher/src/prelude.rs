//! # Dispatcher Prelude
//!
//! ```rust
//! use turul_json_rpc_dispatcher::prelude::*;
//! ```

pub use crate::context::MessageContext;
pub use crate::error::{DispatchError, HandlerKind, JsonRpcError, JsonRpcErrorObject};
pub use crate::notification::JsonRpcNotification;
pub use crate::request::{JsonRpcRequest, RequestParams};
pub use crate::response::{JsonRpcMessage, ResponseResult};
pub use crate::types::RequestId;

#[cfg(feature = "async")]
pub use crate::dispatcher::{Dispatcher, DispatcherConfig, IncomingMessage};
#[cfg(feature = "async")]
pub use crate::handler::{NotificationHandler, RequestHandler};

pub use crate::error_codes::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::response::{NonStdAttributes, insert_non_std_attribute};
use crate::types::{JsonRpcVersion, RequestId};

/// JSON-RPC error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ServerError(i64), // -32099 to -32000
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => crate::error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => crate::error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => crate::error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => crate::error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => crate::error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::ServerError(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::ServerError(_) => "Server error",
        }
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// The `error` member of an error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: JsonRpcErrorCode, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            code: code.code(),
            message: message.unwrap_or_else(|| code.message().to_string()),
            data,
        }
    }

    pub fn parse_error(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::ParseError, None, data)
    }

    pub fn invalid_request(data: Option<Value>) -> Self {
        Self::new(JsonRpcErrorCode::InvalidRequest, None, data)
    }

    /// The standard `-32601 "Method not found"` object.
    pub fn method_not_found() -> Self {
        Self::new(JsonRpcErrorCode::MethodNotFound, None, None)
    }

    pub fn invalid_params(message: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::InvalidParams,
            Some(message.to_string()),
            None,
        )
    }

    pub fn internal_error(message: Option<String>) -> Self {
        Self::new(JsonRpcErrorCode::InternalError, message, None)
    }

    /// Implementation-defined server error.
    ///
    /// Codes outside `-32099..=-32000` are clamped into the reserved range
    /// boundary rather than producing an out-of-range object.
    pub fn server_error(code: i64, message: &str, data: Option<Value>) -> Self {
        let code = code.clamp(
            crate::error_codes::SERVER_ERROR_START,
            crate::error_codes::SERVER_ERROR_END,
        );
        Self::new(
            JsonRpcErrorCode::ServerError(code),
            Some(message.to_string()),
            data,
        )
    }

    pub fn is_method_not_found(&self) -> bool {
        self.code == crate::error_codes::METHOD_NOT_FOUND
    }
}

/// JSON-RPC error response
///
/// `id` is [`RequestId::Null`] when the request id could not be determined
/// (parse errors), which is also how a client-sent `null` id is echoed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: RequestId,
    pub error: JsonRpcErrorObject,
    #[serde(flatten)]
    pub non_std_attributes: NonStdAttributes,
}

impl JsonRpcError {
    pub fn new(id: RequestId, error: JsonRpcErrorObject) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            error,
            non_std_attributes: NonStdAttributes::new(),
        }
    }

    pub fn parse_error() -> Self {
        Self::new(RequestId::Null, JsonRpcErrorObject::parse_error(None))
    }

    pub fn invalid_request(id: RequestId) -> Self {
        Self::new(id, JsonRpcErrorObject::invalid_request(None))
    }

    /// Error response for an unregistered method, echoing the request id
    pub fn method_not_found(id: RequestId) -> Self {
        Self::new(id, JsonRpcErrorObject::method_not_found())
    }

    pub fn invalid_params(id: RequestId, message: &str) -> Self {
        Self::new(id, JsonRpcErrorObject::invalid_params(message))
    }

    pub fn internal_error(id: RequestId, message: Option<String>) -> Self {
        Self::new(id, JsonRpcErrorObject::internal_error(message))
    }

    /// See [`crate::JsonRpcMessage::append_non_std_attribute`].
    pub fn append_non_std_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        insert_non_std_attribute(&mut self.non_std_attributes, name.into(), value.into())
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON-RPC Error {}: {}",
            self.error.code, self.error.message
        )
    }
}

impl std::error::Error for JsonRpcError {}

/// Which routing table a handler belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Request,
    Notification,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Request => f.write_str("request"),
            HandlerKind::Notification => f.write_str("notification"),
        }
    }
}

/// Local, registration-time failures of the dispatcher.
///
/// Unknown methods at dispatch time are not errors of this kind: they become
/// protocol responses (requests) or are dropped (notifications).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Cannot register a duplicate handler for {kind} {method}")]
    DuplicateHandler { kind: HandlerKind, method: String },

    #[error("Cannot register a {kind} handler for an empty method name")]
    InvalidMethodName { kind: HandlerKind },
}

impl DispatchError {
    /// Method name that caused the failure, if any
    pub fn method(&self) -> Option<&str> {
        match self {
            DispatchError::DuplicateHandler { method, .. } => Some(method),
            DispatchError::InvalidMethodName { .. } => None,
        }
    }
}

/// Result alias for registration operations
pub type DispatchResult<T> = Result<T, DispatchError>;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{JsonRpcError, JsonRpcErrorObject};
use crate::types::{JsonRpcVersion, RequestId};

/// Extra top-level members appended to a response after construction
pub type NonStdAttributes = Map<String, Value>;

/// Member names owned by the protocol; never usable as non-standard attributes
pub const RESERVED_MEMBERS: [&str; 4] = ["jsonrpc", "id", "result", "error"];

pub(crate) fn insert_non_std_attribute(
    attributes: &mut NonStdAttributes,
    name: String,
    value: Value,
) -> bool {
    if RESERVED_MEMBERS.contains(&name.as_str()) {
        warn!(attribute = %name, "Refusing non-standard attribute that shadows a standard member");
        return false;
    }
    attributes.insert(name, value);
    true
}

/// Result data for a JSON-RPC response
///
/// A `null` result is always held as [`ResponseResult::Null`], whether it was
/// built from a value or read off the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseResult {
    Success(Value),
    /// Null result (for void methods)
    Null,
}

impl ResponseResult {
    pub fn is_null(&self) -> bool {
        match self {
            ResponseResult::Null => true,
            ResponseResult::Success(value) => value.is_null(),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResponseResult::Success(value) => Some(value),
            ResponseResult::Null => None,
        }
    }
}

impl From<Value> for ResponseResult {
    fn from(value: Value) -> Self {
        if value.is_null() {
            ResponseResult::Null
        } else {
            ResponseResult::Success(value)
        }
    }
}

impl<'de> Deserialize<'de> for ResponseResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ResponseResult::from)
    }
}

impl From<()> for ResponseResult {
    fn from(_: ()) -> Self {
        ResponseResult::Null
    }
}

/// A successful JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: RequestId,
    pub result: ResponseResult,
    #[serde(flatten)]
    pub non_std_attributes: NonStdAttributes,
}

impl JsonRpcResponse {
    pub fn new(id: RequestId, result: ResponseResult) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            result,
            non_std_attributes: NonStdAttributes::new(),
        }
    }

    pub fn success(id: RequestId, result: Value) -> Self {
        Self::new(id, result.into())
    }

    pub fn null(id: RequestId) -> Self {
        Self::new(id, ResponseResult::Null)
    }

    /// See [`JsonRpcMessage::append_non_std_attribute`].
    pub fn append_non_std_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        insert_non_std_attribute(&mut self.non_std_attributes, name.into(), value.into())
    }
}

impl<T> From<(RequestId, T)> for JsonRpcResponse
where
    T: Into<ResponseResult>,
{
    fn from((id, result): (RequestId, T)) -> Self {
        Self::new(id, result.into())
    }
}

/// The response to a request: either a result or an error, never both
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Response(JsonRpcResponse),
    Error(JsonRpcError),
}

impl JsonRpcMessage {
    /// Response built from a result value and the request id
    pub fn success(id: RequestId, result: impl Into<ResponseResult>) -> Self {
        Self::Response(JsonRpcResponse::new(id, result.into()))
    }

    /// Response built from an error object and the request id
    pub fn from_error(error: JsonRpcErrorObject, id: RequestId) -> Self {
        Self::Error(JsonRpcError::new(id, error))
    }

    pub fn error(error: JsonRpcError) -> Self {
        Self::Error(error)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, JsonRpcMessage::Error(_))
    }

    /// Request id echoed by this response; [`RequestId::Null`] for errors
    /// raised before an id could be read (parse errors)
    pub fn id(&self) -> &RequestId {
        match self {
            JsonRpcMessage::Response(resp) => &resp.id,
            JsonRpcMessage::Error(err) => &err.id,
        }
    }

    pub fn result(&self) -> Option<&ResponseResult> {
        match self {
            JsonRpcMessage::Response(resp) => Some(&resp.result),
            JsonRpcMessage::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&JsonRpcErrorObject> {
        match self {
            JsonRpcMessage::Response(_) => None,
            JsonRpcMessage::Error(err) => Some(&err.error),
        }
    }

    /// Attach a non-standard top-level member such as `xProcTime`.
    ///
    /// Returns `false` and leaves the message untouched when `name` is one of
    /// [`RESERVED_MEMBERS`]. An existing attribute of the same name is replaced.
    pub fn append_non_std_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> bool {
        match self {
            JsonRpcMessage::Response(resp) => resp.append_non_std_attribute(name, value),
            JsonRpcMessage::Error(err) => err.append_non_std_attribute(name, value),
        }
    }

    pub fn non_std_attribute(&self, name: &str) -> Option<&Value> {
        self.non_std_attributes().get(name)
    }

    pub fn non_std_attributes(&self) -> &NonStdAttributes {
        match self {
            JsonRpcMessage::Response(resp) => &resp.non_std_attributes,
            JsonRpcMessage::Error(err) => &err.non_std_attributes,
        }
    }
}

impl From<JsonRpcResponse> for JsonRpcMessage {
    fn from(response: JsonRpcResponse) -> Self {
        Self::Response(response)
    }
}

impl From<JsonRpcError> for JsonRpcMessage {
    fn from(error: JsonRpcError) -> Self {
        Self::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serialization() {
        let message = JsonRpcMessage::success(RequestId::Number(1), json!(["hi"]));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "result": ["hi"]})
        );
    }

    #[test]
    fn test_non_std_attribute_is_top_level() {
        let mut message = JsonRpcMessage::success(RequestId::from("a"), json!("xyz"));
        assert!(message.append_non_std_attribute("xProcTime", "189 us"));

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": "a", "result": "xyz", "xProcTime": "189 us"})
        );
        assert_eq!(message.non_std_attribute("xProcTime"), Some(&json!("189 us")));
    }

    #[test]
    fn test_reserved_members_are_refused() {
        let mut message = JsonRpcMessage::from_error(
            JsonRpcErrorObject::internal_error(None),
            RequestId::Number(3),
        );
        for name in RESERVED_MEMBERS {
            assert!(!message.append_non_std_attribute(name, "oops"));
        }
        assert!(message.non_std_attributes().is_empty());
        assert_eq!(message.id(), &RequestId::Number(3));
        assert_eq!(message.error_object().map(|e| e.code), Some(-32603));
    }

    #[test]
    fn test_message_deserializes_to_matching_variant() {
        let ok: JsonRpcMessage = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": 5,
            "xProcTime": "3 us"
        }))
        .unwrap();
        assert!(!ok.is_error());
        assert_eq!(ok.non_std_attribute("xProcTime"), Some(&json!("3 us")));

        let err: JsonRpcMessage = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {"code": -32601, "message": "Method not found"}
        }))
        .unwrap();
        assert!(err.is_error());
        assert!(err.non_std_attributes().is_empty());
    }

    #[test]
    fn test_null_result_survives_a_round_trip() {
        let built = JsonRpcResponse::success(RequestId::Number(4), json!(null));
        let wire = serde_json::to_string(&built).unwrap();
        assert_eq!(wire, r#"{"jsonrpc":"2.0","id":4,"result":null}"#);

        let parsed: JsonRpcResponse = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed.result, built.result);
        assert_eq!(parsed.result, ResponseResult::Null);
    }

    #[test]
    fn test_null_id_error_survives_a_round_trip() {
        let sent =
            JsonRpcMessage::from_error(JsonRpcErrorObject::method_not_found(), RequestId::Null);
        let wire = serde_json::to_string(&sent).unwrap();
        let parsed: JsonRpcMessage = serde_json::from_str(&wire).unwrap();

        assert!(parsed.is_error());
        assert_eq!(parsed.id(), &RequestId::Null);
        assert_eq!(parsed.error_object(), sent.error_object());
    }

    #[test]
    fn test_response_result_conversion() {
        assert!(ResponseResult::from(json!(null)).is_null());
        assert!(ResponseResult::from(()).is_null());
        assert_eq!(
            ResponseResult::from(json!({"n": 1})).as_value(),
            Some(&json!({"n": 1}))
        );
    }
}

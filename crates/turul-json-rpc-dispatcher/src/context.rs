//! Transport-derived metadata handed to handlers alongside each message.

use std::collections::HashMap;
use std::net::IpAddr;

use serde_json::Value;

/// Per-message context supplied by the transport layer.
///
/// The dispatcher never inspects it; it is passed through to the handler as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageContext {
    /// Session the message arrived on, when the transport has sessions
    pub session_id: Option<String>,
    /// Host name of the remote client
    pub client_host_name: Option<String>,
    /// Network address of the remote client
    pub client_address: Option<IpAddr>,
    /// Whether the message was received over a secure channel (TLS)
    pub secure: bool,
    /// Authenticated identity of the caller
    pub principal: Option<String>,
    /// Anything else the transport wants handlers to see
    pub metadata: HashMap<String, Value>,
}

impl MessageContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_client_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.client_host_name = Some(host_name.into());
        self
    }

    pub fn with_client_address(mut self, address: IpAddr) -> Self {
        self.client_address = Some(address);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn get_metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_builder() {
        let ctx = MessageContext::new()
            .with_session_id("s-1")
            .with_client_address(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_secure(true)
            .with_principal("alice")
            .with_metadata("user-agent", "curl");

        assert_eq!(ctx.session_id.as_deref(), Some("s-1"));
        assert_eq!(ctx.client_address, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert!(ctx.secure);
        assert_eq!(ctx.principal.as_deref(), Some("alice"));
        assert_eq!(ctx.get_metadata("user-agent"), Some(&Value::from("curl")));
        assert!(ctx.client_host_name.is_none());
    }

    #[test]
    fn test_default_is_empty() {
        let ctx = MessageContext::default();
        assert!(!ctx.secure);
        assert!(ctx.session_id.is_none());
        assert!(ctx.metadata.is_empty());
    }
}

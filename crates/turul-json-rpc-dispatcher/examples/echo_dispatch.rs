//! Echo Dispatch Example
//!
//! Registers an `echo` request handler and a `log` notification handler, then
//! pushes a few decoded messages through the dispatcher and prints what would
//! be written back to the client.
//!
//! Run with `RUST_LOG=debug` to see registration and routing decisions.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turul_json_rpc_dispatcher::prelude::*;

/// Returns the request params as the result
struct Echo;

#[async_trait]
impl RequestHandler for Echo {
    fn handled_requests(&self) -> Vec<String> {
        vec!["echo".to_string()]
    }

    async fn process(
        &self,
        request: JsonRpcRequest,
        _context: Option<MessageContext>,
    ) -> JsonRpcMessage {
        let params = request
            .params
            .as_ref()
            .map(RequestParams::to_value)
            .unwrap_or(Value::Null);
        JsonRpcMessage::success(request.id, params)
    }
}

/// Writes notification params to the log
struct Log;

#[async_trait]
impl NotificationHandler for Log {
    fn handled_notifications(&self) -> Vec<String> {
        vec!["log".to_string()]
    }

    async fn process(&self, notification: JsonRpcNotification, context: Option<MessageContext>) {
        let session = context.and_then(|c| c.session_id).unwrap_or_default();
        info!(session = %session, params = ?notification.params, "client log");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dispatcher = Dispatcher::with_config(DispatcherConfig {
        report_proc_time: true,
    });
    dispatcher.register_request_handler(Arc::new(Echo))?;
    dispatcher.register_notification_handler(Arc::new(Log))?;

    let messages = [
        r#"{"jsonrpc": "2.0", "method": "echo", "params": ["hi"], "id": 1}"#,
        r#"{"jsonrpc": "2.0", "method": "ghost", "id": 2}"#,
        r#"{"jsonrpc": "2.0", "method": "log", "params": {"line": "hello"}}"#,
        r#"{"jsonrpc": "2.0", "method": "ghost", "params": []}"#,
    ];

    let context = MessageContext::new().with_session_id("demo");
    for raw in messages {
        println!("--> {}", raw);

        // Messages with an "id" member are requests, the rest are notifications
        let value: Value = serde_json::from_str(raw)?;
        let message = if value.get("id").is_some() {
            IncomingMessage::Request(serde_json::from_value(value)?)
        } else {
            IncomingMessage::Notification(serde_json::from_value(value)?)
        };

        match dispatcher.dispatch(message, Some(context.clone())).await {
            Some(response) => println!("<-- {}", serde_json::to_string(&response)?),
            None => println!("<-- (no response)"),
        }
    }

    Ok(())
}

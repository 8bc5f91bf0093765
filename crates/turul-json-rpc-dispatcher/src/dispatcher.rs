//! Method-name routing for requests and notifications.
//!
//! [`Dispatcher`] owns two independent tables, one for request handlers and
//! one for notification handlers. The same method name may appear in both.
//! Lookups take a shared read lock and clone the handler out before it runs,
//! so no lock is held while a handler is awaited.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::{
    context::MessageContext,
    error::{DispatchError, DispatchResult, HandlerKind, JsonRpcError},
    handler::{NotificationHandler, RequestHandler},
    notification::JsonRpcNotification,
    request::JsonRpcRequest,
    response::JsonRpcMessage,
};

/// Non-standard response member carrying the handler processing time
pub const PROC_TIME_ATTRIBUTE: &str = "xProcTime";

/// Configuration for a [`Dispatcher`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Append `xProcTime` (microseconds) to every handled request's response
    pub report_proc_time: bool,
}

/// A decoded incoming message of either kind
#[derive(Debug, Clone)]
pub enum IncomingMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
}

impl IncomingMessage {
    pub fn method(&self) -> &str {
        match self {
            IncomingMessage::Request(req) => &req.method,
            IncomingMessage::Notification(notif) => &notif.method,
        }
    }
}

impl From<JsonRpcRequest> for IncomingMessage {
    fn from(request: JsonRpcRequest) -> Self {
        Self::Request(request)
    }
}

impl From<JsonRpcNotification> for IncomingMessage {
    fn from(notification: JsonRpcNotification) -> Self {
        Self::Notification(notification)
    }
}

type RequestTable = HashMap<String, Arc<dyn RequestHandler>>;
type NotificationTable = HashMap<String, Arc<dyn NotificationHandler>>;

/// JSON-RPC 2.0 dispatch registry
pub struct Dispatcher {
    request_handlers: RwLock<RequestTable>,
    notification_handlers: RwLock<NotificationTable>,
    report_proc_time: AtomicBool,
}

impl Dispatcher {
    /// Create an empty dispatcher with processing time reporting disabled
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            request_handlers: RwLock::new(HashMap::new()),
            notification_handlers: RwLock::new(HashMap::new()),
            report_proc_time: AtomicBool::new(config.report_proc_time),
        }
    }

    /// Register `handler` under every name from [`RequestHandler::handled_requests`].
    ///
    /// Either all names are registered or none: if any name is empty, already
    /// taken, or declared twice, the table is left exactly as it was.
    pub fn register_request_handler(&self, handler: Arc<dyn RequestHandler>) -> DispatchResult<()> {
        let names = handler.handled_requests();
        register_all(
            &mut *self.request_handlers.write(),
            HandlerKind::Request,
            names,
            handler,
        )
    }

    /// Register `handler` under every name from
    /// [`NotificationHandler::handled_notifications`], with the same
    /// all-or-nothing contract as [`Dispatcher::register_request_handler`].
    pub fn register_notification_handler(
        &self,
        handler: Arc<dyn NotificationHandler>,
    ) -> DispatchResult<()> {
        let names = handler.handled_notifications();
        register_all(
            &mut *self.notification_handlers.write(),
            HandlerKind::Notification,
            names,
            handler,
        )
    }

    /// Currently registered request method names
    pub fn handled_requests(&self) -> HashSet<String> {
        self.request_handlers.read().keys().cloned().collect()
    }

    /// Currently registered notification method names
    pub fn handled_notifications(&self) -> HashSet<String> {
        self.notification_handlers.read().keys().cloned().collect()
    }

    pub fn request_handler(&self, method: &str) -> Option<Arc<dyn RequestHandler>> {
        self.request_handlers.read().get(method).cloned()
    }

    pub fn notification_handler(&self, method: &str) -> Option<Arc<dyn NotificationHandler>> {
        self.notification_handlers.read().get(method).cloned()
    }

    /// Route `request` to its handler and return the response.
    ///
    /// An unregistered method yields a `-32601 Method not found` error response
    /// carrying the request id; this never fails locally.
    pub async fn dispatch_request(
        &self,
        request: JsonRpcRequest,
        context: Option<MessageContext>,
    ) -> JsonRpcMessage {
        let Some(handler) = self.request_handler(&request.method) else {
            debug!(method = %request.method, id = %request.id, "Method not found");
            return JsonRpcMessage::error(JsonRpcError::method_not_found(request.id));
        };

        if !self.reports_proc_time() {
            return handler.process(request, context).await;
        }

        let method = request.method.clone();
        let started = Instant::now();
        let mut response = handler.process(request, context).await;
        let micros = started.elapsed().as_micros();

        trace!(method = %method, micros, "Request processed");
        response.append_non_std_attribute(PROC_TIME_ATTRIBUTE, format!("{} us", micros));
        response
    }

    /// Route `notification` to its handler. Unregistered methods are dropped
    /// silently since notifications are never answered.
    pub async fn dispatch_notification(
        &self,
        notification: JsonRpcNotification,
        context: Option<MessageContext>,
    ) {
        match self.notification_handler(&notification.method) {
            Some(handler) => handler.process(notification, context).await,
            None => {
                debug!(method = %notification.method, "Dropping notification with no handler");
            }
        }
    }

    /// Route either kind of message; `Some` for requests, `None` for notifications
    pub async fn dispatch(
        &self,
        message: IncomingMessage,
        context: Option<MessageContext>,
    ) -> Option<JsonRpcMessage> {
        match message {
            IncomingMessage::Request(request) => {
                Some(self.dispatch_request(request, context).await)
            }
            IncomingMessage::Notification(notification) => {
                self.dispatch_notification(notification, context).await;
                None
            }
        }
    }

    /// Enable or disable `xProcTime` reporting on request responses
    pub fn set_report_proc_time(&self, enabled: bool) {
        self.report_proc_time.store(enabled, Ordering::Relaxed);
    }

    pub fn reports_proc_time(&self) -> bool {
        self.report_proc_time.load(Ordering::Relaxed)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("requests", &self.handled_requests())
            .field("notifications", &self.handled_notifications())
            .field("report_proc_time", &self.reports_proc_time())
            .finish()
    }
}

fn register_all<H: ?Sized>(
    table: &mut HashMap<String, Arc<H>>,
    kind: HandlerKind,
    names: Vec<String>,
    handler: Arc<H>,
) -> DispatchResult<()> {
    let mut declared = HashSet::with_capacity(names.len());
    for name in &names {
        if name.is_empty() {
            warn!(%kind, "Rejected handler declaring an empty method name");
            return Err(DispatchError::InvalidMethodName { kind });
        }
        if table.contains_key(name) || !declared.insert(name.as_str()) {
            warn!(%kind, method = %name, "Rejected duplicate handler");
            return Err(DispatchError::DuplicateHandler {
                kind,
                method: name.clone(),
            });
        }
    }

    debug!(%kind, methods = ?names, "Registered handler");
    for name in names {
        table.insert(name, Arc::clone(&handler));
    }
    Ok(())
}

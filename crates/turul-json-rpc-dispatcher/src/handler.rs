use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::{
    context::MessageContext, notification::JsonRpcNotification, request::JsonRpcRequest,
    response::JsonRpcMessage,
};

/// Handles one or more request methods
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Method names this handler answers; all are registered together
    fn handled_requests(&self) -> Vec<String>;

    /// Produce the complete response for `request`.
    ///
    /// The handler owns the outcome: result or error, and the echoed id. The
    /// dispatcher returns whatever comes back here without validating it.
    async fn process(
        &self,
        request: JsonRpcRequest,
        context: Option<MessageContext>,
    ) -> JsonRpcMessage;
}

/// Handles one or more notification methods
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    /// Method names this handler consumes; all are registered together
    fn handled_notifications(&self) -> Vec<String>;

    /// Act on `notification`. Nothing is ever sent back to the client, so
    /// failures must be dealt with (or logged) inside the handler.
    async fn process(&self, notification: JsonRpcNotification, context: Option<MessageContext>);
}

/// A closure-backed request handler
pub struct FnRequestHandler<F>
where
    F: Fn(JsonRpcRequest, Option<MessageContext>) -> BoxFuture<'static, JsonRpcMessage>
        + Send
        + Sync,
{
    methods: Vec<String>,
    handler_fn: F,
}

impl<F> FnRequestHandler<F>
where
    F: Fn(JsonRpcRequest, Option<MessageContext>) -> BoxFuture<'static, JsonRpcMessage>
        + Send
        + Sync,
{
    pub fn new<I, S>(methods: I, handler_fn: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            handler_fn,
        }
    }
}

#[async_trait]
impl<F> RequestHandler for FnRequestHandler<F>
where
    F: Fn(JsonRpcRequest, Option<MessageContext>) -> BoxFuture<'static, JsonRpcMessage>
        + Send
        + Sync,
{
    fn handled_requests(&self) -> Vec<String> {
        self.methods.clone()
    }

    async fn process(
        &self,
        request: JsonRpcRequest,
        context: Option<MessageContext>,
    ) -> JsonRpcMessage {
        (self.handler_fn)(request, context).await
    }
}

/// A closure-backed notification handler
pub struct FnNotificationHandler<F>
where
    F: Fn(JsonRpcNotification, Option<MessageContext>) -> BoxFuture<'static, ()> + Send + Sync,
{
    methods: Vec<String>,
    handler_fn: F,
}

impl<F> FnNotificationHandler<F>
where
    F: Fn(JsonRpcNotification, Option<MessageContext>) -> BoxFuture<'static, ()> + Send + Sync,
{
    pub fn new<I, S>(methods: I, handler_fn: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            handler_fn,
        }
    }
}

#[async_trait]
impl<F> NotificationHandler for FnNotificationHandler<F>
where
    F: Fn(JsonRpcNotification, Option<MessageContext>) -> BoxFuture<'static, ()> + Send + Sync,
{
    fn handled_notifications(&self) -> Vec<String> {
        self.methods.clone()
    }

    async fn process(&self, notification: JsonRpcNotification, context: Option<MessageContext>) {
        (self.handler_fn)(notification, context).await
    }
}

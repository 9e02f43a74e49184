//! Client handle coordinating services, subscriptions, and extensions.
//!
//! The [`Client`] is what extension loaders receive: it exposes the service
//! registry for dependency resolution and the subscription table for
//! registering event callbacks. Running the client hands it to the dispatch
//! loop, which consumes gateway events from a channel.

pub mod dispatch;
pub mod registry;

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::mpsc::Receiver;

use crate::error::Result;
use crate::events::{Event, EventKind};
use crate::transport::ChatTransport;

pub use registry::ServiceRegistry;

/// Callback invoked for each event of a subscribed kind.
pub type EventCallback = Arc<dyn Fn(Event) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Extension entry point: resolve dependencies, register callbacks.
pub type ExtensionLoader = fn(&mut Client) -> Result<()>;

/// The bot client handle.
pub struct Client {
    transport: Arc<dyn ChatTransport>,
    registry: ServiceRegistry,
    subscriptions: HashMap<EventKind, Vec<EventCallback>>,
}

impl Client {
    /// Create a client over the given transport with an empty registry.
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            registry: ServiceRegistry::new(),
            subscriptions: HashMap::new(),
        }
    }

    /// The transport this client sends through.
    pub fn transport(&self) -> Arc<dyn ChatTransport> {
        Arc::clone(&self.transport)
    }

    /// The service registry backing dependency resolution.
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Register a shared service instance.
    pub fn provide<T: Send + Sync + 'static>(&self, service: Arc<T>) {
        self.registry.provide(service);
    }

    /// Resolve a service previously registered with [`Client::provide`].
    pub fn get_dependency<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.registry.get::<T>()
    }

    /// Subscribe a callback to all events of the given kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F)
    where
        F: Fn(Event) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
    {
        self.subscriptions
            .entry(kind)
            .or_default()
            .push(Arc::new(callback));
    }

    /// Run an extension loader against this client.
    pub fn load_extension(&mut self, loader: ExtensionLoader) -> Result<()> {
        loader(self)
    }

    /// Number of callbacks subscribed to the given kind.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions.get(&kind).map_or(0, Vec::len)
    }

    /// Consume events from `rx` until the sending side closes.
    pub async fn run(self, rx: Receiver<Event>) -> Result<()> {
        dispatch::dispatch_loop(self, rx).await
    }
}

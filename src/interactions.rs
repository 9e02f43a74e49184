//! Component interaction routing.
//!
//! Views register the custom ids they own on a message; incoming component
//! interactions are routed to the owning view. An interaction no live view
//! claims (typically a button on a message whose view has expired) falls
//! through to the unhandled-component hook.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::BoxFuture;
use log::debug;
use parking_lot::RwLock;

use crate::error::Result;
use crate::events::ComponentInteraction;
use crate::transport::types::MessageId;

/// Callback handling a component interaction.
pub type ComponentHook = Arc<dyn Fn(ComponentInteraction) -> BoxFuture<'static, Result<()>> + Send + Sync>;

struct ViewEntry {
    custom_ids: HashSet<String>,
    handler: ComponentHook,
}

/// Routes component interactions to live views.
#[derive(Default)]
pub struct InteractionRouter {
    views: RwLock<HashMap<MessageId, ViewEntry>>,
    unhandled_hook: RwLock<Option<ComponentHook>>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view owning the given custom ids on a message.
    ///
    /// Registering a second view on the same message replaces the first.
    pub fn register_view<I, F>(&self, message: MessageId, custom_ids: I, handler: F)
    where
        I: IntoIterator<Item = String>,
        F: Fn(ComponentInteraction) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
    {
        let entry = ViewEntry {
            custom_ids: custom_ids.into_iter().collect(),
            handler: Arc::new(handler),
        };
        self.views.write().insert(message, entry);
    }

    /// Remove the view on a message. Interactions arriving afterwards are
    /// treated as stale. Returns whether a view was registered.
    pub fn expire_view(&self, message: MessageId) -> bool {
        self.views.write().remove(&message).is_some()
    }

    /// Install the fallback invoked for interactions no live view claims.
    pub fn set_unhandled_component_hook<F>(&self, hook: F)
    where
        F: Fn(ComponentInteraction) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
    {
        *self.unhandled_hook.write() = Some(Arc::new(hook));
    }

    /// Route an interaction to its owning view or the unhandled hook.
    pub async fn dispatch(&self, interaction: ComponentInteraction) -> Result<()> {
        let handler = {
            let views = self.views.read();
            views
                .get(&interaction.message_id)
                .filter(|view| view.custom_ids.contains(&interaction.custom_id))
                .map(|view| Arc::clone(&view.handler))
        };

        if let Some(handler) = handler {
            return handler(interaction).await;
        }

        let hook = self.unhandled_hook.read().clone();
        match hook {
            Some(hook) => hook(interaction).await,
            None => {
                debug!(
                    "dropping unclaimed component interaction: {}",
                    interaction.custom_id
                );
                Ok(())
            }
        }
    }
}

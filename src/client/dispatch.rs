//! Event dispatch loop.
//!
//! Consumes gateway events from a channel and fans them out: component
//! interactions go through the interaction router when one is registered,
//! everything else goes to the kind's subscribers. A subscriber returning an
//! error has chosen to surface it; the loop records it and keeps running.
//! This is the crash/logging sink handlers re-raise into.

use log::{debug, error};
use tokio::sync::mpsc::Receiver;

use crate::client::Client;
use crate::error::Result;
use crate::events::Event;
use crate::interactions::InteractionRouter;

pub(crate) async fn dispatch_loop(client: Client, mut rx: Receiver<Event>) -> Result<()> {
    // Router registration is fixed by the time the loop starts.
    let router = client.registry.get::<InteractionRouter>().ok();

    while let Some(event) = rx.recv().await {
        match (&event, router.as_ref()) {
            (Event::Component(interaction), Some(router)) => {
                if let Err(err) = router.dispatch(interaction.clone()).await {
                    error!("component interaction failed: {err}");
                }
            }
            _ => {
                let kind = event.kind();
                let Some(callbacks) = client.subscriptions.get(&kind) else {
                    debug!("no subscribers for {kind} event");
                    continue;
                };

                for callback in callbacks {
                    if let Err(err) = callback(event.clone()).await {
                        error!("{kind} subscriber failed: {err}");
                    }
                }
            }
        }
    }

    Ok(())
}

//! Error reporting and stale-interaction fallback.
//!
//! Registers two callbacks: a command-error handler that reports a sanitized
//! message to the user and records a correlation reference for everything
//! unexpected, and an unhandled-component hook that answers interactions from
//! expired views with a neutral notice.
//!
//! Throttling errors (cooldown, concurrency limit) are considered handled:
//! the user gets a short ephemeral notice and nothing is logged. Everything
//! else is answered with a reference footer and returned to the dispatch
//! loop so the host logging machinery records the original error. The
//! reference in the footer and the one in the log line are the same token,
//! letting operators match a user report to the server log.

use std::sync::Arc;

use log::error;
use uuid::Uuid;

use crate::client::Client;
use crate::embeds::EmbedService;
use crate::error::Result;
use crate::events::{CommandError, CommandErrorEvent, ComponentInteraction, Event, EventKind};
use crate::interactions::InteractionRouter;

const THROTTLED_MESSAGE: &str = "Someone just used this command, wait a couple seconds.";
const AUTOCOMPLETE_MESSAGE: &str = "Exception while calculating autocomplete.";
const UNHANDLED_MESSAGE: &str = "An unhandled exception occurred during the command, check the logs.";
const STALE_COMPONENT_MESSAGE: &str = "This button is no longer active.";

/// Handle a command error event.
///
/// Returns the original error for the two unexpected buckets so the dispatch
/// loop records it.
async fn handle_command_error(embeds: Arc<EmbedService>, event: CommandErrorEvent) -> Result<()> {
    let mut reference = Some(Uuid::new_v4().simple().to_string());
    let ephemeral;
    let unhandled;
    let message;

    match &event.error {
        CommandError::Cooldown { .. } | CommandError::ConcurrencyLimit => {
            message = THROTTLED_MESSAGE;
            reference = None;
            ephemeral = true;
            unhandled = false;
        }
        CommandError::Autocomplete { .. } => {
            message = AUTOCOMPLETE_MESSAGE;
            ephemeral = false;
            unhandled = true;
        }
        CommandError::Unhandled { .. } => {
            message = UNHANDLED_MESSAGE;
            ephemeral = false;
            unhandled = true;
        }
    }

    let footer = reference.as_ref().map(|reference| format!("Reference: {reference}"));
    embeds
        .send_error(&event.context.interaction_token, message, ephemeral, footer)
        .await?;

    if unhandled {
        if let Some(reference) = &reference {
            error!("Command error reference: {reference}");
        }
        // Hand the original error back for logging
        return Err(event.error.into());
    }

    Ok(())
}

/// Answer an interaction no live view claimed.
async fn handle_stale_component(
    embeds: Arc<EmbedService>,
    interaction: ComponentInteraction,
) -> Result<()> {
    let embed = embeds.info(STALE_COMPONENT_MESSAGE);
    embeds.send_embed(&interaction.token, embed, true).await
}

/// Wire the error handler and the stale-component hook into the client.
pub fn load(client: &mut Client) -> Result<()> {
    let embeds = client.get_dependency::<EmbedService>()?;
    let views = client.get_dependency::<InteractionRouter>()?;

    let hook_embeds = Arc::clone(&embeds);
    views.set_unhandled_component_hook(move |interaction| {
        let embeds = Arc::clone(&hook_embeds);
        Box::pin(handle_stale_component(embeds, interaction))
    });

    client.subscribe(EventKind::CommandError, move |event| {
        let embeds = Arc::clone(&embeds);
        Box::pin(async move {
            match event {
                Event::CommandError(event) => handle_command_error(embeds, event).await,
                _ => Ok(()),
            }
        })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::HelpdeskError;
    use crate::events::CommandContext;
    use crate::transport::types::{ChannelId, MessageId, UserId};
    use crate::transport::{ChatTransport, MemoryTransport};

    fn embeds() -> (Arc<MemoryTransport>, Arc<EmbedService>) {
        let transport = Arc::new(MemoryTransport::new());
        let service = Arc::new(EmbedService::new(
            Arc::clone(&transport) as Arc<dyn ChatTransport>
        ));
        (transport, service)
    }

    fn event(error: CommandError) -> CommandErrorEvent {
        CommandErrorEvent {
            context: CommandContext {
                guild_id: None,
                channel_id: ChannelId(1),
                user_id: UserId(2),
                command: "stats".to_string(),
                interaction_token: "tok".to_string(),
            },
            error,
        }
    }

    fn footer_of(transport: &MemoryTransport) -> Option<String> {
        let responses = transport.responses();
        responses[0].1.embeds[0].footer.as_ref().map(|f| f.text.clone())
    }

    #[tokio::test]
    async fn cooldown_is_handled_silently() {
        let (transport, embeds) = embeds();

        let result = handle_command_error(
            embeds,
            event(CommandError::Cooldown {
                retry_after: Duration::from_secs(3),
            }),
        )
        .await;

        assert!(result.is_ok());

        let responses = transport.responses();
        assert_eq!(responses.len(), 1);
        assert!(responses[0].1.ephemeral);
        assert_eq!(responses[0].1.embeds[0].description, THROTTLED_MESSAGE);
        assert!(responses[0].1.embeds[0].footer.is_none());
    }

    #[tokio::test]
    async fn concurrency_limit_matches_cooldown_contract() {
        let (transport, embeds) = embeds();

        let result = handle_command_error(embeds, event(CommandError::ConcurrencyLimit)).await;

        assert!(result.is_ok());
        assert!(transport.responses()[0].1.ephemeral);
        assert!(footer_of(&transport).is_none());
    }

    #[tokio::test]
    async fn autocomplete_error_is_reported_and_resurfaced() {
        let (transport, embeds) = embeds();
        let original = CommandError::Autocomplete {
            message: "choice provider timed out".to_string(),
        };

        let result = handle_command_error(embeds, event(original.clone())).await;

        match result {
            Err(HelpdeskError::Command(inner)) => assert_eq!(inner, original),
            other => panic!("Expected the original error back, got {other:?}"),
        }

        let responses = transport.responses();
        assert_eq!(responses.len(), 1);
        assert!(!responses[0].1.ephemeral);
        assert_eq!(responses[0].1.embeds[0].description, AUTOCOMPLETE_MESSAGE);

        let footer = footer_of(&transport).expect("footer with reference");
        let reference = footer.strip_prefix("Reference: ").unwrap();
        assert_eq!(reference.len(), 32);
        assert!(reference.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn unexpected_error_uses_generic_text() {
        let (transport, embeds) = embeds();
        let original = CommandError::Unhandled {
            message: "division by zero".to_string(),
        };

        let result = handle_command_error(embeds, event(original.clone())).await;

        match result {
            Err(HelpdeskError::Command(inner)) => assert_eq!(inner, original),
            other => panic!("Expected the original error back, got {other:?}"),
        }

        assert_eq!(
            transport.responses()[0].1.embeds[0].description,
            UNHANDLED_MESSAGE
        );
        assert!(footer_of(&transport).is_some());
    }

    #[tokio::test]
    async fn references_are_unique_per_incident() {
        let (transport, embeds) = embeds();

        let mut first = event(CommandError::Unhandled {
            message: "boom".to_string(),
        });
        first.context.interaction_token = "tok-1".to_string();
        let mut second = first.clone();
        second.context.interaction_token = "tok-2".to_string();

        let _ = handle_command_error(Arc::clone(&embeds), first).await;
        let _ = handle_command_error(embeds, second).await;

        let responses = transport.responses();
        let footers: Vec<_> = responses
            .iter()
            .map(|(_, r)| r.embeds[0].footer.as_ref().unwrap().text.clone())
            .collect();
        assert_ne!(footers[0], footers[1]);
    }

    #[tokio::test]
    async fn stale_component_always_gets_the_notice() {
        let (transport, embeds) = embeds();

        let interaction = ComponentInteraction {
            token: "tok".to_string(),
            guild_id: None,
            channel_id: ChannelId(1),
            user_id: UserId(2),
            user_name: "someone".to_string(),
            message_id: MessageId(3),
            custom_id: "anything_at_all".to_string(),
        };

        handle_stale_component(embeds, interaction).await.unwrap();

        let responses = transport.responses();
        assert_eq!(responses.len(), 1);
        assert!(responses[0].1.ephemeral);
        assert_eq!(
            responses[0].1.embeds[0].description,
            STALE_COMPONENT_MESSAGE
        );
    }

    #[tokio::test]
    async fn load_requires_both_services() {
        let transport = Arc::new(MemoryTransport::new());
        let mut client = Client::new(Arc::clone(&transport) as Arc<dyn ChatTransport>);

        // Neither service provided yet
        assert!(matches!(
            client.load_extension(load),
            Err(HelpdeskError::MissingDependency { .. })
        ));

        client.provide(Arc::new(EmbedService::new(client.transport())));
        assert!(matches!(
            client.load_extension(load),
            Err(HelpdeskError::MissingDependency { .. })
        ));

        client.provide(Arc::new(InteractionRouter::new()));
        client.load_extension(load).unwrap();
        assert_eq!(client.subscriber_count(EventKind::CommandError), 1);
    }
}

//! Support ticket management.
//!
//! Tickets are guild text channels created under a configured category. The
//! owner is encoded in the channel topic as `<topic>-<user id>`, and channel
//! visibility is controlled through per-user permission overwrites: creating
//! a ticket grants the owner VIEW_CHANNEL, closing it takes the grant away.

use std::sync::Arc;

use log::error;

use crate::config::Config;
use crate::embeds::EmbedService;
use crate::error::{HelpdeskError, Result};
use crate::events::ComponentInteraction;
use crate::models::Ticket;
use crate::transport::types::{
    ChannelId, ChannelInfo, CreateChannelRequest, Embed, GuildId, InteractionResponse,
    OutboundMessage, OverwriteTarget, PermissionOverwrite, Permissions, RoleId, UserId,
};
use crate::transport::ChatTransport;

/// Maximum length of a ticket channel name.
const CHANNEL_NAME_LIMIT: usize = 15;

/// Creates and closes support tickets.
pub struct TicketService {
    transport: Arc<dyn ChatTransport>,
    embeds: Arc<EmbedService>,
    category: ChannelId,
    mod_role: RoleId,
    bot_user: UserId,
}

impl TicketService {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        embeds: Arc<EmbedService>,
        config: &Config,
    ) -> Self {
        Self {
            transport,
            embeds,
            category: config.ticket_category,
            mod_role: config.mod_role,
            bot_user: config.bot_user,
        }
    }

    /// Create a support ticket for the interacting user, or point them at
    /// their existing one.
    ///
    /// `embed` is posted into the new ticket channel; `topic` is recorded in
    /// the channel topic together with the owner's id.
    pub async fn create(
        &self,
        interaction: &ComponentInteraction,
        embed: Embed,
        topic: &str,
    ) -> Result<Ticket> {
        let guild = guild_of(interaction)?;

        if let Some(ticket) = self.ticket_for_user(guild, interaction.user_id).await? {
            // Already has an open ticket
            let message = format!(":envelope: View your existing ticket: <#{}>", ticket.channel);
            self.transport
                .respond(
                    &interaction.token,
                    InteractionResponse::text(message).into_ephemeral(),
                )
                .await?;
            return Ok(ticket);
        }

        let mut name = interaction.user_name.clone();
        name.truncate(CHANNEL_NAME_LIMIT);

        let channel = self
            .transport
            .create_channel(CreateChannelRequest {
                guild_id: guild,
                name,
                topic: Some(format!("{topic}-{}", interaction.user_id)),
                parent: Some(self.category),
                reason: Some(format!(
                    "{} ({}) has opened a ticket: {topic}.",
                    interaction.user_name, interaction.user_id
                )),
                overwrites: self.ticket_overwrites(guild, interaction.user_id),
            })
            .await?;

        self.transport
            .send_message(
                channel.id,
                OutboundMessage {
                    content: Some(format!(
                        "Welcome to your support ticket <@{}>",
                        interaction.user_id
                    )),
                    embeds: vec![embed],
                    user_mentions: true,
                },
            )
            .await?;

        // Give the user a link to the ticket
        self.transport
            .respond(
                &interaction.token,
                InteractionResponse::text(format!(
                    ":envelope: We have created a support ticket for you.\n\
                     View your new ticket: <#{}>",
                    channel.id
                ))
                .into_ephemeral(),
            )
            .await?;

        Ok(Ticket {
            user: interaction.user_id,
            channel: channel.id,
            topic: topic.to_string(),
            is_new: true,
        })
    }

    /// Close the ticket the interaction happened in by removing the owner's
    /// permission to view the channel.
    pub async fn close(&self, interaction: &ComponentInteraction) -> Result<()> {
        let guild = guild_of(interaction)?;

        let Some(ticket) = self.ticket_for_channel(guild, interaction.channel_id).await else {
            // The channel topic doesnt have the expected <topic>-<user id> format
            let embed = self.embeds.error("Can't determine the original ticket owner.");
            self.transport
                .respond(&interaction.token, InteractionResponse::embed(embed))
                .await?;
            return Ok(());
        };

        self.transport
            .edit_channel_overwrites(
                ticket.channel,
                vec![PermissionOverwrite::member(ticket.user).deny(Permissions::VIEW_CHANNEL)],
                Some(format!("Ticket closed for user: {}", ticket.topic)),
            )
            .await?;

        self.transport
            .respond(
                &interaction.token,
                InteractionResponse::embed(self.embeds.ticket_closed(interaction.user_id)),
            )
            .await?;

        Ok(())
    }

    /// Archiving is not wired up; closing a ticket leaves the channel in
    /// place with the owner removed.
    pub async fn archive(&self, _interaction: &ComponentInteraction) -> Result<()> {
        Err(HelpdeskError::other("ticket archival is not implemented yet"))
    }

    /// The user's open ticket, if one exists.
    async fn ticket_for_user(&self, guild: GuildId, user: UserId) -> Result<Option<Ticket>> {
        for channel in self.ticket_channels(guild).await? {
            // A per-user overwrite granting VIEW_CHANNEL marks the owner
            if let Some(overwrite) = channel.overwrite_for(OverwriteTarget::Member(user)) {
                if overwrite.allow.contains(Permissions::VIEW_CHANNEL) {
                    return Ok(Some(Ticket {
                        user,
                        channel: channel.id,
                        topic: channel.topic.clone().unwrap_or_default(),
                        is_new: false,
                    }));
                }
            }
        }

        Ok(None)
    }

    /// The ticket backed by the given channel, if its topic is well-formed.
    async fn ticket_for_channel(&self, guild: GuildId, channel_id: ChannelId) -> Option<Ticket> {
        let channels = match self.ticket_channels(guild).await {
            Ok(channels) => channels,
            Err(err) => {
                error!("Failed to list ticket channels for guild {guild}: {err}");
                return None;
            }
        };

        let channel = channels.into_iter().find(|c| c.id == channel_id)?;
        let topic = channel.topic.as_deref().unwrap_or_default();

        // Expecting: <ticket topic>-<user id>
        // Example:   Other-123456789
        let owner = topic
            .rsplit_once('-')
            .and_then(|(_, raw_id)| raw_id.parse::<u64>().ok());

        match owner {
            Some(owner) => Some(Ticket {
                user: UserId(owner),
                channel: channel.id,
                topic: topic.to_string(),
                is_new: false,
            }),
            None => {
                error!("Failed to find ticket owner for channel {channel_id}: malformed topic {topic:?}");
                None
            }
        }
    }

    /// Channels under the ticket category.
    async fn ticket_channels(&self, guild: GuildId) -> Result<Vec<ChannelInfo>> {
        self.transport.list_channels(guild, Some(self.category)).await
    }

    /// Overwrites for a fresh ticket channel: mods, the bot, and the owner
    /// can view it; everyone else cannot.
    fn ticket_overwrites(&self, guild: GuildId, owner: UserId) -> Vec<PermissionOverwrite> {
        vec![
            PermissionOverwrite::role(self.mod_role).allow(Permissions::VIEW_CHANNEL),
            PermissionOverwrite::member(self.bot_user).allow(Permissions::VIEW_CHANNEL),
            PermissionOverwrite::member(owner).allow(Permissions::VIEW_CHANNEL),
            // The everyone role shares the guild id
            PermissionOverwrite::role(RoleId(guild.0))
                .deny(Permissions::VIEW_CHANNEL)
                .allow(
                    Permissions::READ_MESSAGE_HISTORY
                        | Permissions::ATTACH_FILES
                        | Permissions::ADD_REACTIONS
                        | Permissions::EMBED_LINKS,
                ),
        ]
    }
}

fn guild_of(interaction: &ComponentInteraction) -> Result<GuildId> {
    interaction
        .guild_id
        .ok_or_else(|| HelpdeskError::other("ticket interactions only occur in guilds"))
}

//! In-process chat transport.
//!
//! This module provides the MemoryTransport implementation that keeps all
//! channel state in memory and records every outbound call, giving tests and
//! the local harness a transport with the same contract as a real gateway
//! implementation.

use parking_lot::Mutex;

use async_trait::async_trait;

use crate::error::{HelpdeskError, Result};
use crate::transport::types::{
    ChannelId, ChannelInfo, CreateChannelRequest, GuildId, InteractionResponse, MessageId,
    OutboundMessage, PermissionOverwrite,
};
use crate::transport::ChatTransport;

/// In-process transport recording all outbound traffic.
///
/// Channels are assigned sequential ids starting at 1. Interaction responses
/// are keyed by token and a duplicate initial response for the same token is
/// rejected, matching real platform behavior.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    state: Mutex<TransportState>,
}

#[derive(Debug, Default)]
struct TransportState {
    channels: Vec<ChannelInfo>,
    messages: Vec<(ChannelId, OutboundMessage)>,
    responses: Vec<(String, InteractionResponse)>,
    next_channel_id: u64,
    next_message_id: u64,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All interaction responses recorded so far, in send order.
    pub fn responses(&self) -> Vec<(String, InteractionResponse)> {
        self.state.lock().responses.clone()
    }

    /// All channel messages recorded so far, in send order.
    pub fn messages(&self) -> Vec<(ChannelId, OutboundMessage)> {
        self.state.lock().messages.clone()
    }

    /// Snapshot of a channel by id.
    pub fn channel(&self, id: ChannelId) -> Option<ChannelInfo> {
        self.state.lock().channels.iter().find(|c| c.id == id).cloned()
    }
}

#[async_trait]
impl ChatTransport for MemoryTransport {
    async fn respond(&self, interaction_token: &str, response: InteractionResponse) -> Result<()> {
        let mut state = self.state.lock();
        if state.responses.iter().any(|(token, _)| token == interaction_token) {
            return Err(HelpdeskError::transport(format!(
                "interaction {interaction_token} already answered"
            )));
        }
        state.responses.push((interaction_token.to_string(), response));
        Ok(())
    }

    async fn send_message(
        &self,
        channel: ChannelId,
        message: OutboundMessage,
    ) -> Result<MessageId> {
        let mut state = self.state.lock();
        if !state.channels.iter().any(|c| c.id == channel) {
            return Err(HelpdeskError::transport(format!(
                "unknown channel: {channel}"
            )));
        }
        state.next_message_id += 1;
        let id = MessageId(state.next_message_id);
        state.messages.push((channel, message));
        Ok(id)
    }

    async fn create_channel(&self, request: CreateChannelRequest) -> Result<ChannelInfo> {
        let mut state = self.state.lock();
        state.next_channel_id += 1;
        let info = ChannelInfo {
            id: ChannelId(state.next_channel_id),
            guild_id: request.guild_id,
            name: request.name,
            topic: request.topic,
            parent: request.parent,
            overwrites: request.overwrites,
        };
        state.channels.push(info.clone());
        Ok(info)
    }

    async fn list_channels(
        &self,
        guild: GuildId,
        parent: Option<ChannelId>,
    ) -> Result<Vec<ChannelInfo>> {
        let state = self.state.lock();
        Ok(state
            .channels
            .iter()
            .filter(|c| c.guild_id == guild)
            .filter(|c| parent.is_none() || c.parent == parent)
            .cloned()
            .collect())
    }

    async fn edit_channel_overwrites(
        &self,
        channel: ChannelId,
        overwrites: Vec<PermissionOverwrite>,
        _reason: Option<String>,
    ) -> Result<()> {
        let mut state = self.state.lock();
        let info = state
            .channels
            .iter_mut()
            .find(|c| c.id == channel)
            .ok_or_else(|| HelpdeskError::transport(format!("unknown channel: {channel}")))?;

        for overwrite in overwrites {
            match info.overwrites.iter_mut().find(|o| o.target == overwrite.target) {
                Some(existing) => *existing = overwrite,
                None => info.overwrites.push(overwrite),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::types::{OverwriteTarget, Permissions, UserId};

    fn create_request(guild: u64, name: &str) -> CreateChannelRequest {
        CreateChannelRequest {
            guild_id: GuildId(guild),
            name: name.to_string(),
            topic: None,
            parent: None,
            reason: None,
            overwrites: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_channels() {
        let transport = MemoryTransport::new();

        let first = transport.create_channel(create_request(1, "alpha")).await.unwrap();
        let second = transport.create_channel(create_request(1, "beta")).await.unwrap();
        transport.create_channel(create_request(2, "other-guild")).await.unwrap();

        assert_eq!(first.id, ChannelId(1));
        assert_eq!(second.id, ChannelId(2));

        let channels = transport.list_channels(GuildId(1), None).await.unwrap();
        assert_eq!(channels.len(), 2);
    }

    #[tokio::test]
    async fn test_list_channels_filters_by_parent() {
        let transport = MemoryTransport::new();

        let mut request = create_request(1, "ticket");
        request.parent = Some(ChannelId(99));
        transport.create_channel(request).await.unwrap();
        transport.create_channel(create_request(1, "general")).await.unwrap();

        let children = transport
            .list_channels(GuildId(1), Some(ChannelId(99)))
            .await
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "ticket");
    }

    #[tokio::test]
    async fn test_duplicate_response_rejected() {
        let transport = MemoryTransport::new();

        transport
            .respond("token-1", InteractionResponse::text("first"))
            .await
            .unwrap();
        let result = transport
            .respond("token-1", InteractionResponse::text("second"))
            .await;

        assert!(matches!(result, Err(HelpdeskError::Transport { .. })));
        assert_eq!(transport.responses().len(), 1);
    }

    #[tokio::test]
    async fn test_send_message_requires_channel() {
        let transport = MemoryTransport::new();

        let result = transport
            .send_message(ChannelId(42), OutboundMessage::default())
            .await;
        assert!(result.is_err());

        let channel = transport.create_channel(create_request(1, "alpha")).await.unwrap();
        let id = transport
            .send_message(channel.id, OutboundMessage::default())
            .await
            .unwrap();
        assert_eq!(id, MessageId(1));
        assert_eq!(transport.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_overwrites_replaces_per_target() {
        let transport = MemoryTransport::new();
        let mut request = create_request(1, "ticket");
        request.overwrites = vec![
            PermissionOverwrite::member(UserId(7)).allow(Permissions::VIEW_CHANNEL)
        ];
        let channel = transport.create_channel(request).await.unwrap();

        transport
            .edit_channel_overwrites(
                channel.id,
                vec![PermissionOverwrite::member(UserId(7)).deny(Permissions::VIEW_CHANNEL)],
                None,
            )
            .await
            .unwrap();

        let updated = transport.channel(channel.id).unwrap();
        let overwrite = updated
            .overwrite_for(OverwriteTarget::Member(UserId(7)))
            .unwrap();
        assert!(overwrite.allow.is_empty());
        assert!(overwrite.deny.contains(Permissions::VIEW_CHANNEL));
    }
}

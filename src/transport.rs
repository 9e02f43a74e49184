//! Chat transport abstraction.
//!
//! This module provides the outbound boundary of the bot: answering
//! interactions, posting messages, and managing ticket channels. The gateway
//! and REST wire protocols live behind this trait; in-tree only the
//! in-process [`MemoryTransport`] implementation exists, which the local
//! harness and the test suite run against.

pub mod memory;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::{
    ChannelId, ChannelInfo, CreateChannelRequest, GuildId, InteractionResponse, MessageId,
    OutboundMessage, PermissionOverwrite,
};

pub use memory::MemoryTransport;

/// Core trait for outbound chat operations.
///
/// Implementations are expected to be cheap to clone behind an `Arc` and safe
/// to call from concurrent handlers.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Answer an interaction identified by its token.
    ///
    /// At most one initial response may be created per token; a second call
    /// for the same token is a transport error.
    async fn respond(&self, interaction_token: &str, response: InteractionResponse) -> Result<()>;

    /// Post a message to a channel.
    async fn send_message(
        &self,
        channel: ChannelId,
        message: OutboundMessage,
    ) -> Result<MessageId>;

    /// Create a guild text channel.
    async fn create_channel(&self, request: CreateChannelRequest) -> Result<ChannelInfo>;

    /// List the guild's text channels, optionally restricted to a category.
    async fn list_channels(
        &self,
        guild: GuildId,
        parent: Option<ChannelId>,
    ) -> Result<Vec<ChannelInfo>>;

    /// Replace the overwrites for the targets named in `overwrites`, leaving
    /// other targets untouched.
    async fn edit_channel_overwrites(
        &self,
        channel: ChannelId,
        overwrites: Vec<PermissionOverwrite>,
        reason: Option<String>,
    ) -> Result<()>;
}

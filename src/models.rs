//! Domain models.

use crate::transport::types::{ChannelId, UserId};

/// A support ticket backed by a guild text channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// User the ticket belongs to.
    pub user: UserId,
    /// Channel the ticket lives in.
    pub channel: ChannelId,
    /// Topic string, also encoded into the channel topic.
    pub topic: String,
    /// Whether this ticket was created by the current operation.
    pub is_new: bool,
}

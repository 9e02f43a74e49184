//! Value types crossing the chat transport boundary.
//!
//! These mirror the subset of the chat platform's vocabulary the bot actually
//! uses: snowflake-style ids, permission overwrites, embeds, and the payloads
//! for messages and interaction responses.

use std::fmt;

use bitflags::bitflags;
use serde::Deserialize;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

id_type!(
    /// Identifier of a guild (server).
    GuildId
);
id_type!(
    /// Identifier of a text channel.
    ChannelId
);
id_type!(
    /// Identifier of a user account.
    UserId
);
id_type!(
    /// Identifier of a guild role.
    RoleId
);
id_type!(
    /// Identifier of a sent message.
    MessageId
);

bitflags! {
    /// Channel permissions the bot manipulates on ticket channels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u64 {
        const VIEW_CHANNEL = 1 << 0;
        const READ_MESSAGE_HISTORY = 1 << 1;
        const ATTACH_FILES = 1 << 2;
        const ADD_REACTIONS = 1 << 3;
        const EMBED_LINKS = 1 << 4;
    }
}

/// Who a permission overwrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverwriteTarget {
    Member(UserId),
    Role(RoleId),
}

/// A single allow/deny permission overwrite on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionOverwrite {
    pub target: OverwriteTarget,
    pub allow: Permissions,
    pub deny: Permissions,
}

impl PermissionOverwrite {
    /// Create an empty overwrite for a member.
    pub fn member(id: UserId) -> Self {
        Self {
            target: OverwriteTarget::Member(id),
            allow: Permissions::empty(),
            deny: Permissions::empty(),
        }
    }

    /// Create an empty overwrite for a role.
    pub fn role(id: RoleId) -> Self {
        Self {
            target: OverwriteTarget::Role(id),
            allow: Permissions::empty(),
            deny: Permissions::empty(),
        }
    }

    /// Add allowed permissions to the overwrite.
    pub fn allow(mut self, permissions: Permissions) -> Self {
        self.allow |= permissions;
        self
    }

    /// Add denied permissions to the overwrite.
    pub fn deny(mut self, permissions: Permissions) -> Self {
        self.deny |= permissions;
        self
    }
}

/// Footer line rendered under an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
}

/// A rich message block with an accent color.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    pub title: Option<String>,
    pub description: String,
    /// Accent color as 0xRRGGBB.
    pub color: u32,
    pub footer: Option<EmbedFooter>,
}

/// Payload for a message posted to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutboundMessage {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    /// Whether user mentions in `content` should ping.
    pub user_mentions: bool,
}

/// Payload answering an interaction.
///
/// Ephemeral responses are visible only to the interacting user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionResponse {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub ephemeral: bool,
}

impl InteractionResponse {
    /// Build a response carrying a single embed.
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Self::default()
        }
    }

    /// Build a plain-text response.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Mark the response as visible only to the interacting user.
    pub fn into_ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }
}

/// Request to create a guild text channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateChannelRequest {
    pub guild_id: GuildId,
    pub name: String,
    pub topic: Option<String>,
    /// Category the channel is created under.
    pub parent: Option<ChannelId>,
    /// Audit-log reason attached to the creation.
    pub reason: Option<String>,
    pub overwrites: Vec<PermissionOverwrite>,
}

/// Snapshot of a guild text channel as known to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub name: String,
    pub topic: Option<String>,
    pub parent: Option<ChannelId>,
    pub overwrites: Vec<PermissionOverwrite>,
}

impl ChannelInfo {
    /// The overwrite for the given target, if one is set.
    pub fn overwrite_for(&self, target: OverwriteTarget) -> Option<&PermissionOverwrite> {
        self.overwrites.iter().find(|o| o.target == target)
    }
}

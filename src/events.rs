//! Event protocol shared between the host client and its extensions.
//!
//! The gateway side of the host framework is out of scope for this crate; these
//! types are the contract it delivers events through. Extensions subscribe to
//! an [`EventKind`] and receive the matching [`Event`] payloads.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::transport::types::{ChannelId, GuildId, MessageId, UserId};

/// Failure raised while executing a bot command.
///
/// Handlers classify these into three buckets: throttling (cooldown or
/// concurrency limit), autocomplete failures, and everything else. The
/// display output is the underlying message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command was invoked again before its cooldown elapsed.
    #[error("command is on cooldown for another {retry_after:?}")]
    Cooldown { retry_after: Duration },

    /// The command reached its maximum number of concurrent invocations.
    #[error("command reached its concurrency limit")]
    ConcurrencyLimit,

    /// An autocomplete callback failed while computing choices.
    #[error("{message}")]
    Autocomplete { message: String },

    /// Any other failure surfaced by the command layer.
    #[error("{message}")]
    Unhandled { message: String },
}

/// Invocation context captured when a command error is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub user_id: UserId,
    /// Name of the command that was executing when the error was raised.
    pub command: String,
    /// Token used to answer the triggering interaction.
    pub interaction_token: String,
}

/// A command error together with the context it was raised in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandErrorEvent {
    pub context: CommandContext,
    pub error: CommandError,
}

/// A UI component interaction (button press, select menu) forwarded by the
/// gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInteraction {
    /// Token used to answer this interaction.
    pub token: String,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub user_id: UserId,
    /// Display name of the interacting user.
    pub user_name: String,
    /// Message the component is attached to.
    pub message_id: MessageId,
    /// Developer-assigned identifier of the pressed component.
    pub custom_id: String,
}

/// Events delivered to the client dispatch loop.
#[derive(Debug, Clone)]
pub enum Event {
    CommandError(CommandErrorEvent),
    Component(ComponentInteraction),
}

impl Event {
    /// The subscription key this event is dispatched under.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::CommandError(_) => EventKind::CommandError,
            Event::Component(_) => EventKind::Component,
        }
    }
}

/// Discriminant used to key event subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CommandError,
    Component,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::CommandError => write!(f, "command-error"),
            EventKind::Component => write!(f, "component"),
        }
    }
}

//! Embed construction and delivery.
//!
//! The EmbedService is the single place user-facing messages are styled: it
//! owns the accent palette, builds the embed payloads, and sends them through
//! the transport.

use std::sync::Arc;

use crate::error::Result;
use crate::transport::types::{Embed, EmbedFooter, InteractionResponse, UserId};
use crate::transport::ChatTransport;

const INFO_COLOR: u32 = 0x3498DB;
const ERROR_COLOR: u32 = 0xE74C3C;
const SUCCESS_COLOR: u32 = 0x2ECC71;

/// Builds styled embeds and sends them as interaction responses.
pub struct EmbedService {
    transport: Arc<dyn ChatTransport>,
}

impl EmbedService {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// An informational embed.
    pub fn info(&self, message: impl Into<String>) -> Embed {
        Embed {
            description: message.into(),
            color: INFO_COLOR,
            ..Embed::default()
        }
    }

    /// An error embed.
    pub fn error(&self, message: impl Into<String>) -> Embed {
        Embed {
            description: message.into(),
            color: ERROR_COLOR,
            ..Embed::default()
        }
    }

    /// A success embed.
    pub fn success(&self, message: impl Into<String>) -> Embed {
        Embed {
            description: message.into(),
            color: SUCCESS_COLOR,
            ..Embed::default()
        }
    }

    /// The embed posted when a ticket is closed.
    pub fn ticket_closed(&self, closed_by: UserId) -> Embed {
        self.success(format!("Ticket closed by <@{closed_by}>."))
    }

    /// Answer an interaction with a single embed.
    pub async fn send_embed(
        &self,
        interaction_token: &str,
        embed: Embed,
        ephemeral: bool,
    ) -> Result<()> {
        let mut response = InteractionResponse::embed(embed);
        response.ephemeral = ephemeral;
        self.transport.respond(interaction_token, response).await
    }

    /// Answer an interaction with an error embed, optionally carrying a
    /// reference footer.
    pub async fn send_error(
        &self,
        interaction_token: &str,
        message: &str,
        ephemeral: bool,
        footer: Option<String>,
    ) -> Result<()> {
        let mut embed = self.error(message);
        embed.footer = footer.map(|text| EmbedFooter { text });
        self.send_embed(interaction_token, embed, ephemeral).await
    }
}

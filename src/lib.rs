//! # helpdesk - Support Bot Application Core
//!
//! The application layer of a guild support bot: an event-dispatching client
//! with a type-keyed service registry, an embed-rendering service, ticket
//! management backed by channel permission overwrites, and bundled extensions
//! for error reporting and stale-interaction fallback.
//!
//! The gateway and REST wire protocols are not part of this crate; all
//! outbound traffic goes through the [`transport::ChatTransport`] trait, for
//! which an in-process implementation is provided.
//!
//! ## Architecture
//!
//! The library is organized into focused modules:
//!
//! - [`error`] - Centralized error types and handling
//! - [`events`] - Event protocol between the host client and extensions
//! - [`transport`] - Outbound chat operations behind a trait
//! - [`client`] - Client handle, service registry, and dispatch loop
//! - [`interactions`] - Component interaction routing with a stale fallback
//! - [`embeds`] - Embed styling and delivery
//! - [`tickets`] - Support ticket lifecycle
//! - [`extensions`] - Bundled extensions loaded during wiring

pub mod client;
pub mod config;
pub mod embeds;
pub mod error;
pub mod events;
pub mod extensions;
pub mod interactions;
pub mod models;
pub mod tickets;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::Client;
pub use config::Config;
pub use error::{HelpdeskError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

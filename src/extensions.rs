//! Bundled client extensions.
//!
//! An extension is a plain function with the
//! [`ExtensionLoader`](crate::client::ExtensionLoader) signature: it receives
//! the client, resolves the services it needs from the registry, and
//! registers its callbacks. Extensions are loaded once during wiring, before
//! the dispatch loop starts.

pub mod errors;

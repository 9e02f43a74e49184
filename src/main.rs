//! helpdesk - Support Bot Runtime
//!
//! Wires configuration, services, and extensions into a client and runs the
//! event dispatch loop.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::info;

use helpdesk::embeds::EmbedService;
use helpdesk::interactions::InteractionRouter;
use helpdesk::tickets::TicketService;
use helpdesk::transport::{ChatTransport, MemoryTransport};
use helpdesk::{Client, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    // Parse command-line arguments
    let matches = Command::new("helpdesk")
        .version(helpdesk::VERSION)
        .about("Support bot with ticket management and error-reporting extensions")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Validate configuration and extension wiring, then exit"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    if config.transport != "memory" {
        anyhow::bail!("Unsupported transport backend: {}", config.transport);
    }

    // Build the client and provide the shared services
    let transport: Arc<dyn ChatTransport> = Arc::new(MemoryTransport::new());
    let mut client = Client::new(Arc::clone(&transport));

    let embeds = Arc::new(EmbedService::new(Arc::clone(&transport)));
    client.provide(Arc::clone(&embeds));
    client.provide(Arc::new(InteractionRouter::new()));
    client.provide(Arc::new(TicketService::new(
        Arc::clone(&transport),
        embeds,
        &config,
    )));

    client.load_extension(helpdesk::extensions::errors::load)?;

    if matches.get_flag("check") {
        println!("configuration and extension wiring OK");
        return Ok(());
    }

    // The in-process transport has no gateway; the loop idles until the
    // process is stopped.
    let (_events_tx, events_rx) = tokio::sync::mpsc::channel(64);
    info!("helpdesk ready; dispatching events");
    client.run(events_rx).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_constant() {
        // Ensure version is accessible
        assert!(!helpdesk::VERSION.is_empty());
    }
}

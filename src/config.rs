//! Configuration loading for the helpdesk binary.
//!
//! Configuration is a TOML file naming the guild, the ticket category, the
//! moderator role, and the bot's own user id. An explicit `--config` path
//! wins; otherwise the default location under the user config directory is
//! tried.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HelpdeskError, Result};
use crate::transport::types::{ChannelId, GuildId, RoleId, UserId};

/// Runtime configuration for the bot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Guild the bot operates in.
    pub guild: GuildId,
    /// Category channel ticket channels are created under.
    pub ticket_category: ChannelId,
    /// Role granted access to every ticket.
    pub mod_role: RoleId,
    /// The bot's own user id, granted access to every ticket.
    pub bot_user: UserId,
    /// Transport backend to run against.
    #[serde(default = "default_transport")]
    pub transport: String,
}

fn default_transport() -> String {
    "memory".to_string()
}

impl Config {
    /// Load configuration from `path`, or from the default location when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().ok_or_else(|| {
                HelpdeskError::config("no configuration path given and no user config directory")
            })?,
        };

        let contents = std::fs::read_to_string(&path).map_err(|err| {
            HelpdeskError::config(format!("failed to read {}: {err}", path.display()))
        })?;

        Self::parse(&contents)
    }

    /// Parse and validate a TOML configuration document.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|err| HelpdeskError::config(format!("invalid configuration: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// The default configuration path under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("helpdesk").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.guild.0 == 0 {
            return Err(HelpdeskError::config("guild id must be set"));
        }
        if self.ticket_category.0 == 0 {
            return Err(HelpdeskError::config("ticket_category id must be set"));
        }
        if self.mod_role.0 == 0 {
            return Err(HelpdeskError::config("mod_role id must be set"));
        }
        if self.bot_user.0 == 0 {
            return Err(HelpdeskError::config("bot_user id must be set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        guild = 100
        ticket_category = 900
        mod_role = 50
        bot_user = 5
    "#;

    #[test]
    fn test_parse_valid_config() {
        let config = Config::parse(VALID).unwrap();

        assert_eq!(config.guild, GuildId(100));
        assert_eq!(config.ticket_category, ChannelId(900));
        assert_eq!(config.mod_role, RoleId(50));
        assert_eq!(config.bot_user, UserId(5));
        assert_eq!(config.transport, "memory");
    }

    #[test]
    fn test_zero_ids_rejected() {
        let result = Config::parse(
            r#"
            guild = 0
            ticket_category = 900
            mod_role = 50
            bot_user = 5
        "#,
        );
        assert!(matches!(result, Err(HelpdeskError::Config { .. })));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = Config::parse("guild = ");
        assert!(matches!(result, Err(HelpdeskError::Config { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");
        std::fs::write(file.path(), VALID).expect("write config");

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.guild, GuildId(100));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/helpdesk.toml")));
        assert!(matches!(result, Err(HelpdeskError::Config { .. })));
    }
}

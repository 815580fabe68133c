//! Configuration file structures for the Doorman bot.
//!
//! The configuration is a YAML file split into three sections: Discord account
//! settings, the channels receiving notifications, and optional notification
//! settings. Every value can be overridden with an environment variable using
//! the `DOORMAN_` prefix, nested keys being separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! discord:
//!   # Bot token from the Discord developer portal
//!   token: "bot-token"
//!   # Permission integer used to build the invite URL
//!   permissions: 8
//!   # Invite link of the server, shown in the bot presence
//!   invite_link: "https://discord.gg/example"
//!
//! channels:
//!   join: 1130148231553241092
//!   leave: 1130148231553241093
//!   boost: 1130148231553241094
//!
//! notifications:
//!   style: embed            # embed | text
//!   boost_trigger: increase # increase | change
//! ```

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use log::warn;
use serde::Deserialize;

use crate::notification::{BoostTrigger, DestinationId, RenderStyle};

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "DOORMAN_";

/// Root configuration structure for the Doorman bot.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Discord account configuration
    pub discord: Discord,
    /// Channels receiving the notifications
    pub channels: Channels,
    /// Notification rendering and trigger settings
    #[serde(default)]
    pub notifications: Notifications,
}

/// Discord account configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Discord {
    /// Bot token.
    ///
    /// Prefer the `DOORMAN_DISCORD__TOKEN` environment variable over writing
    /// it in the file.
    pub token: String,

    /// Permission integer requested in the generated OAuth2 invite URL.
    pub permissions: u64,

    /// Invite link of the Discord server.
    ///
    /// Displayed, without its scheme, as the bot's "Playing" presence.
    pub invite_link: String,
}

/// Destination channel of each notification.
///
/// Ids are kept signed so that a zero or negative value reaches the
/// dispatcher, which refuses it without contacting Discord.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Channels {
    /// Channel announcing new members
    pub join: DestinationId,
    /// Channel announcing departed members
    pub leave: DestinationId,
    /// Channel announcing server boosts
    pub boost: DestinationId,
}

/// Notification settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Notifications {
    /// Rendering style of the notifications
    #[serde(default)]
    pub style: RenderStyle,
    /// Which boost count change triggers a boost notification
    #[serde(default)]
    pub boost_trigger: BoostTrigger,
}

impl Config {
    /// Loads the configuration from a YAML file, applying `DOORMAN_*`
    /// environment overrides on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, a required key is
    /// missing, or a value has the wrong type.
    pub fn load(path: &str) -> Result<Self> {
        if !std::path::Path::new(path).is_file() {
            anyhow::bail!("configuration file {} not found", path);
        }

        let config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("failed to parse configuration file {}", path))?;

        config.warn_invalid_channels();

        Ok(config)
    }

    /// Returns the names of the channels configured with a non-positive id.
    pub fn invalid_channels(&self) -> Vec<&'static str> {
        [
            ("join", self.channels.join),
            ("leave", self.channels.leave),
            ("boost", self.channels.boost),
        ]
        .into_iter()
        .filter(|(_, id)| !id.is_valid())
        .map(|(name, _)| name)
        .collect()
    }

    fn warn_invalid_channels(&self) {
        for name in self.invalid_channels() {
            warn!(
                "{} channel id is not a positive integer, {} notifications will be skipped",
                name, name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    const FULL_CONFIG: &str = r#"
discord:
  token: "secret"
  permissions: 8
  invite_link: "https://discord.gg/example"
channels:
  join: 100
  leave: 200
  boost: 300
notifications:
  style: text
  boost_trigger: change
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_load_full_config() {
        let file = write_config(FULL_CONFIG);
        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.discord.token, "secret");
        assert_eq!(config.discord.permissions, 8);
        assert_eq!(config.discord.invite_link, "https://discord.gg/example");
        assert_eq!(config.channels.join, DestinationId::new(100));
        assert_eq!(config.channels.leave, DestinationId::new(200));
        assert_eq!(config.channels.boost, DestinationId::new(300));
        assert_eq!(config.notifications.style, RenderStyle::Text);
        assert_eq!(config.notifications.boost_trigger, BoostTrigger::Change);
    }

    #[test]
    #[serial]
    fn test_load_defaults_notifications() {
        let file = write_config(
            r#"
discord:
  token: "secret"
  permissions: 8
  invite_link: "https://discord.gg/example"
channels:
  join: 100
  leave: 200
  boost: 300
"#,
        );
        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.notifications.style, RenderStyle::Embed);
        assert_eq!(config.notifications.boost_trigger, BoostTrigger::Increase);
    }

    #[test]
    #[serial]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/doorman.yaml").is_err());
    }

    #[test]
    #[serial]
    fn test_load_missing_channel() {
        let file = write_config(
            r#"
discord:
  token: "secret"
  permissions: 8
  invite_link: "https://discord.gg/example"
channels:
  join: 100
  leave: 200
"#,
        );
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    #[serial]
    fn test_load_non_integer_channel() {
        let file = write_config(
            r#"
discord:
  token: "secret"
  permissions: 8
  invite_link: "https://discord.gg/example"
channels:
  join: "general"
  leave: 200
  boost: 300
"#,
        );
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    #[serial]
    fn test_load_env_override() {
        let file = write_config(FULL_CONFIG);
        unsafe {
            std::env::set_var("DOORMAN_DISCORD__TOKEN", "from-env");
            std::env::set_var("DOORMAN_CHANNELS__JOIN", "555");
        }

        let config = Config::load(file.path().to_str().unwrap());

        unsafe {
            std::env::remove_var("DOORMAN_DISCORD__TOKEN");
            std::env::remove_var("DOORMAN_CHANNELS__JOIN");
        }

        let config = config.unwrap();
        assert_eq!(config.discord.token, "from-env");
        assert_eq!(config.channels.join, DestinationId::new(555));
    }

    #[test]
    #[serial]
    fn test_invalid_channels() {
        let file = write_config(
            r#"
discord:
  token: "secret"
  permissions: 8
  invite_link: "https://discord.gg/example"
channels:
  join: 0
  leave: 200
  boost: -3
"#,
        );
        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.invalid_channels(), vec!["join", "boost"]);
    }
}

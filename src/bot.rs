//! Bot module wiring the configuration to Discord.
//!
//! The [`Bot`] owns the Discord client. Once started, serenity runs every
//! gateway event in its own task; member joins, member departures and boost
//! increases are announced in the channels of [`crate::config::Channels`].
//!
//! # Example
//!
//! ```no_run
//! # use doorman::bot::Bot;
//! # use doorman::config::Config;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//!
//! let bot = Bot::new(config).await?;
//! bot.start().await?; // Runs until the gateway connection ends
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::{config::Config, discord::DiscordClient};

/// Main bot structure.
pub struct Bot {
    /// Discord client with the notification handler installed
    discord_client: DiscordClient,
}

impl Bot {
    /// Creates a new Bot from the loaded configuration.
    ///
    /// The configuration is frozen behind an [`Arc`] and shared with every
    /// event handler invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the Discord client cannot be built.
    pub async fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        info!(
            "announcing joins in {}, departures in {}, boosts in {} ({:?} style)",
            config.channels.join,
            config.channels.leave,
            config.channels.boost,
            config.notifications.style
        );

        let discord_client = DiscordClient::new(config).await?;

        Ok(Bot { discord_client })
    }

    /// Starts the bot.
    ///
    /// Consumes `self` and runs until the gateway connection ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway connection fails (invalid token,
    /// missing privileged intent, network failure).
    pub async fn start(self) -> Result<()> {
        self.discord_client.start().await
    }
}

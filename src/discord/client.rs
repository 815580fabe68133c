//! Discord gateway client.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use serenity::all::{Client, GatewayIntents};

use crate::{config::Config, discord::handler::Handler};

/// Wrapper around the serenity [`Client`] with the bot's event handler
/// installed.
pub struct DiscordClient {
    client: Client,
}

impl DiscordClient {
    /// Builds the client from the bot configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serenity refuses the token or fails to build the
    /// client.
    pub async fn new(config: Arc<Config>) -> Result<Self> {
        // GUILD_MEMBERS is privileged and must be enabled in the developer portal
        let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS;

        let client = Client::builder(&config.discord.token, intents)
            .event_handler(Handler::new(Arc::clone(&config)))
            .await
            .context("failed to build discord client")?;

        Ok(DiscordClient { client })
    }

    /// Connects to the gateway and processes events until the connection
    /// ends for good.
    pub async fn start(mut self) -> Result<()> {
        info!("connecting to discord gateway");

        self.client
            .start()
            .await
            .context("discord gateway connection ended")
    }
}

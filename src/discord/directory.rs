//! Channel lookup backed by the gateway cache.

use std::sync::Arc;

use log::debug;
use serenity::all::{Cache, ChannelId, GuildId};

use crate::notification::{Destination, Directory};

/// Resolves destination ids among the cached channels of a guild.
///
/// The cache is filled by the gateway from the `GUILDS` intent, so no REST
/// call is made. A channel of another guild is treated as missing.
pub struct CacheDirectory {
    cache: Arc<Cache>,
}

impl CacheDirectory {
    pub fn new(cache: Arc<Cache>) -> Self {
        CacheDirectory { cache }
    }
}

impl Directory for CacheDirectory {
    async fn resolve(&self, guild_id: u64, destination_id: u64) -> Option<Destination> {
        let Some(guild) = self.cache.guild(GuildId::new(guild_id)) else {
            debug!("guild {} is not in cache", guild_id);
            return None;
        };

        guild
            .channels
            .get(&ChannelId::new(destination_id))
            .map(|channel| Destination {
                id: destination_id,
                name: channel.name.clone(),
            })
    }
}

//! Discord integration for the bot.
//!
//! This module connects the [`crate::notification`] module to Discord through
//! `serenity`:
//! - [`client::DiscordClient`] builds the gateway client and runs it
//! - the handler turns gateway events into
//!   [`crate::notification::EventDescriptor`]s and dispatches them
//! - [`CacheDirectory`] resolves channel ids from the gateway cache
//! - [`HttpTransport`] posts notifications through the REST API
//!
//! # Gateway Intents
//!
//! - `GUILDS` - guild updates and the channel cache
//! - `GUILD_MEMBERS` - member join and leave events (privileged intent, must be
//!   enabled in the Discord developer portal)

mod client;
mod directory;
mod handler;
mod transport;

pub use crate::discord::client::DiscordClient;
pub use crate::discord::directory::CacheDirectory;
pub use crate::discord::transport::HttpTransport;

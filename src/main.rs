//! Doorman - A Discord bot announcing member arrivals, departures and server boosts.
//!
//! # Overview
//!
//! Doorman listens to the Discord gateway and posts a notification when:
//!
//! - **a member joins** the server (green embed in the join channel)
//! - **a member leaves** the server (red embed in the leave channel)
//! - **the server is boosted** (pink embed in the boost channel)
//!
//! Each notification is a single best-effort attempt. Failures (unknown
//! channel, missing permission, Discord error) are logged and never stop the
//! bot.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! discord:
//!   token: "your-bot-token"
//!   permissions: 8
//!   invite_link: "https://discord.gg/example"
//! channels:
//!   join: 1130148231553241092
//!   leave: 1130148231553241093
//!   boost: 1130148231553241094
//! notifications:
//!   style: embed
//!   boost_trigger: increase
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `DOORMAN_` prefix:
//!
//! ```bash
//! export DOORMAN_DISCORD__TOKEN="your-bot-token"
//! export DOORMAN_CHANNELS__JOIN="1130148231553241092"
//! ```
//!
//! # Usage
//!
//! ```bash
//! doorman --config config.yaml
//! ```
//!
//! # Architecture
//!
//! - [`bot`] - Wires the configuration to the Discord client
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`discord`] - Gateway client, event handler, channel lookup and message sending
//! - [`notification`] - Events, rendering and the single-attempt dispatcher
//! - [`utils`] - Invite link helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod config;
mod discord;
mod notification;
mod utils;

/// Command-line arguments for the Doorman bot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format.
    #[arg(short, long)]
    config: String,
}

/// Main entry point for the Doorman bot.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML file and `DOORMAN_*` overrides
/// 4. **Bot Execution**: Connects to Discord and handles events until the
///    connection ends
///
/// A configuration or connection failure is logged and ends the process with
/// exit code 1.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting doorman {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {:#}", e);
            std::process::exit(1);
        }
    };

    let bot = match Bot::new(config).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {:#}", e);
        std::process::exit(1);
    }
}

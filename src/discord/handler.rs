//! Gateway event handling.
//!
//! Each gateway event is converted into an [`EventDescriptor`] here, so that
//! nothing past this point depends on serenity's model types.

use std::sync::Arc;

use log::{debug, info};
use serenity::all::{
    ActivityData, Context, EventHandler, Guild, GuildId, Member, PartialGuild, Ready, User,
};
use serenity::async_trait;

use crate::{
    config::Config,
    discord::{CacheDirectory, HttpTransport},
    notification::{
        BoostTrigger, DeliveryResult, DestinationId, Dispatcher, EventDescriptor, Subject,
    },
    utils::{invite_url, strip_scheme},
};

/// Discord event handler announcing guild lifecycle events.
pub struct Handler {
    config: Arc<Config>,
}

impl Handler {
    pub fn new(config: Arc<Config>) -> Self {
        Handler { config }
    }

    /// Dispatches `event` to `destination_id` with a dispatcher bound to the
    /// context's cache and HTTP client.
    async fn announce(&self, ctx: &Context, event: EventDescriptor, destination_id: DestinationId) {
        let dispatcher = Dispatcher::new(
            CacheDirectory::new(Arc::clone(&ctx.cache)),
            HttpTransport::new(Arc::clone(&ctx.http)),
            self.config.notifications.style,
        );

        if dispatcher.dispatch(&event, destination_id).await == DeliveryResult::Delivered {
            info!("{} announced in channel {}", event.kind(), destination_id);
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected to Discord", ready.user.name);
        info!(
            "invite link: {}",
            invite_url(ready.user.id.get(), self.config.discord.permissions)
        );

        ctx.set_activity(Some(ActivityData::playing(strip_scheme(
            &self.config.discord.invite_link,
        ))));
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        debug!(
            "member {} ({}) joined guild {}",
            new_member.user.name, new_member.user.id, new_member.guild_id
        );

        let event = EventDescriptor::MemberJoined {
            member: user_subject(&new_member.user),
            guild_id: new_member.guild_id.get(),
        };
        self.announce(&ctx, event, self.config.channels.join).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        debug!("member {} ({}) left guild {}", user.name, user.id, guild_id);

        let event = EventDescriptor::MemberLeft {
            member: user_subject(&user),
            guild_id: guild_id.get(),
        };
        self.announce(&ctx, event, self.config.channels.leave).await;
    }

    /// Called when a guild settings change
    async fn guild_update(
        &self,
        ctx: Context,
        old_data_if_available: Option<Guild>,
        new_data: PartialGuild,
    ) {
        let Some(old) = old_data_if_available else {
            debug!("no cached data for guild {}, skip boost check", new_data.id);
            return;
        };

        let guild = Subject {
            name: new_data.name.clone(),
            id: new_data.id.get(),
            avatar_url: new_data.icon_url(),
        };
        let Some(event) = boost_event(
            guild,
            old.premium_subscription_count,
            new_data.premium_subscription_count,
            self.config.notifications.boost_trigger,
        ) else {
            return;
        };

        self.announce(&ctx, event, self.config.channels.boost).await;
    }
}

/// Builds the subject of a member event.
fn user_subject(user: &User) -> Subject {
    Subject {
        name: user.name.clone(),
        id: user.id.get(),
        avatar_url: user.avatar_url(),
    }
}

/// Returns the boost event to announce for a guild update, if `trigger`
/// accepts the change of boost count.
///
/// A missing count is read as zero.
fn boost_event(
    guild: Subject,
    boosts_before: Option<u64>,
    boosts_after: Option<u64>,
    trigger: BoostTrigger,
) -> Option<EventDescriptor> {
    let boosts_before = boosts_before.unwrap_or(0);
    let boosts_after = boosts_after.unwrap_or(0);

    if !trigger.should_notify(boosts_before, boosts_after) {
        debug!(
            "guild {} boost count {} -> {}, nothing to announce",
            guild.id, boosts_before, boosts_after
        );
        return None;
    }

    Some(EventDescriptor::GuildUpdated {
        guild,
        boosts_before,
        boosts_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild() -> Subject {
        Subject {
            name: "Craft".to_string(),
            id: 998500551488708618,
            avatar_url: None,
        }
    }

    #[test]
    fn test_boost_event_on_increase() {
        let event = boost_event(guild(), Some(3), Some(4), BoostTrigger::Increase);

        assert_eq!(
            event,
            Some(EventDescriptor::GuildUpdated {
                guild: guild(),
                boosts_before: 3,
                boosts_after: 4,
            })
        );
    }

    #[test]
    fn test_no_boost_event_when_unchanged() {
        assert_eq!(
            boost_event(guild(), Some(4), Some(4), BoostTrigger::Increase),
            None
        );
        assert_eq!(
            boost_event(guild(), Some(4), Some(4), BoostTrigger::Change),
            None
        );
    }

    #[test]
    fn test_boost_event_on_decrease() {
        assert_eq!(
            boost_event(guild(), Some(4), Some(3), BoostTrigger::Increase),
            None
        );
        assert!(boost_event(guild(), Some(4), Some(3), BoostTrigger::Change).is_some());
    }

    #[test]
    fn test_boost_event_missing_count() {
        let event = boost_event(guild(), None, Some(1), BoostTrigger::Increase);

        assert_eq!(
            event,
            Some(EventDescriptor::GuildUpdated {
                guild: guild(),
                boosts_before: 0,
                boosts_after: 1,
            })
        );
        assert_eq!(boost_event(guild(), None, None, BoostTrigger::Change), None);
    }
}

//! Events announced by the bot.
//!
//! This module provides the [`EventDescriptor`] enum built once per incoming
//! guild event, and the [`BoostTrigger`] policy deciding whether a guild
//! update deserves a notification at all.

use serde::Deserialize;

/// Identity of the member or guild an event is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    /// Display name (username for members, guild name for guilds)
    pub name: String,
    /// Numeric id of the member or guild
    pub id: u64,
    /// Avatar (members) or icon (guilds) URL, when one is set
    pub avatar_url: Option<String>,
}

/// A guild event, decoupled from the shape of the chat platform objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventDescriptor {
    /// A member joined the guild
    MemberJoined { member: Subject, guild_id: u64 },
    /// A member left the guild (left, kicked or banned)
    MemberLeft { member: Subject, guild_id: u64 },
    /// The guild settings changed, boost counts before and after the change
    GuildUpdated {
        guild: Subject,
        boosts_before: u64,
        boosts_after: u64,
    },
}

impl EventDescriptor {
    /// Returns the id of the guild the event happened in.
    ///
    /// Destinations are only resolved within this guild.
    pub fn guild_id(&self) -> u64 {
        match self {
            EventDescriptor::MemberJoined { guild_id, .. }
            | EventDescriptor::MemberLeft { guild_id, .. } => *guild_id,
            EventDescriptor::GuildUpdated { guild, .. } => guild.id,
        }
    }

    /// Short name of the event kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EventDescriptor::MemberJoined { .. } => "member join",
            EventDescriptor::MemberLeft { .. } => "member leave",
            EventDescriptor::GuildUpdated { .. } => "guild update",
        }
    }
}

/// Policy deciding which boost count change triggers a boost notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostTrigger {
    /// Notify only when the boost count grew
    #[default]
    Increase,
    /// Notify whenever the boost count differs
    Change,
}

impl BoostTrigger {
    /// Returns `true` if a guild whose boost count went from `before` to
    /// `after` should be announced.
    pub fn should_notify(&self, before: u64, after: u64) -> bool {
        match self {
            BoostTrigger::Increase => after > before,
            BoostTrigger::Change => after != before,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Subject {
        Subject {
            name: "alice".to_string(),
            id: 42,
            avatar_url: None,
        }
    }

    #[test]
    fn test_guild_id_of_member_events() {
        let joined = EventDescriptor::MemberJoined {
            member: alice(),
            guild_id: 7,
        };
        let left = EventDescriptor::MemberLeft {
            member: alice(),
            guild_id: 8,
        };

        assert_eq!(joined.guild_id(), 7);
        assert_eq!(left.guild_id(), 8);
    }

    #[test]
    fn test_guild_id_of_guild_update() {
        let updated = EventDescriptor::GuildUpdated {
            guild: Subject {
                name: "guild".to_string(),
                id: 998500551488708618,
                avatar_url: None,
            },
            boosts_before: 1,
            boosts_after: 2,
        };

        assert_eq!(updated.guild_id(), 998500551488708618);
        assert_eq!(updated.kind(), "guild update");
    }

    #[test]
    fn test_increase_trigger() {
        let trigger = BoostTrigger::Increase;

        assert!(trigger.should_notify(2, 3));
        assert!(!trigger.should_notify(3, 3));
        assert!(!trigger.should_notify(3, 2));
    }

    #[test]
    fn test_change_trigger() {
        let trigger = BoostTrigger::Change;

        assert!(trigger.should_notify(2, 3));
        assert!(trigger.should_notify(3, 2));
        assert!(!trigger.should_notify(3, 3));
    }

    #[test]
    fn test_default_trigger_is_increase() {
        assert_eq!(BoostTrigger::default(), BoostTrigger::Increase);
    }
}

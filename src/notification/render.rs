//! Notification rendering.
//!
//! [`render`] is a pure function: the same event and style always give the
//! same [`RenderedNotification`].

use serde::Deserialize;

use crate::notification::event::{EventDescriptor, Subject};

/// Rendering style of the notifications.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Rich embed with colour, fields and thumbnail
    #[default]
    Embed,
    /// Single line of plain text
    Text,
}

/// Accent colour of an embed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    /// Member joined
    Green,
    /// Member left
    Red,
    /// Server boosted
    Pink,
}

impl Accent {
    /// RGB value of the colour.
    pub fn rgb(&self) -> u32 {
        match self {
            Accent::Green => 0x2ecc71,
            Accent::Red => 0xe74c3c,
            Accent::Pink => 0xf47fff,
        }
    }
}

/// A name/value field of an embed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Structured notification content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedNotification {
    pub title: Option<String>,
    pub description: String,
    pub accent: Accent,
    pub fields: Vec<EmbedField>,
    pub thumbnail_url: Option<String>,
}

/// Content ready to be sent to a destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderedNotification {
    Text(String),
    Embed(EmbedNotification),
}

impl RenderedNotification {
    /// Returns every piece of text carried by the notification, joined by
    /// newlines. Handy to search the content regardless of its style.
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        match self {
            RenderedNotification::Text(text) => text.clone(),
            RenderedNotification::Embed(embed) => {
                let mut lines = Vec::new();
                if let Some(title) = &embed.title {
                    lines.push(title.clone());
                }
                lines.push(embed.description.clone());
                for field in &embed.fields {
                    lines.push(format!("{}: {}", field.name, field.value));
                }
                lines.join("\n")
            }
        }
    }
}

/// Renders an event in the given style.
pub fn render(event: &EventDescriptor, style: RenderStyle) -> RenderedNotification {
    match (event, style) {
        (EventDescriptor::MemberJoined { member, .. }, RenderStyle::Embed) => {
            member_embed(member, "has joined the server.", Accent::Green)
        }
        (EventDescriptor::MemberLeft { member, .. }, RenderStyle::Embed) => {
            member_embed(member, "has left the server.", Accent::Red)
        }
        (EventDescriptor::MemberJoined { member, .. }, RenderStyle::Text) => {
            member_text(member, "has joined the server.")
        }
        (EventDescriptor::MemberLeft { member, .. }, RenderStyle::Text) => {
            member_text(member, "has left the server.")
        }
        (
            EventDescriptor::GuildUpdated {
                guild,
                boosts_before,
                boosts_after,
            },
            RenderStyle::Embed,
        ) => RenderedNotification::Embed(EmbedNotification {
            title: Some("New server boost".to_string()),
            description: format!("**{}** now has {} boosts.", guild.name, boosts_after),
            accent: Accent::Pink,
            fields: vec![EmbedField {
                name: "Boosts".to_string(),
                value: format!("`{}` → `{}`", boosts_before, boosts_after),
                inline: true,
            }],
            thumbnail_url: guild.avatar_url.clone(),
        }),
        (
            EventDescriptor::GuildUpdated {
                guild,
                boosts_before,
                boosts_after,
            },
            RenderStyle::Text,
        ) => RenderedNotification::Text(format!(
            "**{}** now has {} boosts (was {}).",
            guild.name, boosts_after, boosts_before
        )),
    }
}

/// Discord mention syntax for a user id.
fn mention(id: u64) -> String {
    format!("<@{}>", id)
}

fn member_embed(member: &Subject, action: &str, accent: Accent) -> RenderedNotification {
    RenderedNotification::Embed(EmbedNotification {
        title: None,
        description: format!("{} {}", mention(member.id), action),
        accent,
        fields: vec![
            EmbedField {
                name: "Username".to_string(),
                value: format!("`{}`", member.name),
                inline: true,
            },
            EmbedField {
                name: "User ID".to_string(),
                value: format!("`{}`", member.id),
                inline: true,
            },
        ],
        thumbnail_url: member.avatar_url.clone(),
    })
}

fn member_text(member: &Subject, action: &str) -> RenderedNotification {
    RenderedNotification::Text(format!(
        "{} (`{}`, `{}`) {}",
        mention(member.id),
        member.name,
        member.id,
        action
    ))
}

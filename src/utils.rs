//! Utility functions for links shown at startup.

/// Builds the OAuth2 URL inviting the bot into a server.
///
/// # Arguments
///
/// * `client_id` - The bot application id
/// * `permissions` - The permission integer requested for the bot
///
/// # Examples
///
/// ```
/// # use doorman::utils::invite_url;
/// let url = invite_url(42, 8);
/// assert_eq!(
///     url,
///     "https://discord.com/oauth2/authorize?client_id=42&permissions=8&scope=bot%20applications.commands"
/// );
/// ```
pub fn invite_url(client_id: u64, permissions: u64) -> String {
    format!(
        "https://discord.com/oauth2/authorize?client_id={}&permissions={}&scope=bot%20applications.commands",
        client_id, permissions
    )
}

/// Removes the `http://` or `https://` scheme of a link.
///
/// Links without a scheme are returned unchanged.
pub fn strip_scheme(link: &str) -> &str {
    link.strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .unwrap_or(link)
}

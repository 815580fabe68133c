//! Notification delivery through the Discord REST API.

use std::sync::Arc;

use log::debug;
use serenity::all::{ChannelId, CreateEmbed, CreateMessage, Http, ModelError};

use crate::notification::{Destination, RenderedNotification, Transport, TransportError};

/// HTTP status returned by Discord when the bot lacks a permission.
const FORBIDDEN: u16 = 403;

/// Posts notifications as channel messages.
pub struct HttpTransport {
    http: Arc<Http>,
}

impl HttpTransport {
    pub fn new(http: Arc<Http>) -> Self {
        HttpTransport { http }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        destination: &Destination,
        notification: &RenderedNotification,
    ) -> Result<(), TransportError> {
        let message = build_message(notification);

        let sent = ChannelId::new(destination.id)
            .send_message(&self.http, message)
            .await
            .map_err(into_transport_error)?;

        debug!(
            "message {} posted in #{} ({})",
            sent.id, destination.name, destination.id
        );

        Ok(())
    }
}

/// Converts a rendered notification into a message builder.
fn build_message(notification: &RenderedNotification) -> CreateMessage {
    match notification {
        RenderedNotification::Text(text) => CreateMessage::new().content(text),
        RenderedNotification::Embed(embed) => {
            let mut builder = CreateEmbed::new()
                .description(&embed.description)
                .color(embed.accent.rgb());

            if let Some(title) = &embed.title {
                builder = builder.title(title);
            }
            for field in &embed.fields {
                builder = builder.field(&field.name, &field.value, field.inline);
            }
            if let Some(url) = &embed.thumbnail_url {
                builder = builder.thumbnail(url);
            }

            CreateMessage::new().embed(builder)
        }
    }
}

/// Maps a serenity error to a transport error.
///
/// Both a 403 answer and a permission check failing before the request
/// count as a permission failure.
fn into_transport_error(error: serenity::Error) -> TransportError {
    match &error {
        serenity::Error::Http(http_error)
            if http_error.status_code().map(|status| status.as_u16()) == Some(FORBIDDEN) =>
        {
            TransportError::PermissionDenied
        }
        serenity::Error::Model(ModelError::InvalidPermissions { .. }) => {
            TransportError::PermissionDenied
        }
        _ => TransportError::Other(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serenity::all::{HttpError, Permissions};
    use serenity::http::ErrorResponse;

    use super::*;

    /// Builds the error serenity returns for an unsuccessful Discord answer.
    async fn unsuccessful_request(status: u16, body: &'static str) -> serenity::Error {
        let response = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let error_response =
            ErrorResponse::from_response(reqwest::Response::from(response), reqwest::Method::POST)
                .await;

        serenity::Error::Http(HttpError::UnsuccessfulRequest(error_response))
    }

    #[tokio::test]
    async fn test_forbidden_is_permission_denied() {
        let error =
            unsuccessful_request(403, r#"{"code": 50013, "message": "Missing Permissions"}"#).await;

        assert_eq!(into_transport_error(error), TransportError::PermissionDenied);
    }

    #[tokio::test]
    async fn test_server_error_keeps_detail() {
        let error =
            unsuccessful_request(500, r#"{"code": 0, "message": "Internal Server Error"}"#).await;

        assert_eq!(
            into_transport_error(error),
            TransportError::Other("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_invalid_permissions_is_permission_denied() {
        let error = serenity::Error::Model(ModelError::InvalidPermissions {
            required: Permissions::SEND_MESSAGES,
            present: Permissions::empty(),
        });

        assert_eq!(into_transport_error(error), TransportError::PermissionDenied);
    }

    #[test]
    fn test_other_errors_keep_detail() {
        let error = serenity::Error::Other("gateway closed");

        assert_eq!(
            into_transport_error(error),
            TransportError::Other("gateway closed".to_string())
        );
    }

    #[test]
    fn test_build_text_message() {
        let notification = RenderedNotification::Text("hello".to_string());

        let expected = CreateMessage::new().content("hello");
        assert_eq!(
            format!("{:?}", build_message(&notification)),
            format!("{:?}", expected)
        );
    }
}

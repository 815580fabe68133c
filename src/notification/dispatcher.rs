//! Single-attempt notification delivery.
//!
//! This module provides the [`Dispatcher`], which validates a destination,
//! resolves it through a [`Directory`], renders the event and hands the result
//! to a [`Transport`]. Every outcome is reported as a [`DeliveryResult`].

use std::fmt;

use log::{error, warn};
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

use crate::notification::{
    event::EventDescriptor,
    render::{RenderStyle, RenderedNotification, render},
};

/// Configured identifier of a destination channel.
///
/// Only strictly positive values designate a channel; anything else is
/// refused before any lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(i64);

impl DestinationId {
    #[cfg(test)]
    pub fn new(id: i64) -> Self {
        DestinationId(id)
    }

    /// Returns `true` if the id is a positive integer.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }

    /// Returns the id as an unsigned channel id, or `None` if it is invalid.
    pub fn positive(&self) -> Option<u64> {
        u64::try_from(self.0).ok().filter(|id| *id > 0)
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved channel, ready to receive messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// Channel id
    pub id: u64,
    /// Channel name, for logs
    pub name: String,
}

/// Failure reported by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The bot is not allowed to post in the destination
    #[error("missing permissions")]
    PermissionDenied,
    /// Network or service failure
    #[error("{0}")]
    Other(String),
}

/// Outcome of a single dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The notification was posted
    Delivered,
    /// No channel with this id exists in the event's guild
    DestinationNotFound,
    /// The bot is not allowed to post in the channel
    PermissionDenied,
    /// Posting failed for another reason
    TransportError(String),
    /// The configured id is not a positive integer
    InvalidDestination,
}

/// Lookup of destinations within a guild.
#[automock]
pub trait Directory {
    /// Resolves `destination_id` among the channels of `guild_id`.
    async fn resolve(&self, guild_id: u64, destination_id: u64) -> Option<Destination>;
}

/// Delivery of rendered notifications.
#[automock]
pub trait Transport {
    /// Posts `notification` in `destination`.
    async fn send(
        &self,
        destination: &Destination,
        notification: &RenderedNotification,
    ) -> Result<(), TransportError>;
}

/// Delivers notifications, one attempt per call.
///
/// The dispatcher holds no mutable state; concurrent calls are independent
/// and unordered.
///
/// # Examples
///
/// ```no_run
/// # async fn example(directory: impl Directory, transport: impl Transport, event: EventDescriptor) {
/// let dispatcher = Dispatcher::new(directory, transport, RenderStyle::Embed);
/// let result = dispatcher.dispatch(&event, DestinationId::new(1130148231553241092)).await;
/// # }
/// ```
pub struct Dispatcher<D: Directory, T: Transport> {
    directory: D,
    transport: T,
    style: RenderStyle,
}

impl<D: Directory, T: Transport> Dispatcher<D, T> {
    /// Create a new [Dispatcher].
    ///
    /// # Arguments
    ///
    /// * `directory` - Resolves destination ids into channels.
    /// * `transport` - Posts the rendered notifications.
    /// * `style` - Rendering style of the notifications.
    pub fn new(directory: D, transport: T, style: RenderStyle) -> Self {
        Dispatcher {
            directory,
            transport,
            style,
        }
    }

    /// Announces `event` in the channel `destination_id`.
    ///
    /// Steps, stopping at the first failure:
    /// 1. refuse non-positive ids ([`DeliveryResult::InvalidDestination`])
    /// 2. resolve the channel within the event's guild
    ///    ([`DeliveryResult::DestinationNotFound`])
    /// 3. render the event
    /// 4. send it once ([`DeliveryResult::PermissionDenied`],
    ///    [`DeliveryResult::TransportError`] or [`DeliveryResult::Delivered`])
    ///
    /// Any result other than `Delivered` is logged once.
    pub async fn dispatch(
        &self,
        event: &EventDescriptor,
        destination_id: DestinationId,
    ) -> DeliveryResult {
        let result = self.attempt(event, destination_id).await;

        match &result {
            DeliveryResult::Delivered => {}
            DeliveryResult::TransportError(_) => {
                error!("{}", describe_failure(event, destination_id, &result))
            }
            _ => warn!("{}", describe_failure(event, destination_id, &result)),
        }

        result
    }

    async fn attempt(&self, event: &EventDescriptor, destination_id: DestinationId) -> DeliveryResult {
        let Some(channel_id) = destination_id.positive() else {
            return DeliveryResult::InvalidDestination;
        };

        let Some(destination) = self.directory.resolve(event.guild_id(), channel_id).await else {
            return DeliveryResult::DestinationNotFound;
        };

        let notification = render(event, self.style);

        match self.transport.send(&destination, &notification).await {
            Ok(()) => DeliveryResult::Delivered,
            Err(TransportError::PermissionDenied) => DeliveryResult::PermissionDenied,
            Err(TransportError::Other(detail)) => DeliveryResult::TransportError(detail),
        }
    }
}

/// Builds the diagnostic line of a failed dispatch.
///
/// The line always names the destination id and the failure kind.
pub fn describe_failure(
    event: &EventDescriptor,
    destination_id: DestinationId,
    result: &DeliveryResult,
) -> String {
    let reason = match result {
        DeliveryResult::Delivered => "delivered".to_string(),
        DeliveryResult::InvalidDestination => "invalid channel id".to_string(),
        DeliveryResult::DestinationNotFound => "channel not found".to_string(),
        DeliveryResult::PermissionDenied => "permission denied, check permissions".to_string(),
        DeliveryResult::TransportError(detail) => format!("transport error: {}", detail),
    };

    format!(
        "cannot send {} notification to channel {}: {}",
        event.kind(),
        destination_id,
        reason
    )
}

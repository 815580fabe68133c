//! Guild lifecycle notifications.
//!
//! This module turns guild events into messages posted in configured channels.
//! It knows nothing about Discord: events arrive as [`EventDescriptor`]s and
//! channels are reached through the [`Directory`] and [`Transport`] traits,
//! which the [`crate::discord`] module implements.
//!
//! # Flow
//!
//! ```text
//! EventDescriptor ──► Dispatcher::dispatch(event, destination_id)
//!                         │
//!                         ├── destination_id <= 0 ──────────► InvalidDestination
//!                         ├── Directory::resolve ── None ───► DestinationNotFound
//!                         ├── render(event, style)
//!                         └── Transport::send ── Ok ────────► Delivered
//!                                              ├ forbidden ─► PermissionDenied
//!                                              └ other ─────► TransportError
//! ```
//!
//! Each dispatch is a single attempt. Failures are logged and returned as a
//! [`DeliveryResult`], never propagated.

mod dispatcher;
mod event;
mod render;

pub use crate::notification::dispatcher::{
    DeliveryResult, Destination, DestinationId, Directory, Dispatcher, Transport, TransportError,
};
pub use crate::notification::event::{BoostTrigger, EventDescriptor, Subject};
pub use crate::notification::render::{RenderStyle, RenderedNotification};

//! chatpush wires a chat app's push notifications together.
//!
//! # Features
//!
//! - Push token registration (channel setup, permissions, token acquisition)
//! - Routing of received notifications to the room they belong to
//! - Interactive notification actions
//!     - reply from the notification, stored in the room and pushed back
//!     - mark every unread message of the room as read in one batch
//! - Outgoing chat notifications through an HTTPS push provider
//!
//! The host application supplies the device notification API
//! ([`platform_adapter::NotificationPlatform`]) and a document store
//! ([`store_adapter::StoreAdapter`]), builds the context with [`AppBuilder`]
//! and feeds platform callbacks in as [`PlatformEvent`]s.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from chatpush-types
pub use chatpush_types::error;
pub use chatpush_types::platform_adapter;
pub use chatpush_types::push_provider;
pub use chatpush_types::store_adapter;
pub use chatpush_types::types;
pub use chatpush_types::utils;

pub use chatpush_core::routing;
pub use chatpush_push as push;

// Local modules
pub mod app;
pub mod listener;
pub mod prelude;

pub use crate::app::{App, AppBuilder, AppOpts};
pub use crate::listener::{Listener, PlatformEvent};

// vim: ts=4

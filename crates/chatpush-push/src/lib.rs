//! Push notification module
//!
//! Wires the device notification platform, the chat document store and the
//! push-delivery provider together.
//!
//! # Flow
//!
//! - [`registrar`] runs once at startup and acquires the device push token
//! - [`dispatcher`] records the room / reply target of each received notification
//! - [`action`] handles the user's reply or mark-as-read action on a notification
//! - [`send`] builds outgoing messages and hands them to the push provider
//! - [`provider`] is the HTTPS push provider client

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod action;
pub mod dispatcher;
pub mod provider;
pub mod registrar;
pub mod send;

mod prelude;

pub use action::{on_action_response, ActionOutcome, NotificationAction};
pub use dispatcher::on_notification_received;
pub use provider::HttpPushProvider;
pub use registrar::register_for_push;
pub use send::{schedule_local, send_message};

use chatpush_types::error::{ClResult, Error};
use chatpush_types::utils::join_path;

/// Collection holding the chat rooms
pub const ROOMS: &str = "rooms";
/// Sub-collection of a room holding its messages
pub const MESSAGES: &str = "messages";

/// A room id is exactly one non-empty path segment
pub fn validate_room_id(room_id: &str) -> ClResult<()> {
	if room_id.is_empty() {
		return Err(Error::ValidationError("roomId is empty".into()));
	}
	if room_id.contains('/') {
		return Err(Error::ValidationError(format!("roomId '{}' contains '/'", room_id)));
	}
	Ok(())
}

/// Path of a room document
pub fn room_path(room_id: &str) -> String {
	join_path(&[ROOMS, room_id])
}

/// Path of a room's message collection
pub fn messages_path(room_id: &str) -> String {
	join_path(&[ROOMS, room_id, MESSAGES])
}

// vim: ts=4

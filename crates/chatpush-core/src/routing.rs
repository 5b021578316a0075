//! Notification routing state
//!
//! Remembers which room and reply target the next user action applies to.
//! A single slot: every accepted notification overwrites it, so when two
//! notifications arrive before an action, the action sees the second one.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingState {
	pub active_room_id: Option<Box<str>>,
	pub reply_target: Option<Box<str>>,
}

impl RoutingState {
	/// Replace both fields with the values of the latest notification.
	pub fn update(&mut self, room_id: Box<str>, reply_target: Option<Box<str>>) {
		self.active_room_id = Some(room_id);
		self.reply_target = reply_target;
	}

	pub fn is_empty(&self) -> bool {
		self.active_room_id.is_none() && self.reply_target.is_none()
	}
}


// vim: ts=4

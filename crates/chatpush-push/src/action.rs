//! Notification action handling
//!
//! A user action on a chat notification is either a text reply or a
//! mark-as-read request. Both resolve the room they apply to first: the room
//! named in the notification's own payload wins, otherwise the room of the
//! most recently received notification is used. Replies always go to the
//! reply target of the most recently received notification.

use serde_json::{json, Value};

use crate::prelude::*;
use crate::{messages_path, room_path, send, validate_room_id};
use chatpush_types::push_provider::PushResult;
use chatpush_types::store_adapter::{QueryFilter, QueryOptions};
use chatpush_types::types::{self, ActionResponse, ChatMessage, RoomSummary, UserIdentity};

pub const REPLY_ACTION: &str = "REPLY_ACTION";
pub const MARK_AS_READ: &str = "MARK_AS_READ";

/// Kind of action the user took on a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
	Reply,
	MarkAsRead,
	/// Default tap, dismiss, or an identifier we do not handle
	Other,
}

impl NotificationAction {
	pub fn from_identifier(identifier: Option<&str>) -> Self {
		match identifier {
			Some(REPLY_ACTION) => NotificationAction::Reply,
			Some(MARK_AS_READ) => NotificationAction::MarkAsRead,
			_ => NotificationAction::Other,
		}
	}

	pub fn identifier(self) -> Option<&'static str> {
		match self {
			NotificationAction::Reply => Some(REPLY_ACTION),
			NotificationAction::MarkAsRead => Some(MARK_AS_READ),
			NotificationAction::Other => None,
		}
	}
}

/// What an action response ended up doing
#[derive(Debug)]
pub enum ActionOutcome {
	/// Reply stored; `delivery` is `None` when there was no reply target
	Replied { message_id: Box<str>, delivery: Option<PushResult> },
	MarkedRead { count: usize },
	NothingToMark,
	NoAction,
	/// The action was not carried out. The error has already been logged.
	Aborted(Error),
}

/// Room and reply target an action applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
	pub room_id: Box<str>,
	pub reply_to: Option<Box<str>>,
}

/// Resolve the room and reply target of an action response.
///
/// The room named in the payload wins over the routed room. The reply target
/// is always the last one recorded by the dispatcher. Returns `Ok(None)` when
/// neither the payload nor the routing state names a room.
pub fn resolve_target(app: &App, response: &ActionResponse) -> ClResult<Option<ActionTarget>> {
	let routing = app.routing();
	let payload = response.notification.as_ref().map(|n| &n.data);

	let room_id = match payload.and_then(|data| data.get("roomId")) {
		Some(Value::String(room_id)) if !room_id.is_empty() => Some(room_id.as_str().into()),
		None | Some(Value::Null | Value::String(_)) => routing.active_room_id,
		Some(other) => {
			return Err(Error::ValidationError(format!("roomId must be a string, got {}", other)));
		}
	};

	let Some(room_id) = room_id else {
		return Ok(None);
	};
	validate_room_id(&room_id)?;

	Ok(Some(ActionTarget { room_id, reply_to: routing.reply_target }))
}

/// Handle the user's response to a notification.
///
/// Only store failures of mark-as-read are returned as `Err`. Every other
/// failure is logged here and reported as [`ActionOutcome::Aborted`].
pub async fn on_action_response(app: &App, response: &ActionResponse) -> ClResult<ActionOutcome> {
	let target = resolve_target(app, response);
	handle_action(app, response, target).await
}

/// Carry out an action whose target was resolved earlier by [`resolve_target`].
pub async fn handle_action(
	app: &App,
	response: &ActionResponse,
	target: ClResult<Option<ActionTarget>>,
) -> ClResult<ActionOutcome> {
	let action = NotificationAction::from_identifier(response.action_identifier.as_deref());

	let target = match target {
		Ok(Some(target)) => target,
		Ok(None) => {
			error!(action = ?action, "No roomId available for action");
			return Ok(ActionOutcome::Aborted(Error::ValidationError(
				"no roomId available for action".into(),
			)));
		}
		Err(e) => {
			error!(action = ?action, error = %e, "Invalid roomId in notification payload");
			return Ok(ActionOutcome::Aborted(e));
		}
	};

	info!(action = ?action, room_id = %target.room_id, "Handling notification action");
	let user = app.current_user();

	let outcome = match action {
		NotificationAction::Reply => {
			match reply(
				app,
				user.as_ref(),
				response.user_text.as_deref(),
				&target.room_id,
				target.reply_to.as_deref(),
			)
			.await
			{
				Ok(outcome) => outcome,
				Err(e) => {
					error!(room_id = %target.room_id, error = %e, "Failed to send reply");
					ActionOutcome::Aborted(e)
				}
			}
		}
		NotificationAction::MarkAsRead => {
			match mark_as_read(app, user.as_ref(), &target.room_id).await {
				Ok(0) => ActionOutcome::NothingToMark,
				Ok(count) => ActionOutcome::MarkedRead { count },
				Err(Error::ValidationError(msg)) => {
					ActionOutcome::Aborted(Error::ValidationError(msg))
				}
				Err(e) => return Err(e),
			}
		}
		NotificationAction::Other => ActionOutcome::NoAction,
	};

	if let Some(notification) = &response.notification {
		if let Err(e) = app.platform.dismiss_notification(&notification.identifier).await {
			warn!(notification = %notification.identifier, error = %e, "Failed to dismiss notification");
		}
	}

	Ok(outcome)
}

/// Store a reply in the room and notify the reply target.
///
/// Writes the message, merges the room summary, then sends a push to
/// `reply_to`. A store failure stops before the push is sent. Delivery
/// problems never fail the reply.
pub async fn reply(
	app: &App,
	user: Option<&UserIdentity>,
	text: Option<&str>,
	room_id: &str,
	reply_to: Option<&str>,
) -> ClResult<ActionOutcome> {
	let Some(user) = user.filter(|u| !u.user_id.is_empty()) else {
		return Err(Error::ValidationError("no current user to reply as".into()));
	};
	let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
		return Err(Error::ValidationError("reply text is empty".into()));
	};
	validate_room_id(room_id)?;

	let message = ChatMessage {
		content: text.to_string(),
		sender_id: user.user_id.clone(),
		sender_name: user.username.clone(),
		created_at: types::now(),
		delivered: true,
		read: false,
	};
	let message_id =
		app.store.create(&messages_path(room_id), serde_json::to_value(&message)?).await?;

	let summary = RoomSummary {
		last_message: message.content.clone(),
		last_message_timestamp: types::now(),
		last_message_sender_id: user.user_id.clone(),
	};
	app.store.set_merge(&room_path(room_id), serde_json::to_value(&summary)?).await?;

	info!(room_id = %room_id, message_id = %message_id, "Replied to message");

	let delivery = match reply_to {
		Some(target) => Some(
			send::send_message(
				app,
				target,
				&format!("New message from {}", user.username),
				text,
				Some(room_id),
			)
			.await,
		),
		None => {
			warn!(room_id = %room_id, "No reply target known, reply not pushed");
			None
		}
	};

	Ok(ActionOutcome::Replied { message_id, delivery })
}

/// Mark every unread message in a room that was not sent by `user` as read.
///
/// Returns the number of messages updated. All updates are applied in one
/// atomic batch. Store errors are returned to the caller.
pub async fn mark_as_read(app: &App, user: Option<&UserIdentity>, room_id: &str) -> ClResult<usize> {
	let Some(user) = user.filter(|u| !u.user_id.is_empty()) else {
		error!(user = ?user, "Invalid user data");
		return Err(Error::ValidationError("invalid user".into()));
	};
	validate_room_id(room_id).inspect_err(|_| error!(room_id = %room_id, "Invalid roomId"))?;

	info!(user_id = %user.user_id, room_id = %room_id, "Marking messages as read");

	let path = messages_path(room_id);
	let filter = QueryFilter::new()
		.with_not_equals("senderId", json!(user.user_id))
		.with_equals("read", json!(false));

	let unread = app
		.store
		.query(&path, QueryOptions::new().with_filter(filter))
		.await
		.inspect_err(|e| error!(room_id = %room_id, error = %e, "Failed to query unread messages"))?;

	if unread.is_empty() {
		info!(room_id = %room_id, "No unread messages found");
		return Ok(0);
	}

	let mut batch = app.store.batch().await?;
	for doc in &unread {
		let Some(id) = doc.get("id").and_then(Value::as_str) else {
			warn!(room_id = %room_id, "Message without id skipped");
			continue;
		};
		batch.update(&format!("{}/{}", path, id), json!({ "read": true })).await?;
	}

	let count = batch.commit().await.inspect_err(|e| {
		error!(room_id = %room_id, error = %e, "Failed to update message read status");
	})?;

	info!(room_id = %room_id, count = count, "Marked messages as read");
	Ok(count)
}


// vim: ts=4

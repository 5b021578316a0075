//! Outgoing notifications
//!
//! Builds the push envelope for a chat message and hands it to the configured
//! push provider, or shows it locally on this device.

use serde_json::Value;

use crate::prelude::*;
use chatpush_types::platform_adapter::LocalNotification;
use chatpush_types::push_provider::{PushData, PushMessage, PushPriority, PushResult};

/// Routing payload attached to every notification we send: our own token as
/// the reply target and the room the message belongs to.
pub fn push_data(app: &App, room_id: Option<&str>) -> PushData {
	PushData {
		reply_to: app.device_token().map(|token| token.0),
		room_id: room_id.filter(|r| !r.is_empty()).map(Into::into),
	}
}

/// Build the message envelope for a push to `target`
pub fn build_message(
	app: &App,
	target: &str,
	title: &str,
	body: &str,
	room_id: Option<&str>,
) -> PushMessage {
	PushMessage {
		to: target.into(),
		sound: Some("default".into()),
		title: title.to_string(),
		body: body.to_string(),
		data: push_data(app, room_id),
		category_identifier: Some(app.opts.category_id.clone()),
		channel_id: Some(app.opts.channel_id.clone()),
		priority: PushPriority::High,
	}
}

/// Send a chat notification to another device.
///
/// Best-effort: the outcome is logged and returned, never raised.
pub async fn send_message(
	app: &App,
	target: &str,
	title: &str,
	body: &str,
	room_id: Option<&str>,
) -> PushResult {
	let message = build_message(app, target, title, body, room_id);
	let result = app.push_provider.send(&message).await;

	match &result {
		PushResult::Success(ticket) => {
			debug!(target = %target, ticket = ?ticket, "Push notification sent");
		}
		PushResult::DeviceNotRegistered => {
			warn!(target = %target, "Push target is no longer registered");
		}
		PushResult::TemporaryError(e) => {
			warn!(target = %target, error = %e, "Temporary push notification error");
		}
		PushResult::PermanentError(e) => {
			error!(target = %target, error = %e, "Permanent push notification error");
		}
	}

	result
}

/// Show a chat notification on this device right away.
///
/// Returns the platform's identifier of the shown notification.
pub async fn schedule_local(
	app: &App,
	title: &str,
	body: &str,
	room_id: Option<&str>,
) -> ClResult<Box<str>> {
	let Value::Object(data) = serde_json::to_value(push_data(app, room_id))? else {
		return Err(Error::Internal("push data is not an object".into()));
	};

	let notification = LocalNotification {
		title: title.to_string(),
		body: body.to_string(),
		data,
		category_identifier: app.opts.category_id.clone(),
	};

	app.platform.schedule_notification(&notification).await
}

// vim: ts=4

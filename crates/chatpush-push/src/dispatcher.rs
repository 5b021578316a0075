//! Incoming notification handling and action category registration

use serde_json::Value;

use crate::action::{MARK_AS_READ, REPLY_ACTION};
use crate::prelude::*;
use crate::validate_room_id;
use chatpush_types::platform_adapter::{
	ActionOptions, CategoryAction, NotificationCategory, PresentationBehavior, TextInputOptions,
};
use chatpush_types::types::IncomingNotification;

/// Foreground notifications are shown with alert, sound and badge
pub const PRESENTATION: PresentationBehavior =
	PresentationBehavior { should_show_alert: true, should_play_sound: true, should_set_badge: true };

/// The interactive category attached to every chat notification
pub fn actions_category(category_id: &str) -> NotificationCategory {
	NotificationCategory {
		identifier: category_id.into(),
		actions: vec![
			CategoryAction {
				identifier: REPLY_ACTION.into(),
				button_title: "Reply".into(),
				options: ActionOptions {
					opens_app_to_foreground: true,
					is_destructive: true,
					is_authentication_required: false,
				},
				text_input: Some(TextInputOptions {
					submit_button_title: "Send".into(),
					placeholder: "Type your reply...".into(),
				}),
			},
			CategoryAction {
				identifier: MARK_AS_READ.into(),
				button_title: "Mark as Read".into(),
				options: ActionOptions {
					opens_app_to_foreground: false,
					is_destructive: false,
					is_authentication_required: false,
				},
				text_input: None,
			},
		],
	}
}

/// Register the reply / mark-as-read category with the platform
pub async fn register_categories(app: &App) -> ClResult<()> {
	app.platform.set_notification_category(&actions_category(&app.opts.category_id)).await
}

/// Install foreground presentation behavior and the action category
pub async fn install(app: &App) -> ClResult<()> {
	app.platform.set_presentation_behavior(PRESENTATION).await.inspect_err(|e| {
		error!(error = %e, "Failed to set notification presentation behavior");
	})?;
	register_categories(app).await.inspect_err(|e| {
		error!(error = %e, "Failed to register notification category");
	})?;
	Ok(())
}

/// Non-empty string value of a payload field
pub(crate) fn string_field<'a>(value: Option<&'a Value>) -> Option<&'a str> {
	match value {
		Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
		_ => None,
	}
}

/// Record the routing metadata of a received notification.
///
/// Notifications without a usable `roomId` are discarded and leave the
/// routing state untouched.
pub async fn on_notification_received(
	app: &App,
	notification: &IncomingNotification,
) -> ClResult<()> {
	let Some(room_id) = string_field(notification.data_field("roomId")) else {
		error!(
			notification = %notification.identifier,
			"No roomId received in notification data"
		);
		return Err(Error::ValidationError("notification data has no roomId".into()));
	};
	if let Err(e) = validate_room_id(room_id) {
		error!(notification = %notification.identifier, error = %e, "Invalid roomId in notification data");
		return Err(e);
	}
	let reply_to = string_field(notification.data_field("replyTo"));

	debug!(
		room_id = %room_id,
		reply_to = ?reply_to,
		title = ?string_field(notification.data_field("title")),
		"Notification received"
	);

	app.update_routing(room_id.into(), reply_to.map(Into::into));
	Ok(())
}

// vim: ts=4

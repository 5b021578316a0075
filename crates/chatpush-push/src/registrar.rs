//! Push token registration

use crate::prelude::*;
use chatpush_types::platform_adapter::{Importance, NotificationChannel, PlatformOs};
use chatpush_types::types::{DeviceToken, TokenOutcome};

/// Default Android channel
pub fn default_channel(channel_id: &str) -> NotificationChannel {
	NotificationChannel {
		id: channel_id.into(),
		name: channel_id.into(),
		importance: Importance::Max,
		vibration_pattern: vec![0, 250, 250, 250],
		light_color: "#FF231F7C".into(),
	}
}

/// Register this device for remote push delivery.
///
/// On success the token is published on the app context. When the project id
/// is missing or the platform fails to hand out a token, the failure reason is
/// published instead. A simulator or a denied permission leaves the published
/// token untouched. Nothing is retried.
pub async fn register_for_push(app: &App) -> ClResult<DeviceToken> {
	if app.platform.os() == PlatformOs::Android {
		app.platform.set_notification_channel(&default_channel(&app.opts.channel_id)).await?;
	}

	if !app.platform.is_physical_device() {
		error!("Must use physical device for push notifications");
		return Err(Error::Unsupported("push notifications need a physical device".into()));
	}

	let mut status = app.platform.get_permission_status().await?;
	if !status.is_granted() {
		status = app.platform.request_permissions().await?;
	}
	if !status.is_granted() {
		error!(status = ?status, "Failed to get push token for push notification: permission not granted");
		return Err(Error::PermissionDenied);
	}

	let Some(project_id) = app.opts.project_id.as_deref() else {
		error!("Push token not requested: project id not configured");
		app.set_token_outcome(TokenOutcome::Failure("project id not configured".into()));
		return Err(Error::ConfigError("project id not configured".into()));
	};

	match app.platform.get_push_token(project_id).await {
		Ok(token) => {
			info!(token = %token, "Push token acquired");
			app.set_token_outcome(TokenOutcome::Success(token.clone()));
			Ok(token)
		}
		Err(e) => {
			error!(error = %e, "Failed to acquire push token");
			let reason = e.to_string();
			app.set_token_outcome(TokenOutcome::Failure(reason.as_str().into()));
			Err(Error::TokenError(reason))
		}
	}
}

// vim: ts=4

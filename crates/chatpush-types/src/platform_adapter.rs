//! Notification Platform Adapter
//!
//! Capability interface over the device's notification API: permissions,
//! channels, interactive categories, push token acquisition, and showing or
//! dismissing notifications. The handlers only consume this trait; a host
//! application provides the implementation for its platform.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

use crate::prelude::*;
use crate::types::DeviceToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformOs {
	Android,
	Ios,
	Web,
	Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionStatus {
	Granted,
	Denied,
	Undetermined,
}

impl PermissionStatus {
	pub fn is_granted(self) -> bool {
		matches!(self, PermissionStatus::Granted)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Importance {
	Min,
	Low,
	Default,
	High,
	Max,
}

/// Android notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannel {
	pub id: Box<str>,
	pub name: Box<str>,
	pub importance: Importance,
	pub vibration_pattern: Vec<u32>,
	pub light_color: Box<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOptions {
	pub opens_app_to_foreground: bool,
	pub is_destructive: bool,
	pub is_authentication_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInputOptions {
	pub submit_button_title: Box<str>,
	pub placeholder: Box<str>,
}

/// An interactive button shown on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAction {
	pub identifier: Box<str>,
	pub button_title: Box<str>,
	pub options: ActionOptions,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub text_input: Option<TextInputOptions>,
}

/// A named set of interactive actions, referenced by `categoryIdentifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCategory {
	pub identifier: Box<str>,
	pub actions: Vec<CategoryAction>,
}

/// How a notification received while the app is in the foreground is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationBehavior {
	pub should_show_alert: bool,
	pub should_play_sound: bool,
	pub should_set_badge: bool,
}

/// Content of a notification shown locally on this device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalNotification {
	pub title: String,
	pub body: String,
	pub data: Map<String, Value>,
	pub category_identifier: Box<str>,
}

#[async_trait]
pub trait NotificationPlatform: Debug + Send + Sync {
	/// Operating system the app runs on.
	fn os(&self) -> PlatformOs;

	/// false on simulators and emulators.
	fn is_physical_device(&self) -> bool;

	/// Create or update a notification channel. Idempotent.
	async fn set_notification_channel(&self, channel: &NotificationChannel) -> ClResult<()>;

	async fn get_permission_status(&self) -> ClResult<PermissionStatus>;

	/// Ask the user for notification permission.
	async fn request_permissions(&self) -> ClResult<PermissionStatus>;

	/// Acquire a push-routing token scoped to a project.
	async fn get_push_token(&self, project_id: &str) -> ClResult<DeviceToken>;

	async fn set_notification_category(&self, category: &NotificationCategory) -> ClResult<()>;

	async fn set_presentation_behavior(&self, behavior: PresentationBehavior) -> ClResult<()>;

	/// Show a notification immediately. Returns its platform identifier.
	async fn schedule_notification(&self, notification: &LocalNotification) -> ClResult<Box<str>>;

	/// Remove a delivered notification from the notification surface.
	async fn dismiss_notification(&self, identifier: &str) -> ClResult<()>;
}

// vim: ts=4

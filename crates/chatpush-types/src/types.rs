//! Chat data model and notification payload types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::SystemTime;

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default)]
pub struct Timestamp(pub i64);

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::cmp::PartialEq for Timestamp {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl std::cmp::PartialOrd for Timestamp {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::cmp::Eq for Timestamp {}

impl std::cmp::Ord for Timestamp {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.0.cmp(&other.0)
	}
}

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_i64(self.0)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Timestamp(i64::deserialize(deserializer)?))
	}
}

pub fn now() -> Timestamp {
	let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
	Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
}

// Device token //
//**************//

/// Opaque push-routing token for a device.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceToken(pub Box<str>);

impl DeviceToken {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for DeviceToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for DeviceToken {
	fn from(s: &str) -> Self {
		Self(s.into())
	}
}

/// Result of the last token acquisition attempt.
///
/// A failure reason is never stored where a token is expected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenOutcome {
	Success(DeviceToken),
	Failure(Box<str>),
}

impl TokenOutcome {
	pub fn token(&self) -> Option<&DeviceToken> {
		match self {
			TokenOutcome::Success(token) => Some(token),
			TokenOutcome::Failure(_) => None,
		}
	}
}

// Chat model //
//************//

/// The user acting on notifications on this device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
	pub user_id: Box<str>,
	pub username: Box<str>,
}

/// A message document under `rooms/{roomId}/messages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
	pub content: String,
	pub sender_id: Box<str>,
	pub sender_name: Box<str>,
	pub created_at: Timestamp,
	pub delivered: bool,
	pub read: bool,
}

/// Summary fields merged into `rooms/{roomId}` whenever a message is sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
	pub last_message: String,
	pub last_message_timestamp: Timestamp,
	pub last_message_sender_id: Box<str>,
}

// Notification events //
//*********************//

/// A notification delivered to this device.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingNotification {
	/// Platform identifier, used for dismissal
	pub identifier: Box<str>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub body: Option<String>,
	/// Raw data payload (`replyTo`, `roomId`, ...)
	#[serde(default)]
	pub data: Map<String, Value>,
}

impl IncomingNotification {
	pub fn data_field(&self, name: &str) -> Option<&Value> {
		self.data.get(name)
	}
}

/// The user's reaction to a delivered notification.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
	#[serde(default)]
	pub action_identifier: Option<Box<str>>,
	#[serde(default)]
	pub user_text: Option<String>,
	#[serde(default)]
	pub notification: Option<IncomingNotification>,
}

// vim: ts=4

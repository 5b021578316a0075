//! Push-delivery provider interface
//!
//! The provider relays a [`PushMessage`] to the device behind a push token.
//! Delivery is best-effort: implementations report the outcome as a
//! [`PushResult`] value and never return an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

/// Routing metadata carried in the push payload.
///
/// Both fields are always serialized, as `null` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushData {
	/// Token of the sending device, so the recipient can reply to it
	pub reply_to: Option<Box<str>>,
	pub room_id: Option<Box<str>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPriority {
	Default,
	Normal,
	#[default]
	High,
}

/// Message envelope accepted by the push-delivery provider.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
	/// Target device token
	pub to: Box<str>,
	pub sound: Option<Box<str>>,
	pub title: String,
	pub body: String,
	pub data: PushData,
	pub category_identifier: Option<Box<str>>,
	pub channel_id: Option<Box<str>>,
	pub priority: PushPriority,
}

/// Result of sending a push notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushResult {
	/// Accepted by the provider, with its ticket id when one was returned
	Success(Option<Box<str>>),
	/// The target token is no longer registered
	DeviceNotRegistered,
	/// Transport or server-side error (a later attempt may succeed)
	TemporaryError(String),
	/// The provider rejected the message
	PermanentError(String),
}

impl PushResult {
	pub fn is_success(&self) -> bool {
		matches!(self, PushResult::Success(_))
	}
}

#[async_trait]
pub trait PushProvider: Debug + Send + Sync {
	async fn send(&self, message: &PushMessage) -> PushResult;
}


// vim: ts=4

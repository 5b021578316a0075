//! Test doubles shared by the push integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

use chatpush_core::{Adapters, App, AppOpts, AppState};
use chatpush_store_adapter_redb::StoreAdapterRedb;
use chatpush_types::error::{ClResult, Error};
use chatpush_types::platform_adapter::*;
use chatpush_types::push_provider::{PushMessage, PushProvider, PushResult};
use chatpush_types::store_adapter::{QueryOptions, StoreAdapter, WriteBatch};
use chatpush_types::types::{ActionResponse, DeviceToken, IncomingNotification, UserIdentity};

// Platform //
//**********//

/// Scriptable notification platform recording every call it receives
#[derive(Debug)]
pub struct FakePlatform {
	pub os: PlatformOs,
	pub physical: bool,
	pub status: Mutex<PermissionStatus>,
	/// Status handed out when permissions are requested
	pub requested_status: PermissionStatus,
	/// `None` makes token acquisition fail
	pub token: Option<&'static str>,
	pub calls: Mutex<Vec<String>>,
	pub channels: Mutex<Vec<NotificationChannel>>,
	pub categories: Mutex<Vec<NotificationCategory>>,
	pub scheduled: Mutex<Vec<LocalNotification>>,
	pub dismissed: Mutex<Vec<String>>,
}

impl Default for FakePlatform {
	fn default() -> Self {
		Self {
			os: PlatformOs::Android,
			physical: true,
			status: Mutex::new(PermissionStatus::Granted),
			requested_status: PermissionStatus::Granted,
			token: Some("ExponentPushToken[self]"),
			calls: Mutex::new(Vec::new()),
			channels: Mutex::new(Vec::new()),
			categories: Mutex::new(Vec::new()),
			scheduled: Mutex::new(Vec::new()),
			dismissed: Mutex::new(Vec::new()),
		}
	}
}

impl FakePlatform {
	fn record(&self, call: &str) {
		self.calls.lock().push(call.to_string());
	}

	pub fn called(&self, call: &str) -> bool {
		self.calls.lock().iter().any(|c| c == call)
	}
}

#[async_trait]
impl NotificationPlatform for FakePlatform {
	fn os(&self) -> PlatformOs {
		self.os
	}

	fn is_physical_device(&self) -> bool {
		self.physical
	}

	async fn set_notification_channel(&self, channel: &NotificationChannel) -> ClResult<()> {
		self.record("set_notification_channel");
		self.channels.lock().push(channel.clone());
		Ok(())
	}

	async fn get_permission_status(&self) -> ClResult<PermissionStatus> {
		self.record("get_permission_status");
		Ok(*self.status.lock())
	}

	async fn request_permissions(&self) -> ClResult<PermissionStatus> {
		self.record("request_permissions");
		*self.status.lock() = self.requested_status;
		Ok(self.requested_status)
	}

	async fn get_push_token(&self, _project_id: &str) -> ClResult<DeviceToken> {
		self.record("get_push_token");
		match self.token {
			Some(token) => Ok(token.into()),
			None => Err(Error::NetworkError("token service unreachable".into())),
		}
	}

	async fn set_notification_category(&self, category: &NotificationCategory) -> ClResult<()> {
		self.record("set_notification_category");
		self.categories.lock().push(category.clone());
		Ok(())
	}

	async fn set_presentation_behavior(&self, _behavior: PresentationBehavior) -> ClResult<()> {
		self.record("set_presentation_behavior");
		Ok(())
	}

	async fn schedule_notification(&self, notification: &LocalNotification) -> ClResult<Box<str>> {
		self.record("schedule_notification");
		let mut scheduled = self.scheduled.lock();
		scheduled.push(notification.clone());
		Ok(format!("local-{}", scheduled.len()).into())
	}

	async fn dismiss_notification(&self, identifier: &str) -> ClResult<()> {
		self.record("dismiss_notification");
		self.dismissed.lock().push(identifier.to_string());
		Ok(())
	}
}

// Push provider //
//***************//

/// Push provider that records messages instead of delivering them
#[derive(Debug)]
pub struct RecordingProvider {
	pub result: PushResult,
	pub sent: Mutex<Vec<PushMessage>>,
}

impl RecordingProvider {
	pub fn new(result: PushResult) -> Self {
		Self { result, sent: Mutex::new(Vec::new()) }
	}
}

impl Default for RecordingProvider {
	fn default() -> Self {
		Self::new(PushResult::Success(Some("ticket-1".into())))
	}
}

#[async_trait]
impl PushProvider for RecordingProvider {
	async fn send(&self, message: &PushMessage) -> PushResult {
		self.sent.lock().push(message.clone());
		self.result.clone()
	}
}

// Store //
//*******//

/// Store operation that should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
	Create,
	SetMerge,
	Query,
	Commit,
}

/// redb store wrapper that logs every operation and can inject failures
#[derive(Debug)]
pub struct RecordingStore {
	pub inner: StoreAdapterRedb,
	pub ops: Arc<Mutex<Vec<String>>>,
	pub fail_on: Mutex<Option<FailOn>>,
}

impl RecordingStore {
	pub fn ops(&self) -> Vec<String> {
		self.ops.lock().clone()
	}

	pub fn count(&self, op: &str) -> usize {
		self.ops.lock().iter().filter(|o| o.as_str() == op).count()
	}

	pub fn clear(&self) {
		self.ops.lock().clear();
	}

	pub fn fail_on(&self, op: FailOn) {
		*self.fail_on.lock() = Some(op);
	}

	fn check(&self, op: &str, fail: FailOn) -> ClResult<()> {
		self.ops.lock().push(op.to_string());
		if *self.fail_on.lock() == Some(fail) {
			return Err(Error::DbError);
		}
		Ok(())
	}
}

#[async_trait]
impl StoreAdapter for RecordingStore {
	async fn get(&self, path: &str) -> ClResult<Option<Value>> {
		self.ops.lock().push("get".into());
		self.inner.get(path).await
	}

	async fn query(&self, path: &str, opts: QueryOptions) -> ClResult<Vec<Value>> {
		self.check("query", FailOn::Query)?;
		self.inner.query(path, opts).await
	}

	async fn create(&self, path: &str, data: Value) -> ClResult<Box<str>> {
		self.check("create", FailOn::Create)?;
		self.inner.create(path, data).await
	}

	async fn set(&self, path: &str, data: Value) -> ClResult<()> {
		self.ops.lock().push("set".into());
		self.inner.set(path, data).await
	}

	async fn set_merge(&self, path: &str, data: Value) -> ClResult<()> {
		self.check("set_merge", FailOn::SetMerge)?;
		self.inner.set_merge(path, data).await
	}

	async fn batch(&self) -> ClResult<Box<dyn WriteBatch>> {
		self.ops.lock().push("batch".into());
		Ok(Box::new(RecordingBatch {
			inner: self.inner.batch().await?,
			ops: Arc::clone(&self.ops),
			fail: *self.fail_on.lock() == Some(FailOn::Commit),
		}))
	}
}

struct RecordingBatch {
	inner: Box<dyn WriteBatch>,
	ops: Arc<Mutex<Vec<String>>>,
	fail: bool,
}

#[async_trait]
impl WriteBatch for RecordingBatch {
	async fn update(&mut self, path: &str, fields: Value) -> ClResult<()> {
		self.ops.lock().push("update".into());
		self.inner.update(path, fields).await
	}

	fn len(&self) -> usize {
		self.inner.len()
	}

	async fn commit(&mut self) -> ClResult<usize> {
		self.ops.lock().push("commit".into());
		if self.fail {
			return Err(Error::DbError);
		}
		self.inner.commit().await
	}
}

// App //
//*****//

pub struct TestApp {
	pub app: App,
	pub platform: Arc<FakePlatform>,
	pub store: Arc<RecordingStore>,
	pub provider: Arc<RecordingProvider>,
	_temp: TempDir,
}

pub fn test_opts() -> AppOpts {
	AppOpts { project_id: Some("project-1".into()), ..AppOpts::default() }
}

pub async fn build_app(
	opts: AppOpts,
	platform: FakePlatform,
	provider: RecordingProvider,
) -> TestApp {
	let temp = TempDir::new().expect("Failed to create temp directory");
	let inner = StoreAdapterRedb::new(temp.path().join("docs.redb"))
		.await
		.expect("Failed to create store");

	let platform = Arc::new(platform);
	let store = Arc::new(RecordingStore {
		inner,
		ops: Arc::new(Mutex::new(Vec::new())),
		fail_on: Mutex::new(None),
	});
	let provider = Arc::new(provider);

	let app = AppState::new(
		opts,
		Adapters {
			platform: Some(platform.clone()),
			store: Some(store.clone()),
			push_provider: Some(provider.clone()),
		},
	)
	.expect("Failed to create app");

	TestApp { app, platform, store, provider, _temp: temp }
}

/// App with default fakes and a signed-in user `B`
pub async fn default_app() -> TestApp {
	let t = build_app(test_opts(), FakePlatform::default(), RecordingProvider::default()).await;
	t.app.set_current_user(Some(user("B", "bob")));
	t
}

pub fn user(id: &str, name: &str) -> UserIdentity {
	UserIdentity { user_id: id.into(), username: name.into() }
}

pub fn notification(identifier: &str, data: Value) -> IncomingNotification {
	IncomingNotification {
		identifier: identifier.into(),
		title: Some("New message from alice".into()),
		body: Some("hi".into()),
		data: data.as_object().cloned().unwrap_or_default(),
	}
}

pub fn action(identifier: Option<&str>, text: Option<&str>, data: Option<Value>) -> ActionResponse {
	ActionResponse {
		action_identifier: identifier.map(Into::into),
		user_text: text.map(str::to_string),
		notification: data.map(|data| notification("notif-1", data)),
	}
}

// vim: ts=4

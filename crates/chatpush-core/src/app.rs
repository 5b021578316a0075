//! App state type

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::prelude::*;
use crate::routing::RoutingState;

use chatpush_types::platform_adapter::NotificationPlatform;
use chatpush_types::push_provider::PushProvider;
use chatpush_types::store_adapter::StoreAdapter;
use chatpush_types::types::{DeviceToken, TokenOutcome, UserIdentity};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PUSH_ENDPOINT: &str = "https://exp.host/--/api/v2/push/send";
pub const DEFAULT_CHANNEL_ID: &str = "default";
pub const DEFAULT_CATEGORY_ID: &str = "actions";

pub const ENV_PROJECT_ID: &str = "CHATPUSH_PROJECT_ID";
pub const ENV_PUSH_ENDPOINT: &str = "CHATPUSH_PUSH_ENDPOINT";

#[derive(Debug, Clone)]
pub struct AppOpts {
	/// Project the push token is scoped to. Required for token acquisition.
	pub project_id: Option<Box<str>>,
	/// Push provider send endpoint
	pub push_endpoint: Box<str>,
	/// Android channel used for both the local channel and outgoing messages
	pub channel_id: Box<str>,
	/// Category carrying the interactive reply / mark-as-read actions
	pub category_id: Box<str>,
}

impl Default for AppOpts {
	fn default() -> Self {
		Self {
			project_id: None,
			push_endpoint: DEFAULT_PUSH_ENDPOINT.into(),
			channel_id: DEFAULT_CHANNEL_ID.into(),
			category_id: DEFAULT_CATEGORY_ID.into(),
		}
	}
}

impl AppOpts {
	/// Read options from the environment.
	///
	/// The project id falls back to the value `CHATPUSH_PROJECT_ID` had at build time.
	pub fn from_env() -> Self {
		let project_id = std::env::var(ENV_PROJECT_ID)
			.ok()
			.or_else(|| option_env!("CHATPUSH_PROJECT_ID").map(str::to_string))
			.filter(|id| !id.trim().is_empty())
			.map(Into::into);
		let push_endpoint = std::env::var(ENV_PUSH_ENDPOINT)
			.ok()
			.filter(|e| !e.trim().is_empty())
			.map_or_else(|| DEFAULT_PUSH_ENDPOINT.into(), Into::into);

		Self { project_id, push_endpoint, ..Self::default() }
	}
}

#[derive(Debug, Default)]
pub struct Adapters {
	pub platform: Option<Arc<dyn NotificationPlatform>>,
	pub store: Option<Arc<dyn StoreAdapter>>,
	pub push_provider: Option<Arc<dyn PushProvider>>,
}

#[derive(Debug)]
pub struct AppState {
	pub opts: AppOpts,

	pub platform: Arc<dyn NotificationPlatform>,
	pub store: Arc<dyn StoreAdapter>,
	pub push_provider: Arc<dyn PushProvider>,

	token: RwLock<Option<TokenOutcome>>,
	routing: Mutex<RoutingState>,
	user: RwLock<Option<UserIdentity>>,
}

pub type App = Arc<AppState>;

impl AppState {
	/// Create the application context. Every adapter must be configured.
	pub fn new(opts: AppOpts, adapters: Adapters) -> ClResult<App> {
		let Some(platform) = adapters.platform else {
			error!("FATAL: No notification platform configured");
			return Err(Error::ConfigError("no notification platform configured".into()));
		};
		let Some(store) = adapters.store else {
			error!("FATAL: No store adapter configured");
			return Err(Error::ConfigError("no store adapter configured".into()));
		};
		let Some(push_provider) = adapters.push_provider else {
			error!("FATAL: No push provider configured");
			return Err(Error::ConfigError("no push provider configured".into()));
		};

		Ok(Arc::new(Self {
			opts,
			platform,
			store,
			push_provider,
			token: RwLock::new(None),
			routing: Mutex::new(RoutingState::default()),
			user: RwLock::new(None),
		}))
	}

	// Device token

	/// The device's push token, if the last acquisition succeeded.
	pub fn device_token(&self) -> Option<DeviceToken> {
		self.token.read().as_ref().and_then(TokenOutcome::token).cloned()
	}

	pub fn token_outcome(&self) -> Option<TokenOutcome> {
		self.token.read().clone()
	}

	pub fn set_token_outcome(&self, outcome: TokenOutcome) {
		*self.token.write() = Some(outcome);
	}

	// Routing state

	pub fn routing(&self) -> RoutingState {
		self.routing.lock().clone()
	}

	pub fn update_routing(&self, room_id: Box<str>, reply_target: Option<Box<str>>) {
		self.routing.lock().update(room_id, reply_target);
	}

	// Acting user

	pub fn current_user(&self) -> Option<UserIdentity> {
		self.user.read().clone()
	}

	pub fn set_current_user(&self, user: Option<UserIdentity>) {
		*self.user.write() = user;
	}
}

// vim: ts=4

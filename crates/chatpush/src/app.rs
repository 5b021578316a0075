//! App builder - constructs and runs the chatpush context

use std::sync::Arc;

use crate::listener::{Listener, PlatformEvent};
use crate::platform_adapter::NotificationPlatform;
use crate::prelude::*;
use crate::push_provider::PushProvider;
use crate::store_adapter::StoreAdapter;
use crate::types::UserIdentity;
pub use chatpush_core::app::{Adapters, App, AppOpts, AppState, VERSION};
use chatpush_push::{dispatcher, register_for_push, HttpPushProvider};

pub struct AppBuilder {
	opts: AppOpts,
	adapters: Adapters,
	user: Option<UserIdentity>,
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl AppBuilder {
	/// New builder with options from the environment.
	///
	/// Installs the `RUST_LOG` driven tracing subscriber unless one is
	/// already set.
	pub fn new() -> Self {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder { opts: AppOpts::from_env(), adapters: Adapters::default(), user: None }
	}

	// Opts
	pub fn opts(&mut self, opts: AppOpts) -> &mut Self {
		self.opts = opts;
		self
	}
	pub fn project_id(&mut self, project_id: impl Into<Box<str>>) -> &mut Self {
		self.opts.project_id = Some(project_id.into());
		self
	}
	pub fn push_endpoint(&mut self, push_endpoint: impl Into<Box<str>>) -> &mut Self {
		self.opts.push_endpoint = push_endpoint.into();
		self
	}
	pub fn channel_id(&mut self, channel_id: impl Into<Box<str>>) -> &mut Self {
		self.opts.channel_id = channel_id.into();
		self
	}
	pub fn category_id(&mut self, category_id: impl Into<Box<str>>) -> &mut Self {
		self.opts.category_id = category_id.into();
		self
	}
	pub fn user(&mut self, user: UserIdentity) -> &mut Self {
		self.user = Some(user);
		self
	}

	// Adapters
	pub fn platform(&mut self, platform: Arc<dyn NotificationPlatform>) -> &mut Self {
		self.adapters.platform = Some(platform);
		self
	}
	pub fn store(&mut self, store: Arc<dyn StoreAdapter>) -> &mut Self {
		self.adapters.store = Some(store);
		self
	}
	pub fn push_provider(&mut self, push_provider: Arc<dyn PushProvider>) -> &mut Self {
		self.adapters.push_provider = Some(push_provider);
		self
	}

	/// Create the application context.
	///
	/// Without an explicit push provider an [`HttpPushProvider`] for the
	/// configured endpoint is used.
	pub fn build(self) -> ClResult<App> {
		let mut adapters = self.adapters;
		if adapters.push_provider.is_none() {
			let provider = HttpPushProvider::new(self.opts.push_endpoint.clone()).inspect_err(|e| {
				error!("FATAL: Failed to create push provider: {}", e);
			})?;
			info!(endpoint = %provider.endpoint(), "Using HTTP push provider");
			adapters.push_provider = Some(Arc::new(provider));
		}

		if self.opts.project_id.is_none() {
			warn!("No project id configured, push token acquisition will fail");
		}

		let app = AppState::new(self.opts, adapters)?;
		app.set_current_user(self.user);
		Ok(app)
	}

	/// Build the context, register for push and handle platform events until
	/// every sender of `events` is dropped.
	pub async fn run(self, events: flume::Receiver<PlatformEvent>) -> ClResult<()> {
		info!("chatpush V{}", VERSION);

		let app = self.build()?;

		match register_for_push(&app).await {
			Ok(token) => info!(token = %token, "Registered for push notifications"),
			Err(e) => warn!(error = %e, "Push registration failed, continuing without a token"),
		}

		if let Err(e) = dispatcher::install(&app).await {
			warn!(error = %e, "Notification actions are not available");
		}

		let handled = Listener::new(app, events).run().await;
		info!(events = handled, "Event channel closed, shutting down");
		Ok(())
	}
}

// vim: ts=4

//! Platform event listener
//!
//! The host application forwards the notification callbacks of its platform
//! into a flume channel. Events are dispatched in arrival order: a received
//! notification updates the routing state before the next event is read, and
//! an action resolves its target at that point too. The action itself then
//! runs in its own task, so a slow store or push provider never holds up the
//! events behind it.

use flume::{Receiver, Sender};
use tokio::task::JoinSet;

use crate::prelude::*;
use crate::types::{ActionResponse, IncomingNotification};
use chatpush_push::action::{handle_action, resolve_target};
use chatpush_push::{on_notification_received, ActionOutcome};

#[derive(Debug, Clone)]
pub enum PlatformEvent {
	/// A notification arrived while the app was running
	NotificationReceived(IncomingNotification),
	/// The user tapped a notification or one of its actions
	ActionResponse(ActionResponse),
}

/// Create an unbounded event channel
pub fn channel() -> (Sender<PlatformEvent>, Receiver<PlatformEvent>) {
	flume::unbounded()
}

pub struct Listener {
	app: App,
	events: Receiver<PlatformEvent>,
}

impl Listener {
	pub fn new(app: App, events: Receiver<PlatformEvent>) -> Self {
		Self { app, events }
	}

	pub fn app(&self) -> &App {
		&self.app
	}

	/// Dispatch one event. Actions are spawned onto `tasks`.
	async fn dispatch(&self, event: PlatformEvent, tasks: &mut JoinSet<()>) {
		match event {
			PlatformEvent::NotificationReceived(notification) => {
				// rejected notifications are logged by the dispatcher
				if let Err(e) = on_notification_received(&self.app, &notification).await {
					debug!(notification = %notification.identifier, error = %e, "Notification ignored");
				}
			}
			PlatformEvent::ActionResponse(response) => {
				let target = resolve_target(&self.app, &response);
				let app = self.app.clone();
				tasks.spawn(async move {
					match handle_action(&app, &response, target).await {
						Ok(ActionOutcome::Aborted(e)) => {
							debug!(error = %e, "Notification action aborted");
						}
						Ok(outcome) => debug!(outcome = ?outcome, "Notification action handled"),
						Err(e) => error!(error = %e, "Notification action failed"),
					}
				});
			}
		}
	}

	/// Handle events until the channel closes and every spawned action has
	/// finished. Returns the number of events dispatched.
	pub async fn run(self) -> usize {
		let mut tasks = JoinSet::new();
		let mut handled = 0;

		while let Ok(event) = self.events.recv_async().await {
			self.dispatch(event, &mut tasks).await;
			handled += 1;

			while let Some(res) = tasks.try_join_next() {
				if let Err(e) = res {
					error!(error = %e, "Notification action task failed");
				}
			}
		}

		if !tasks.is_empty() {
			debug!(pending = tasks.len(), "Event channel closed, waiting for actions");
		}
		while let Some(res) = tasks.join_next().await {
			if let Err(e) = res {
				error!(error = %e, "Notification action task failed");
			}
		}
		handled
	}
}

// vim: ts=4

//! Core infrastructure for chatpush.
//!
//! Holds the application context every handler receives: the adapters, the
//! options, the device token slot and the notification routing state.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod prelude;
pub mod routing;

pub use app::{Adapters, App, AppOpts, AppState};
pub use routing::RoutingState;

// vim: ts=4

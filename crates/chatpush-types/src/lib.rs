//! Shared types, adapter traits, and core utilities for chatpush.
//!
//! Everything the notification handlers and the adapter implementations have
//! to agree on lives here: the error type, the chat data model, and the
//! capability traits for the document store, the device notification platform
//! and the push-delivery provider.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod platform_adapter;
pub mod prelude;
pub mod push_provider;
pub mod store_adapter;
pub mod types;
pub mod utils;

// vim: ts=4

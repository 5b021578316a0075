pub use chatpush_core::app::App;
pub use chatpush_types::error::{ClResult, Error};

pub use tracing::{debug, error, info, warn};

// vim: ts=4

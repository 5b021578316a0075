pub use crate::app::App;
pub use chatpush_types::error::{ClResult, Error};
pub use chatpush_types::types::Timestamp;

pub use tracing::{debug, error, info, warn};

// vim: ts=4

use chatpush_types::error::Error as ChatpushError;
use std::fmt;

/// Internal error type for the store adapter
#[derive(Debug)]
pub enum Error {
	RedbError(String),
	JsonError(String),
	IoError(std::io::Error),
	InvalidPath(String),
	NotFound(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::RedbError(msg) => write!(f, "redb error: {}", msg),
			Error::JsonError(msg) => write!(f, "json error: {}", msg),
			Error::IoError(e) => write!(f, "io error: {}", e),
			Error::InvalidPath(msg) => write!(f, "invalid path: {}", msg),
			Error::NotFound(path) => write!(f, "document not found: {}", path),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(e: std::io::Error) -> Self {
		Error::IoError(e)
	}
}

impl From<serde_json::Error> for Error {
	fn from(e: serde_json::Error) -> Self {
		Error::JsonError(e.to_string())
	}
}

impl From<Error> for ChatpushError {
	fn from(e: Error) -> Self {
		match e {
			Error::IoError(io_err) => ChatpushError::Io(io_err),
			Error::InvalidPath(msg) => ChatpushError::ValidationError(msg),
			Error::NotFound(_) => ChatpushError::NotFound,
			other => {
				tracing::warn!(error = %other, "Store adapter error");
				ChatpushError::DbError
			}
		}
	}
}

/// Helper to convert redb errors
pub fn from_redb_error<E: fmt::Display>(err: E) -> Error {
	Error::RedbError(err.to_string())
}

// vim: ts=4

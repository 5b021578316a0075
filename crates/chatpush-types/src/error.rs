//! Error type shared by every chatpush crate

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	DbError,
	Parse,

	/// Malformed input to an operation (missing room id, empty user id, ...)
	ValidationError(String),
	/// Required configuration value is missing or invalid
	ConfigError(String),
	/// Push token could not be acquired from the platform
	TokenError(String),
	/// Operation is not available on this device (e.g. simulator)
	Unsupported(String),
	NetworkError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::debug!("serde_json error: {}", err);
		Self::Parse
	}
}

impl From<tokio::task::JoinError> for Error {
	fn from(err: tokio::task::JoinError) -> Self {
		Self::Internal(format!("task join error: {}", err))
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::ValidationError(msg) => write!(f, "invalid input: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::TokenError(msg) => write!(f, "push token error: {}", msg),
			Error::Unsupported(msg) => write!(f, "unsupported: {}", msg),
			Error::NetworkError(msg) => write!(f, "network error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

// vim: ts=4

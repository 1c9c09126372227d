//! Crate-level error types shared by the config resolver, stores, and request pipeline.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error raised by the crate itself, before a transport is involved.
#[derive(Debug, ThisError)]
pub enum Error {
	/// No usable credential was available.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Authentication failures detected before a request leaves the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum AuthError {
	/// The token getter resolved to nothing.
	#[error("No token present or has expired.")]
	NoToken,
}

/// Configuration failures, raised when options are parsed or turned into header values.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A configured or per-call header name is not a valid HTTP field name.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
		/// Underlying validation failure.
		#[source]
		source: ::http::header::InvalidHeaderName,
	},
	/// A header value contains bytes HTTP does not allow.
	#[error("Header `{name}` carries an invalid value.")]
	InvalidHeaderValue {
		/// Header whose value failed validation.
		name: String,
		/// Underlying validation failure.
		#[source]
		source: ::http::header::InvalidHeaderValue,
	},
	/// Global headers must be single-entry objects.
	#[error("Global header entries must hold exactly one name/value pair, found {entries}.")]
	GlobalHeaderShape {
		/// Number of pairs found in the offending entry.
		entries: usize,
	},
	/// Options document could not be parsed.
	#[error("Auth options are malformed.")]
	Parse {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Transport-level failures reported by the built-in transports.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request url could not be turned into an absolute URL.
	#[error("Request url `{url}` cannot be resolved.")]
	InvalidUrl {
		/// Url as supplied by the caller.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Error returned by [`AuthHttp`](crate::client::AuthHttp) request methods.
///
/// Failures raised by the crate itself land in [`RequestError::Pipeline`]; whatever the
/// transport reports is carried untouched in [`RequestError::Transport`].
#[derive(Debug, ThisError)]
pub enum RequestError<E> {
	/// The request never reached the transport.
	#[error(transparent)]
	Pipeline(#[from] Error),
	/// The transport failed; the error is passed through verbatim.
	#[error(transparent)]
	Transport(E),
}
impl<E> RequestError<E> {
	/// Returns `true` when the request was rejected because no token was available.
	pub fn is_no_token(&self) -> bool {
		matches!(self, Self::Pipeline(Error::Auth(AuthError::NoToken)))
	}

	/// Borrows the transport error, if this is one.
	pub fn transport(&self) -> Option<&E> {
		match self {
			Self::Transport(e) => Some(e),
			Self::Pipeline(_) => None,
		}
	}

	/// Consumes `self` and returns the transport error, if this is one.
	pub fn into_transport(self) -> Option<E> {
		match self {
			Self::Transport(e) => Some(e),
			Self::Pipeline(_) => None,
		}
	}
}

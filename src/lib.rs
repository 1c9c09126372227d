//! Bearer-token request decorator for HTTP clients: reads a token from a key-value store,
//! stamps it onto every outgoing request, and hands the request to whatever transport you bring.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use parking_lot::Mutex;
	// self
	use crate::{
		client::AuthHttp,
		config::{AuthConfig, AuthConfigOptions},
		http::{HttpTransport, OutgoingRequest, TransportFuture},
		store::{KeyValueStore, MemoryStore},
	};

	/// Failure reported by [`RecordingTransport`] when it is told to fail.
	#[derive(Debug, ThisError)]
	#[error("Recording transport refused the request: {0}.")]
	pub struct RecordingTransportError(pub String);

	/// In-process transport that records every request it receives and answers with the
	/// request's own header map.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingTransport {
		requests: Arc<Mutex<Vec<OutgoingRequest>>>,
		failure: Option<String>,
	}
	impl RecordingTransport {
		/// Builds a transport that fails every call with the provided message.
		pub fn failing(message: impl Into<String>) -> Self {
			Self { requests: Default::default(), failure: Some(message.into()) }
		}

		/// Number of requests that reached the transport.
		pub fn call_count(&self) -> usize {
			self.requests.lock().len()
		}

		/// Snapshot of every request seen so far, oldest first.
		pub fn requests(&self) -> Vec<OutgoingRequest> {
			self.requests.lock().clone()
		}

		/// The most recent request, if any.
		pub fn last_request(&self) -> Option<OutgoingRequest> {
			self.requests.lock().last().cloned()
		}
	}
	impl HttpTransport for RecordingTransport {
		type Error = RecordingTransportError;
		type Response = HeaderMap;

		fn send(&self, request: OutgoingRequest) -> TransportFuture<'_, HeaderMap, Self::Error> {
			Box::pin(async move {
				let headers = request.headers.clone();

				self.requests.lock().push(request);

				match &self.failure {
					Some(message) => Err(RecordingTransportError(message.clone())),
					None => Ok(headers),
				}
			})
		}
	}

	/// Builds an [`AuthHttp`] over a fresh [`MemoryStore`] and [`RecordingTransport`], returning
	/// all three so tests can seed the store and inspect outgoing traffic.
	pub fn build_recording_client(
		options: AuthConfigOptions,
	) -> (AuthHttp<RecordingTransport>, Arc<MemoryStore>, Arc<RecordingTransport>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn KeyValueStore> = store_backend.clone();
		let transport = Arc::new(RecordingTransport::default());
		let client = AuthHttp::new(AuthConfig::resolve(options, store), Arc::clone(&transport));

		(client, store_backend, transport)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method};
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

//! Transport primitives for authenticated requests.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. The pipeline hands each
//! transport a fully assembled [`OutgoingRequest`] and returns whatever the transport produces,
//! success or failure, without inspecting it. [`ReqwestTransport`] is the built-in
//! implementation behind the `reqwest` feature.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::TransportError;

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a, R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute an [`OutgoingRequest`].
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many cloned
/// clients, and the futures they return must be `Send` so requests can hop executors.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Response produced by the transport.
	type Response: Send;
	/// Concrete error emitted by the transport.
	type Error: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves to the transport's own outcome.
	fn send(&self, request: OutgoingRequest) -> TransportFuture<'_, Self::Response, Self::Error>;
}

/// Request handed to a transport once authentication headers are in place.
#[derive(Clone, Debug)]
pub struct OutgoingRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL, or a path the transport resolves against its base.
	pub url: String,
	/// Header map sent with the request.
	pub headers: HeaderMap,
	/// Raw request body; empty for body-less methods.
	pub body: Vec<u8>,
}
impl OutgoingRequest {
	/// Creates a request with no headers and an empty body.
	pub fn new(method: Method, url: impl Into<String>) -> Self {
		Self { method, url: url.into(), headers: HeaderMap::new(), body: Vec::new() }
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();

		self
	}

	/// Replaces the header map.
	pub fn with_headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;

		self
	}

	/// Applies `options` on top of the current headers.
	pub fn with_options(mut self, options: &RequestOptions) -> Self {
		options.apply(&mut self.headers);

		self
	}
}

/// Per-call or client-wide request options.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// Headers to set on the request.
	pub headers: HeaderMap,
}
impl RequestOptions {
	/// Creates options carrying `headers`.
	pub fn with_headers(headers: HeaderMap) -> Self {
		Self { headers }
	}

	/// Adds one header, replacing any previous value under the same name.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Returns `self` overlaid with `other`; headers in `other` win on a name collision.
	pub fn merge(mut self, other: &RequestOptions) -> Self {
		other.apply(&mut self.headers);

		self
	}

	fn apply(&self, target: &mut HeaderMap) {
		for name in self.headers.keys() {
			target.remove(name);

			for value in self.headers.get_all(name) {
				target.append(name.clone(), value.clone());
			}
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] with an optional base URL for relative paths.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	base_url: Option<Url>,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, base_url: None }
	}

	/// Resolves relative request urls against `base_url`.
	pub fn with_base_url(mut self, base_url: Url) -> Self {
		self.base_url = Some(base_url);

		self
	}

	/// Resolves `url` against the configured base, if any.
	pub fn resolve_url(&self, url: &str) -> Result<Url, TransportError> {
		let resolved = match &self.base_url {
			Some(base) => base.join(url),
			None => Url::parse(url),
		};

		resolved.map_err(|source| TransportError::InvalidUrl { url: url.to_owned(), source })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	type Error = TransportError;
	type Response = reqwest::Response;

	fn send(&self, request: OutgoingRequest) -> TransportFuture<'_, Self::Response, Self::Error> {
		Box::pin(async move {
			let url = self.resolve_url(&request.url)?;
			let response = self
				.client
				.request(request.method, url)
				.headers(request.headers)
				.body(request.body)
				.send()
				.await?;

			Ok(response)
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn options_merge_overrides_by_name() {
		let defaults = RequestOptions::default()
			.header(HeaderName::from_static("x-a"), HeaderValue::from_static("default"))
			.header(HeaderName::from_static("x-b"), HeaderValue::from_static("kept"));
		let per_call = RequestOptions::default()
			.header(HeaderName::from_static("x-a"), HeaderValue::from_static("call"));
		let merged = defaults.merge(&per_call);

		assert_eq!(merged.headers["x-a"], "call");
		assert_eq!(merged.headers["x-b"], "kept");
		assert_eq!(merged.headers.len(), 2);
	}

	#[test]
	fn with_options_keeps_multi_value_headers() {
		let mut headers = HeaderMap::new();

		headers.append("accept", HeaderValue::from_static("text/plain"));
		headers.append("accept", HeaderValue::from_static("application/json"));

		let request = OutgoingRequest::new(Method::GET, "/x")
			.with_headers(HeaderMap::from_iter([(
				HeaderName::from_static("accept"),
				HeaderValue::from_static("*/*"),
			)]))
			.with_options(&RequestOptions::with_headers(headers));
		let accept: Vec<_> = request.headers.get_all("accept").iter().collect();

		assert_eq!(accept, ["text/plain", "application/json"]);
		assert!(request.body.is_empty());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_transport_resolves_relative_urls() {
		let transport = ReqwestTransport::default();
		let err = transport.resolve_url("/x").expect_err("Relative url without base must fail.");

		assert!(matches!(err, TransportError::InvalidUrl { ref url, .. } if url == "/x"));

		let transport = transport
			.with_base_url(Url::parse("https://api.example.com/v1/").expect("Base url parses."));

		assert_eq!(
			transport.resolve_url("users").expect("Relative url should resolve.").as_str(),
			"https://api.example.com/v1/users"
		);
		assert_eq!(
			transport
				.resolve_url("https://other.example.com/y")
				.expect("Absolute url should pass through.")
				.as_str(),
			"https://other.example.com/y"
		);
	}
}

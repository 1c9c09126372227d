//! Authenticated request pipeline.
//!
//! [`AuthHttp`] wraps an [`HttpTransport`] and runs every request through the same sequence:
//! resolve the token, reject the request if there is none, build a fresh header map
//! (caller headers, then global headers, then the auth header), and hand the result to the
//! transport. The transport's outcome is returned untouched.

mod methods;

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, expiry},
	config::{self, AuthConfig},
	error::{AuthError, RequestError},
	http::{HttpTransport, OutgoingRequest, RequestOptions},
	obs::{self, RequestOutcome, RequestSpan},
	store::StoreError,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestAuthHttp = AuthHttp<ReqwestTransport>;

/// Result type returned by [`AuthHttp`] request methods.
pub type RequestResult<T> =
	Result<<T as HttpTransport>::Response, RequestError<<T as HttpTransport>::Error>>;

/// HTTP client decorator that attaches the configured credential to every request.
///
/// The client holds no mutable state; clones share the configuration and transport, and
/// concurrent requests are independent of each other.
pub struct AuthHttp<T>
where
	T: ?Sized + HttpTransport,
{
	config: Arc<AuthConfig>,
	transport: Arc<T>,
	default_options: Option<RequestOptions>,
}
impl<T> AuthHttp<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that sends through `transport`.
	pub fn new(config: impl Into<Arc<AuthConfig>>, transport: impl Into<Arc<T>>) -> Self {
		Self { config: config.into(), transport: transport.into(), default_options: None }
	}

	/// Sets options applied beneath the per-call options of every convenience method.
	pub fn with_default_options(mut self, options: RequestOptions) -> Self {
		self.default_options = Some(options);

		self
	}

	/// Effective configuration.
	pub fn config(&self) -> &AuthConfig {
		&self.config
	}

	/// Underlying transport.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Resolves the current token through the configured getter.
	pub async fn token(&self) -> Result<Option<TokenSecret>, StoreError> {
		Ok(self.config.token_getter().call().await?.map(TokenSecret::from))
	}

	/// Resolves the current expiry timestamp through the configured getter.
	pub async fn expiry(&self) -> Result<Option<i64>, StoreError> {
		self.config.expiry_getter().call().await
	}

	/// Returns `true` if the expiry from the configured getter is not later than now plus
	/// `offset`; an absent expiry reports `false`.
	pub async fn is_token_expired(&self, offset: Duration) -> Result<bool, StoreError> {
		let now = OffsetDateTime::now_utc();

		Ok(self.expiry().await?.is_some_and(|ms| expiry::expired_at(ms, offset, now)))
	}

	/// Sends `request` with the auth header attached.
	///
	/// Fails with [`AuthError::NoToken`] before contacting the transport when the token getter
	/// resolves to nothing. Transport failures are returned as
	/// [`RequestError::Transport`] without modification.
	pub async fn request(&self, request: OutgoingRequest) -> RequestResult<T> {
		let method = request.method.clone();
		let span = RequestSpan::new(&method, "request");

		obs::record_request_outcome(&method, RequestOutcome::Attempt);

		let result: RequestResult<T> = span
			.instrument(async move {
				let token = self.token().await.map_err(Error::from)?;
				let Some(token) = token else {
					return Err(Error::from(AuthError::NoToken).into());
				};
				let request = self.authorize(request, &token)?;

				self.transport.send(request).await.map_err(RequestError::Transport)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(&method, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(&method, RequestOutcome::Failure),
		}

		result
	}

	/// Sends a `GET` to `url` with `options`; the string form of [`request`](Self::request).
	pub async fn request_url(
		&self,
		url: &str,
		options: Option<RequestOptions>,
	) -> RequestResult<T> {
		self.get(url, options).await
	}

	/// Builds the outgoing copy of `request`: caller headers, global headers in order, then the
	/// auth header, which always wins.
	fn authorize(
		&self,
		mut request: OutgoingRequest,
		token: &TokenSecret,
	) -> Result<OutgoingRequest> {
		config::apply_global_headers(self.config.global_headers(), &mut request.headers)?;

		let (name, value) = self.config.auth_header(token.expose())?;

		request.headers.insert(name, value);

		Ok(request)
	}

	/// Builds a request for a convenience method, layering client defaults beneath `options`.
	fn build_request(
		&self,
		method: Method,
		url: &str,
		body: Vec<u8>,
		options: Option<RequestOptions>,
	) -> OutgoingRequest {
		let mut request = OutgoingRequest::new(method, url).with_body(body);

		if let Some(defaults) = &self.default_options {
			request = request.with_options(defaults);
		}
		if let Some(options) = &options {
			request = request.with_options(options);
		}

		request
	}
}
#[cfg(feature = "reqwest")]
impl AuthHttp<ReqwestTransport> {
	/// Creates a client backed by a default reqwest transport resolving relative urls against
	/// `base_url`.
	pub fn with_base_url(config: impl Into<Arc<AuthConfig>>, base_url: Url) -> Self {
		Self::new(config, ReqwestTransport::default().with_base_url(base_url))
	}
}
impl<T> Clone for AuthHttp<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			config: Arc::clone(&self.config),
			transport: Arc::clone(&self.transport),
			default_options: self.default_options.clone(),
		}
	}
}
impl<T> Debug for AuthHttp<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthHttp")
			.field("config", &self.config)
			.field("default_options", &self.default_options)
			.finish_non_exhaustive()
	}
}

//! Authentication configuration: documented defaults, caller overrides, and the resolver that
//! merges them into an immutable [`AuthConfig`].
//!
//! Resolution never fails. Header names and values stay as plain strings here and are
//! validated when a request is assembled, so a bad header surfaces as
//! [`ConfigError`] on the request that uses it.

pub mod getter;

pub use getter::*;

// self
use crate::{_prelude::*, error::ConfigError, store::KeyValueStore};

/// Store key holding the token by default.
pub const DEFAULT_TOKEN_NAME: &str = "access_token";
/// Store key holding the expiry timestamp by default.
pub const DEFAULT_EXPIRY_NAME: &str = "expires_in";
/// Header carrying the credential by default.
pub const DEFAULT_HEADER_NAME: &str = "Authorization";
/// Scheme prefix applied unless the caller opts out.
pub const HEADER_PREFIX_BEARER: &str = "Bearer ";

/// One header applied to every outgoing request.
///
/// In JSON a global header is a single-entry object, e.g. `{"x-client": "web"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct GlobalHeader {
	/// Header field name.
	pub name: String,
	/// Header field value.
	pub value: String,
}
impl GlobalHeader {
	/// Creates a header pair.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self { name: name.into(), value: value.into() }
	}
}
impl TryFrom<BTreeMap<String, String>> for GlobalHeader {
	type Error = ConfigError;

	fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
		let entries = map.len();
		let mut pairs = map.into_iter();

		match (pairs.next(), pairs.next()) {
			(Some((name, value)), None) => Ok(Self { name, value }),
			_ => Err(ConfigError::GlobalHeaderShape { entries }),
		}
	}
}
impl From<GlobalHeader> for BTreeMap<String, String> {
	fn from(header: GlobalHeader) -> Self {
		BTreeMap::from([(header.name, header.value)])
	}
}
impl<N, V> From<(N, V)> for GlobalHeader
where
	N: Into<String>,
	V: Into<String>,
{
	fn from((name, value): (N, V)) -> Self {
		Self::new(name, value)
	}
}

/// Applies `headers` to `target` in order; later entries overwrite earlier ones on a name
/// collision.
pub fn apply_global_headers(
	headers: &[GlobalHeader],
	target: &mut HeaderMap,
) -> Result<(), ConfigError> {
	for header in headers {
		target.insert(header_name(&header.name)?, header_value(&header.name, &header.value)?);
	}

	Ok(())
}

pub(crate) fn header_name(name: &str) -> Result<HeaderName, ConfigError> {
	HeaderName::from_bytes(name.as_bytes())
		.map_err(|source| ConfigError::InvalidHeaderName { name: name.to_owned(), source })
}

pub(crate) fn header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
	HeaderValue::from_str(value)
		.map_err(|source| ConfigError::InvalidHeaderValue { name: name.to_owned(), source })
}

/// Caller-supplied overrides; every unset field falls back to its default.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfigOptions {
	/// Header used to carry the credential.
	pub header_name: Option<String>,
	/// Scheme prefix; a single trailing space is added during resolution.
	pub header_prefix: Option<String>,
	/// Store key for the token.
	pub token_name: Option<String>,
	/// Store key for the expiry timestamp.
	pub expiry_name: Option<String>,
	/// Custom token source.
	#[serde(skip)]
	pub token_getter: Option<Getter<String>>,
	/// Custom expiry source.
	#[serde(skip)]
	pub expiry_getter: Option<Getter<i64>>,
	/// Headers applied to every request.
	pub global_headers: Option<Vec<GlobalHeader>>,
	/// Drops the default `Bearer ` prefix when no explicit prefix is set.
	pub no_token_scheme: Option<bool>,
}
impl AuthConfigOptions {
	/// Parses options from a JSON document, reporting the path of the offending field.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(json);

		serde_path_to_error::deserialize(&mut de).map_err(|source| ConfigError::Parse { source })
	}

	/// Sets the header name.
	pub fn header_name(mut self, name: impl Into<String>) -> Self {
		self.header_name = Some(name.into());

		self
	}

	/// Sets the header prefix.
	pub fn header_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.header_prefix = Some(prefix.into());

		self
	}

	/// Sets the store key for the token.
	pub fn token_name(mut self, name: impl Into<String>) -> Self {
		self.token_name = Some(name.into());

		self
	}

	/// Sets the store key for the expiry timestamp.
	pub fn expiry_name(mut self, name: impl Into<String>) -> Self {
		self.expiry_name = Some(name.into());

		self
	}

	/// Replaces the token source.
	pub fn token_getter(mut self, getter: Getter<String>) -> Self {
		self.token_getter = Some(getter);

		self
	}

	/// Replaces the expiry source.
	pub fn expiry_getter(mut self, getter: Getter<i64>) -> Self {
		self.expiry_getter = Some(getter);

		self
	}

	/// Replaces the global headers.
	pub fn global_headers<I, H>(mut self, headers: I) -> Self
	where
		I: IntoIterator<Item = H>,
		H: Into<GlobalHeader>,
	{
		self.global_headers = Some(headers.into_iter().map(Into::into).collect());

		self
	}

	/// Toggles the schemeless mode.
	pub fn no_token_scheme(mut self, enabled: bool) -> Self {
		self.no_token_scheme = Some(enabled);

		self
	}
}

/// Effective, immutable authentication configuration.
///
/// Build one at startup and share it; callers needing different behavior resolve a new one.
#[derive(Clone)]
pub struct AuthConfig {
	header_name: String,
	header_prefix: String,
	token_name: String,
	expiry_name: String,
	token_getter: Getter<String>,
	expiry_getter: Getter<i64>,
	global_headers: Vec<GlobalHeader>,
	no_token_scheme: bool,
}
impl AuthConfig {
	/// Resolves a configuration from defaults alone.
	pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
		Self::resolve(AuthConfigOptions::default(), store)
	}

	/// Merges `options` over the defaults.
	///
	/// When a custom store key is given without a matching getter, the synthesized getter reads
	/// that key from `store`.
	pub fn resolve(options: AuthConfigOptions, store: Arc<dyn KeyValueStore>) -> Self {
		let no_token_scheme = options.no_token_scheme.unwrap_or(false);
		let header_prefix = normalize_prefix(options.header_prefix.as_deref(), no_token_scheme);
		let token_name = options.token_name.unwrap_or_else(|| DEFAULT_TOKEN_NAME.into());
		let expiry_name = options.expiry_name.unwrap_or_else(|| DEFAULT_EXPIRY_NAME.into());
		let token_getter = options
			.token_getter
			.unwrap_or_else(|| Getter::from_store(Arc::clone(&store), token_name.clone()));
		let expiry_getter = options
			.expiry_getter
			.unwrap_or_else(|| Getter::expiry_from_store(store, expiry_name.clone()));

		Self {
			header_name: options.header_name.unwrap_or_else(|| DEFAULT_HEADER_NAME.into()),
			header_prefix,
			token_name,
			expiry_name,
			token_getter,
			expiry_getter,
			global_headers: options.global_headers.unwrap_or_default(),
			no_token_scheme,
		}
	}

	/// Header used to carry the credential.
	pub fn header_name(&self) -> &str {
		&self.header_name
	}

	/// Scheme prefix; either empty or ending with exactly one space.
	pub fn header_prefix(&self) -> &str {
		&self.header_prefix
	}

	/// Store key for the token.
	pub fn token_name(&self) -> &str {
		&self.token_name
	}

	/// Store key for the expiry timestamp.
	pub fn expiry_name(&self) -> &str {
		&self.expiry_name
	}

	/// Token source, called once per request.
	pub fn token_getter(&self) -> &Getter<String> {
		&self.token_getter
	}

	/// Expiry source.
	pub fn expiry_getter(&self) -> &Getter<i64> {
		&self.expiry_getter
	}

	/// Headers applied to every request, in order.
	pub fn global_headers(&self) -> &[GlobalHeader] {
		&self.global_headers
	}

	/// Whether the default scheme prefix is suppressed.
	pub fn no_token_scheme(&self) -> bool {
		self.no_token_scheme
	}

	/// Builds the auth header for `token`, flagged sensitive so it stays out of debug output.
	pub fn auth_header(&self, token: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
		let name = header_name(&self.header_name)?;
		let raw = format!("{}{token}", self.header_prefix);
		let mut value = header_value(&self.header_name, &raw)?;

		value.set_sensitive(true);

		Ok((name, value))
	}
}
impl Debug for AuthConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthConfig")
			.field("header_name", &self.header_name)
			.field("header_prefix", &self.header_prefix)
			.field("token_name", &self.token_name)
			.field("expiry_name", &self.expiry_name)
			.field("global_headers", &self.global_headers)
			.field("no_token_scheme", &self.no_token_scheme)
			.finish_non_exhaustive()
	}
}

fn normalize_prefix(prefix: Option<&str>, no_token_scheme: bool) -> String {
	match prefix.map(str::trim_end).filter(|p| !p.is_empty()) {
		Some(prefix) => format!("{prefix} "),
		None if no_token_scheme => String::new(),
		None => HEADER_PREFIX_BEARER.into(),
	}
}

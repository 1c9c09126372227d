//! Expiry checks over the stored expiry timestamp.
//!
//! Expiry values are millisecond Unix timestamps stored as strings; values that are not numbers
//! count as expired. A missing value is treated as "not known to be expired", which is not the
//! same as "holds a fresh token"; pair [`AuthHelper::is_token_expired`] with a presence check
//! (as [`token_not_expired`] does) before trusting a credential.

// self
use crate::{
	_prelude::*,
	config::{AuthConfig, DEFAULT_EXPIRY_NAME, DEFAULT_TOKEN_NAME, stored_expiry},
	store::KeyValueStore,
};

/// Reads the stored expiry and compares it with the clock.
#[derive(Clone)]
pub struct AuthHelper {
	store: Arc<dyn KeyValueStore>,
	expiry_name: String,
}
impl AuthHelper {
	/// Creates a helper reading the default expiry key.
	pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
		Self { store, expiry_name: DEFAULT_EXPIRY_NAME.into() }
	}

	/// Creates a helper reading the expiry key configured in `config`.
	pub fn from_config(config: &AuthConfig, store: Arc<dyn KeyValueStore>) -> Self {
		Self::new(store).with_expiry_name(config.expiry_name())
	}

	/// Reads the expiry from `name` instead of the default key.
	pub fn with_expiry_name(mut self, name: impl Into<String>) -> Self {
		self.expiry_name = name.into();

		self
	}

	/// Store key consulted for the expiry.
	pub fn expiry_name(&self) -> &str {
		&self.expiry_name
	}

	/// Returns `true` if the stored expiry is not later than now plus `offset`.
	///
	/// Absent values report `false`; values that are not numbers report `true`.
	pub fn is_token_expired(&self, offset: Duration) -> Result<bool> {
		self.is_token_expired_at(offset, OffsetDateTime::now_utc())
	}

	/// Same as [`is_token_expired`](Self::is_token_expired) against a caller-provided instant.
	pub fn is_token_expired_at(&self, offset: Duration, now: OffsetDateTime) -> Result<bool> {
		let Some(raw) = self.store.get(&self.expiry_name)? else {
			return Ok(false);
		};

		Ok(expired_at(stored_expiry(&raw), offset, now))
	}
}
impl Debug for AuthHelper {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthHelper").field("expiry_name", &self.expiry_name).finish()
	}
}

/// Returns `true` if `expiry_ms` is not later than `now` plus `offset`.
pub(crate) fn expired_at(expiry_ms: i64, offset: Duration, now: OffsetDateTime) -> bool {
	let threshold_ms = now.unix_timestamp_nanos() / 1_000_000 + offset.whole_milliseconds();

	i128::from(expiry_ms) <= threshold_ms
}

/// Returns `true` when a token is stored under `token_name` (default `access_token`) and the
/// stored expiry has not passed.
///
/// The expiry is always read from the default expiry key, whichever token name is checked.
/// Callers keeping several tokens should use [`AuthHelper::with_expiry_name`] directly.
pub fn token_not_expired(
	store: Arc<dyn KeyValueStore>,
	token_name: Option<&str>,
) -> Result<bool> {
	let token = store.get(token_name.unwrap_or(DEFAULT_TOKEN_NAME))?;

	if token.is_none() {
		return Ok(false);
	}

	Ok(!AuthHelper::new(store).is_token_expired(Duration::ZERO)?)
}

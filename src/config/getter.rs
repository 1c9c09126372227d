//! Uniform asynchronous value sources for tokens and expiry timestamps.

// std
use std::future;
// self
use crate::{
	_prelude::*,
	store::{KeyValueStore, StoreError},
};

/// Boxed future returned by [`Getter::call`].
pub type GetterFuture<T> = Pin<Box<dyn Future<Output = Result<Option<T>, StoreError>> + Send>>;

/// Zero-argument value source.
///
/// Every getter hands back a future; synchronous sources resolve immediately, so the request
/// pipeline awaits one shape regardless of where the value comes from.
pub struct Getter<T>(Arc<dyn Fn() -> GetterFuture<T> + Send + Sync>);
impl<T> Getter<T>
where
	T: 'static + Send,
{
	/// Wraps an asynchronous source.
	pub fn new<F, Fut>(f: F) -> Self
	where
		F: 'static + Send + Sync + Fn() -> Fut,
		Fut: 'static + Send + Future<Output = Result<Option<T>, StoreError>>,
	{
		Self(Arc::new(move || -> GetterFuture<T> { Box::pin(f()) }))
	}

	/// Wraps a synchronous source in an immediately-ready future.
	pub fn ready<F>(f: F) -> Self
	where
		F: 'static + Send + Sync + Fn() -> Option<T>,
	{
		Self(Arc::new(move || -> GetterFuture<T> { Box::pin(future::ready(Ok(f()))) }))
	}

	/// Always yields a clone of `value`.
	pub fn constant(value: T) -> Self
	where
		T: Clone + Sync,
	{
		Self::ready(move || Some(value.clone()))
	}

	/// Invokes the source.
	pub fn call(&self) -> GetterFuture<T> {
		(self.0)()
	}
}
impl Getter<String> {
	/// Reads `key` from `store` on every call.
	pub fn from_store(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
		let key = key.into();

		Self(Arc::new(move || -> GetterFuture<String> {
			Box::pin(future::ready(store.get(&key)))
		}))
	}
}
impl Getter<i64> {
	/// Reads `key` from `store` on every call and parses it with [`stored_expiry`].
	pub fn expiry_from_store(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
		let key = key.into();

		Self(Arc::new(move || -> GetterFuture<i64> {
			Box::pin(future::ready(store.get(&key).map(|raw| raw.as_deref().map(stored_expiry))))
		}))
	}
}
impl<T> Clone for Getter<T> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}
impl<T> Debug for Getter<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Getter(..)")
	}
}

/// Parses a stored expiry into whole milliseconds.
///
/// Accepts integers, decimals (`"1.7e12"` included) and `Infinity` with an optional sign, which
/// saturates to the `i64` bounds. Anything else yields `None`.
pub fn parse_expiry(raw: &str) -> Option<i64> {
	let raw = raw.trim();

	if let Ok(ms) = raw.parse::<i64>() {
		return Some(ms);
	}

	let ms = raw.parse::<f64>().ok()?;

	if ms.is_finite() || raw.trim_start_matches(['+', '-']) == "Infinity" {
		Some(ms as i64)
	} else {
		None
	}
}

/// Interprets a stored expiry value.
///
/// Values [`parse_expiry`] rejects read as [`i64::MIN`], so every expiry check sees them as
/// already expired.
pub fn stored_expiry(raw: &str) -> i64 {
	parse_expiry(raw).unwrap_or(i64::MIN)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::MemoryStore;

	#[test]
	fn parse_expiry_accepts_numbers_only() {
		assert_eq!(parse_expiry("1700000000000"), Some(1_700_000_000_000));
		assert_eq!(parse_expiry(" 42 "), Some(42));
		assert_eq!(parse_expiry("1.5e3"), Some(1_500));
		assert_eq!(parse_expiry("Infinity"), Some(i64::MAX));
		assert_eq!(parse_expiry("-Infinity"), Some(i64::MIN));
		assert_eq!(parse_expiry("inf"), None);
		assert_eq!(parse_expiry("NaN"), None);
		assert_eq!(parse_expiry("tomorrow"), None);
		assert_eq!(parse_expiry(""), None);
	}

	#[tokio::test]
	async fn ready_and_async_getters_share_one_shape() {
		let sync = Getter::constant(String::from("sync-token"));
		let pending = Getter::new(|| async { Ok(Some(String::from("async-token"))) });

		assert_eq!(sync.call().await, Ok(Some("sync-token".into())));
		assert_eq!(pending.call().await, Ok(Some("async-token".into())));
	}

	#[tokio::test]
	async fn store_getters_read_fresh_values() {
		let store = Arc::new(MemoryStore::default());
		let token = Getter::from_store(store.clone(), "access_token");
		let expiry = Getter::expiry_from_store(store.clone(), "expires_in");

		assert_eq!(token.call().await, Ok(None));
		assert_eq!(expiry.call().await, Ok(None));

		store.set("access_token", "first").expect("Memory store writes should succeed.");
		store.set("expires_in", "1234").expect("Memory store writes should succeed.");

		assert_eq!(token.call().await, Ok(Some("first".into())));
		assert_eq!(expiry.call().await, Ok(Some(1234)));

		store.set("access_token", "second").expect("Memory store writes should succeed.");
		store.set("expires_in", "soon").expect("Memory store writes should succeed.");

		assert_eq!(token.call().await, Ok(Some("second".into())));
		assert_eq!(expiry.call().await, Ok(Some(i64::MIN)));
	}
}

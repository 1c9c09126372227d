//! Thread-safe in-memory [`KeyValueStore`] for tests, demos, and short-lived processes.

// self
use crate::{
	_prelude::*,
	store::{KeyValueStore, StoreError},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Process-local store; clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Builds a store pre-populated with the provided pairs.
	pub fn with_entries<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self(Arc::new(RwLock::new(map)))
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.0.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
		self.0.write().insert(key.to_owned(), value.to_owned());

		Ok(())
	}

	fn remove(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.0.write().remove(key))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn clones_share_state() {
		let store = MemoryStore::default();
		let clone = store.clone();

		store.set("access_token", "token-1").expect("Memory store writes should succeed.");

		assert_eq!(
			clone.get("access_token").expect("Memory store reads should succeed."),
			Some("token-1".into())
		);
		assert_eq!(clone.len(), 1);
	}

	#[test]
	fn set_overwrites_and_remove_returns_previous() {
		let store = MemoryStore::with_entries([("expires_in", "1000")]);

		store.set("expires_in", "2000").expect("Memory store writes should succeed.");

		assert_eq!(
			store.remove("expires_in").expect("Memory store removals should succeed."),
			Some("2000".into())
		);
		assert!(store.is_empty());
		assert_eq!(store.remove("expires_in").expect("Removing twice should succeed."), None);
	}
}

// std
use std::{env, fs, path::PathBuf, process, sync::Arc};
// crates.io
use parking_lot::Mutex;
// self
use auth_http::{
	client::AuthHttp,
	config::AuthConfig,
	error::TransportError,
	http::{HttpTransport, OutgoingRequest, TransportFuture},
	http_types::header::AUTHORIZATION,
	store::{FileStore, KeyValueStore},
};

#[derive(Default)]
struct CapturingTransport(Mutex<Vec<OutgoingRequest>>);
impl HttpTransport for CapturingTransport {
	type Error = TransportError;
	type Response = ();

	fn send(&self, request: OutgoingRequest) -> TransportFuture<'_, (), TransportError> {
		self.0.lock().push(request);

		Box::pin(async { Ok(()) })
	}
}

fn temp_path() -> PathBuf {
	env::temp_dir().join(format!("auth_http_file_store_it_{}.json", process::id()))
}

#[tokio::test]
async fn token_written_by_one_process_is_used_by_the_next() {
	let path = temp_path();

	{
		let writer = FileStore::open(&path).expect("Failed to open file store for writing.");

		writer.set("access_token", "from-disk").expect("Failed to persist token.");
	}

	let store = Arc::new(FileStore::open(&path).expect("Failed to reopen file store."));
	let transport = Arc::new(CapturingTransport::default());
	let client: AuthHttp<CapturingTransport> =
		AuthHttp::new(AuthConfig::new(store.clone()), Arc::clone(&transport));

	client.get("/profile", None).await.expect("Request should reach the transport.");

	let sent = transport.0.lock().clone();

	assert_eq!(sent.len(), 1);
	assert_eq!(sent[0].headers[AUTHORIZATION], "Bearer from-disk");

	fs::remove_file(store.path()).unwrap_or_else(|e| {
		panic!("Failed to remove temporary file store {}: {e}", path.display())
	});
}

//! Demonstrates plugging a custom transport into [`AuthHttp`].
//!
//! 1. Implement [`HttpTransport`] for your HTTP stack (here: a stub that prints the request).
//! 2. Store a token under the configured key, or provide an async [`Getter`].
//! 3. Build an [`AuthConfig`] and wrap the transport with [`AuthHttp::new`].
//! 4. Call the verb helpers; the auth header is attached on every call.

// std
use std::{convert::Infallible, sync::Arc};
// crates.io
use color_eyre::Result;
// self
use auth_http::{
	client::AuthHttp,
	config::{AuthConfig, AuthConfigOptions, Getter},
	http::{HttpTransport, OutgoingRequest, TransportFuture},
	store::{KeyValueStore, MemoryStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let store = Arc::new(MemoryStore::default());
	let config = AuthConfig::resolve(
		AuthConfigOptions::default().global_headers([("x-client", "demo")]),
		store.clone(),
	);
	let client: AuthHttp<PrintingTransport> = AuthHttp::new(config, PrintingTransport);

	match client.get("/me", None).await {
		Err(e) if e.is_no_token() => println!("Rejected before sending: {e}"),
		other => println!("Unexpected outcome: {other:?}"),
	}

	store.set("access_token", "demo-token")?;

	let status = client.post("/notes", "{\"text\":\"hello\"}", None).await?;

	println!("Transport answered with status {status}.");

	let vault = AuthConfigOptions::default()
		.header_name("X-Api-Key")
		.no_token_scheme(true)
		.token_getter(Getter::new(|| async { Ok(Some(String::from("vault-issued-key"))) }));
	let client: AuthHttp<PrintingTransport> =
		AuthHttp::new(AuthConfig::resolve(vault, store), PrintingTransport);

	client.delete("/notes/1", None).await?;

	Ok(())
}

struct PrintingTransport;
impl HttpTransport for PrintingTransport {
	type Error = Infallible;
	type Response = u16;

	fn send(&self, request: OutgoingRequest) -> TransportFuture<'_, u16, Infallible> {
		Box::pin(async move {
			println!("{} {}", request.method, request.url);

			for (name, value) in &request.headers {
				let shown = if value.is_sensitive() {
					"<redacted>"
				} else {
					value.to_str().unwrap_or("<binary>")
				};

				println!("  {name}: {shown}");
			}

			Ok(200)
		})
	}
}

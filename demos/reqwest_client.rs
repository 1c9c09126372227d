//! Sends an authenticated request through the built-in reqwest transport.
//!
//! Run with `AUTH_HTTP_TOKEN=<token> cargo run --example reqwest_client`; the token is written
//! to a file store so later runs pick it up without the variable.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::{Result, eyre::eyre};
use time::Duration;
// self
use auth_http::{
	auth::{AuthHelper, token_not_expired},
	client::{AuthHttp, ReqwestAuthHttp},
	config::{AuthConfig, AuthConfigOptions},
	store::{FileStore, KeyValueStore},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let store = Arc::new(FileStore::open(env::temp_dir().join("auth_http_demo/store.json"))?);

	if let Ok(token) = env::var("AUTH_HTTP_TOKEN") {
		store.set("access_token", &token)?;
	}
	if !token_not_expired(store.clone(), None)? {
		return Err(eyre!("No usable token; set AUTH_HTTP_TOKEN."));
	}

	let helper = AuthHelper::new(store.clone());

	if helper.is_token_expired(Duration::minutes(5))? {
		println!("Token expires within five minutes.");
	}

	let options = AuthConfigOptions::from_json_str(
		r#"{ "global_headers": [{ "accept": "application/json" }] }"#,
	)?;
	let base_url = Url::parse("https://httpbin.org/")?;
	let client: ReqwestAuthHttp =
		AuthHttp::with_base_url(AuthConfig::resolve(options, store), base_url);
	let response = client.get("bearer", None).await?;

	println!("{}: {}", response.status(), response.text().await?);

	Ok(())
}

// std
use std::sync::Arc;
// self
use auth_http::{
	config::{AuthConfig, AuthConfigOptions, GlobalHeader, Getter},
	error::ConfigError,
	store::{KeyValueStore, MemoryStore},
};

fn store() -> Arc<MemoryStore> {
	Arc::new(MemoryStore::default())
}

#[tokio::test]
async fn defaults_match_documented_values() {
	let store = store();
	let config = AuthConfig::new(store.clone());

	assert_eq!(config.header_name(), "Authorization");
	assert_eq!(config.header_prefix(), "Bearer ");
	assert_eq!(config.token_name(), "access_token");
	assert_eq!(config.expiry_name(), "expires_in");
	assert!(!config.no_token_scheme());
	assert!(config.global_headers().is_empty());

	store.set("access_token", "Token").expect("Memory store writes should succeed.");

	assert_eq!(config.token_getter().call().await, Ok(Some("Token".into())));
}

#[tokio::test]
async fn explicit_overrides_win_and_prefix_gets_one_space() {
	let options = AuthConfigOptions::default()
		.header_name("Foo")
		.header_prefix("Bar")
		.token_name("token")
		.token_getter(Getter::constant(String::from("this is a token")))
		.global_headers([("header", "value"), ("header2", "value2")])
		.no_token_scheme(true);
	let config = AuthConfig::resolve(options, store());

	assert_eq!(config.header_name(), "Foo");
	assert_eq!(config.header_prefix(), "Bar ");
	assert_eq!(config.token_name(), "token");
	assert!(config.no_token_scheme());
	assert_eq!(
		config.global_headers(),
		[GlobalHeader::new("header", "value"), GlobalHeader::new("header2", "value2")]
	);
	assert_eq!(config.token_getter().call().await, Ok(Some("this is a token".into())));
}

#[test]
fn no_token_scheme_empties_the_prefix() {
	let config = AuthConfig::resolve(AuthConfigOptions::default().no_token_scheme(true), store());

	assert_eq!(config.header_prefix(), "");

	let config = AuthConfig::resolve(
		AuthConfigOptions::default().header_prefix("Token   ").no_token_scheme(true),
		store(),
	);

	assert_eq!(config.header_prefix(), "Token ");
}

#[tokio::test]
async fn custom_token_name_drives_the_default_getter() {
	let store = store();
	let config =
		AuthConfig::resolve(AuthConfigOptions::default().token_name("custom"), store.clone());

	store.set("custom", "T1").expect("Memory store writes should succeed.");
	store.set("access_token", "ignored").expect("Memory store writes should succeed.");

	assert_eq!(config.token_getter().call().await, Ok(Some("T1".into())));
}

#[tokio::test]
async fn custom_expiry_name_drives_the_default_getter() {
	let store = store();
	let config =
		AuthConfig::resolve(AuthConfigOptions::default().expiry_name("valid_until"), store.clone());

	store.set("valid_until", "1234").expect("Memory store writes should succeed.");

	assert_eq!(config.expiry_name(), "valid_until");
	assert_eq!(config.expiry_getter().call().await, Ok(Some(1234)));
}

#[tokio::test]
async fn options_parse_from_json() {
	let options = AuthConfigOptions::from_json_str(
		r#"{
			"header_name": "X-Auth",
			"header_prefix": "Token",
			"token_name": "jwt",
			"global_headers": [{ "x-client": "web" }, { "x-trace": "on" }]
		}"#,
	)
	.expect("Valid options document should parse.");
	let store = store();
	let config = AuthConfig::resolve(options, store.clone());

	store.set("jwt", "from-json").expect("Memory store writes should succeed.");

	assert_eq!(config.header_name(), "X-Auth");
	assert_eq!(config.header_prefix(), "Token ");
	assert_eq!(config.global_headers().len(), 2);
	assert_eq!(config.global_headers()[1], GlobalHeader::new("x-trace", "on"));
	assert_eq!(config.token_getter().call().await, Ok(Some("from-json".into())));
}

#[test]
fn json_errors_report_the_field_path() {
	let err =
		AuthConfigOptions::from_json_str(r#"{ "global_headers": [{ "a": "1", "b": "2" }] }"#)
			.expect_err("Multi-key global headers should be rejected.");
	let ConfigError::Parse { source } = err else {
		panic!("Expected a parse error, got {err:?}.");
	};

	assert_eq!(source.path().to_string(), "global_headers[0]");
	assert!(source.inner().to_string().contains("exactly one"));

	let err = AuthConfigOptions::from_json_str(r#"{ "header": "X" }"#)
		.expect_err("Unknown keys should be rejected.");

	assert!(matches!(err, ConfigError::Parse { .. }));
}

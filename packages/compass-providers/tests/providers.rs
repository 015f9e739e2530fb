use reqwest::header::AUTHORIZATION;
use serde_json::{Map, json};

#[test]
fn builds_bearer_auth_header() {
	let headers =
		compass_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");

	assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
}

#[test]
fn carries_default_headers_through() {
	let mut defaults = Map::new();

	defaults.insert("x-compass-tenant".into(), json!("campus-a"));

	let headers =
		compass_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	assert_eq!(headers.get("x-compass-tenant").unwrap(), "campus-a");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-compass-tenant".into(), json!(7));

	assert!(matches!(
		compass_providers::auth_headers("secret", &defaults),
		Err(compass_providers::Error::InvalidConfig { .. })
	));
}

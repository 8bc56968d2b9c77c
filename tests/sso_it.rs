// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use supabase_auth_client::{api::sso::SsoRequest, client::AuthClient};

const API_KEY: &str = "test-anon-key";

fn client(server: &MockServer) -> AuthClient {
	AuthClient::with_base_url(&server.base_url(), API_KEY).expect("Failed to build test client.")
}

#[tokio::test]
async fn sso_captures_the_redirect_without_following_it() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/sso")
				.json_body(json!({ "domain": "example.com", "skip_http_redirect": false }));
			then.status(303).header("Location", "https://idp.example.com/saml/authorize?id=42");
		})
		.await;
	let response = client(&server)
		.sso(SsoRequest { domain: Some("example.com".into()), ..Default::default() })
		.await
		.expect("SSO initiation should succeed.");

	mock.assert_async().await;

	assert_eq!(response.url, "https://idp.example.com/saml/authorize?id=42");
}

#[tokio::test]
async fn sso_decodes_json_when_the_redirect_is_skipped() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/sso")
				.json_body(json!({ "domain": "example.com", "skip_http_redirect": true }));
			then.status(200)
				.json_body(json!({ "url": "https://idp.example.com/saml/authorize?id=42" }));
		})
		.await;
	let response = client(&server)
		.sso(SsoRequest {
			domain: Some("example.com".into()),
			skip_http_redirect: true,
			..Default::default()
		})
		.await
		.expect("SSO initiation should succeed.");

	mock.assert_async().await;

	assert_eq!(response.url, "https://idp.example.com/saml/authorize?id=42");
}

#[tokio::test]
async fn settings_and_health_decode() {
	let server = MockServer::start_async().await;
	let settings_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/settings").header("apikey", API_KEY);
			then.status(200).json_body(json!({
				"external": { "github": true, "google": false },
				"disable_signup": false,
				"mailer_autoconfirm": true,
				"sms_provider": "twilio"
			}));
		})
		.await;
	let health_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/health");
			then.status(200).json_body(json!({
				"version": "v2.151.0",
				"name": "GoTrue",
				"description": "GoTrue is a user registration and authentication API"
			}));
		})
		.await;
	let client = client(&server);
	let settings = client.settings().await.expect("Settings fetch should succeed.");
	let health = client.health().await.expect("Health fetch should succeed.");

	settings_mock.assert_async().await;
	health_mock.assert_async().await;

	assert_eq!(settings.external.get("github"), Some(&true));
	assert!(settings.mailer_autoconfirm);
	assert_eq!(settings.sms_provider, "twilio");
	assert_eq!(health.name, "GoTrue");
}

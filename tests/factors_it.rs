// crates.io
use httpmock::prelude::*;
use serde_json::json;
use uuid::Uuid;
// self
use supabase_auth_client::{
	api::factors::{EnrollFactorRequest, VerifyFactorRequest},
	client::AuthClient,
	types::FactorType,
};

const API_KEY: &str = "test-anon-key";
const ACCESS_TOKEN: &str = "test-access-token";
const FACTOR_ID: &str = "0d3aa138-da96-4aea-8217-af07daa6b82d";
const CHALLENGE_ID: &str = "5f0b1f9d-7a86-45cf-87b2-210298a9fbf3";

fn client(server: &MockServer) -> AuthClient {
	AuthClient::with_base_url(&server.base_url(), API_KEY)
		.expect("Failed to build test client.")
		.with_token(ACCESS_TOKEN)
}

#[tokio::test]
async fn enrollment_returns_totp_provisioning_material() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/factors")
				.header("authorization", format!("Bearer {ACCESS_TOKEN}"))
				.json_body(json!({ "friendly_name": "phone-1", "factor_type": "totp" }));
			then.status(200).json_body(json!({
				"id": FACTOR_ID,
				"type": "totp",
				"totp": {
					"qr_code": "<svg/>",
					"secret": "JBSWY3DPEHPK3PXP",
					"uri": "otpauth://totp/x"
				}
			}));
		})
		.await;
	let enrolled = client(&server)
		.enroll_factor(EnrollFactorRequest {
			friendly_name: Some("phone-1".into()),
			..Default::default()
		})
		.await
		.expect("Factor enrollment should succeed.");

	mock.assert_async().await;

	assert_eq!(enrolled.id.to_string(), FACTOR_ID);
	assert_eq!(enrolled.factor_type, FactorType::Totp);
	assert_eq!(enrolled.totp.map(|totp| totp.secret), Some("JBSWY3DPEHPK3PXP".into()));
}

#[tokio::test]
async fn challenge_converts_the_unix_expiry() {
	let server = MockServer::start_async().await;
	let factor_id = FACTOR_ID.parse::<Uuid>().expect("Failed to parse test factor id.");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(format!("/factors/{FACTOR_ID}/challenge"));
			// 2024-05-01T12:00:00Z
			then.status(200).json_body(json!({ "id": CHALLENGE_ID, "expires_at": 1714564800 }));
		})
		.await;
	let challenge = client(&server)
		.challenge_factor(factor_id)
		.await
		.expect("Factor challenge should succeed.");

	mock.assert_async().await;

	assert_eq!(challenge.id.to_string(), CHALLENGE_ID);
	assert_eq!(challenge.expires_at.unix_timestamp(), 1714564800);
}

#[tokio::test]
async fn verification_upgrades_to_a_session() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(format!("/factors/{FACTOR_ID}/verify"))
				.json_body(json!({ "challenge_id": CHALLENGE_ID, "code": "123456" }));
			then.status(200).json_body(json!({
				"access_token": "mfa-at",
				"token_type": "bearer",
				"expires_in": 3600,
				"refresh_token": "mfa-rt"
			}));
		})
		.await;
	let session = client(&server)
		.verify_factor(VerifyFactorRequest {
			factor_id: FACTOR_ID.parse().expect("Failed to parse test factor id."),
			challenge_id: CHALLENGE_ID.parse().expect("Failed to parse test challenge id."),
			code: "123456".into(),
		})
		.await
		.expect("Factor verification should succeed.");

	mock.assert_async().await;

	assert_eq!(session.access_token, "mfa-at");
}

#[tokio::test]
async fn unenrollment_returns_the_removed_id() {
	let server = MockServer::start_async().await;
	let factor_id = FACTOR_ID.parse::<Uuid>().expect("Failed to parse test factor id.");
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path(format!("/factors/{FACTOR_ID}"));
			then.status(200).json_body(json!({ "id": FACTOR_ID }));
		})
		.await;
	let removed = client(&server)
		.unenroll_factor(factor_id)
		.await
		.expect("Factor unenrollment should succeed.");

	mock.assert_async().await;

	assert_eq!(removed.id, factor_id);
}

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use supabase_auth_client::{
	api::passwordless::{InviteRequest, MagiclinkRequest, OtpRequest, RecoverRequest},
	client::AuthClient,
	error::{ApiError, Error},
};

const API_KEY: &str = "test-anon-key";
const USER_ID: &str = "b54816a1-51b8-4597-8407-8ebd53a1e103";

fn client(server: &MockServer) -> AuthClient {
	AuthClient::with_base_url(&server.base_url(), API_KEY).expect("Failed to build test client.")
}

#[tokio::test]
async fn otp_always_declares_the_create_user_flag() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/otp")
				.json_body(json!({ "email": "a@b.com", "create_user": true }));
			then.status(200);
		})
		.await;

	client(&server)
		.otp(OtpRequest { email: Some("a@b.com".into()), create_user: true, ..Default::default() })
		.await
		.expect("OTP request should succeed.");
	mock.assert_async().await;
}

#[tokio::test]
async fn magiclink_posts_the_email() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/magiclink").json_body(json!({ "email": "a@b.com" }));
			then.status(200);
		})
		.await;

	client(&server)
		.magiclink(MagiclinkRequest { email: "a@b.com".into(), security: None })
		.await
		.expect("Magic link request should succeed.");
	mock.assert_async().await;
}

#[tokio::test]
async fn recover_rate_limits_classify_distinctly() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/recover");
			then.status(429).json_body(json!({
				"error_code": "over_email_send_rate_limit",
				"msg": "For security purposes, you can only request this once every 60 seconds"
			}));
		})
		.await;
	let err = client(&server)
		.recover(RecoverRequest { email: "a@b.com".into(), security: None })
		.await
		.expect_err("A rate-limited recovery must fail.");

	assert!(matches!(err, Error::Api(ApiError::OverEmailSendRateLimit)));
}

#[tokio::test]
async fn invite_returns_the_invited_user() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/invite").json_body(json!({ "email": "a@b.com" }));
			then.status(200).json_body(json!({
				"id": USER_ID,
				"email": "a@b.com",
				"invited_at": "2024-05-01T12:00:00Z"
			}));
		})
		.await;
	let user = client(&server)
		.invite(InviteRequest { email: "a@b.com".into(), data: None })
		.await
		.expect("Invite should succeed.");

	mock.assert_async().await;

	assert_eq!(user.email, "a@b.com");
	assert!(user.invited_at.is_some());
}

//! Registration (`POST /signup`).

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	api::token::MetaSecurity,
	client::AuthClient,
	http::RedirectMode,
	types::{Session, User},
};

const SIGNUP_PATH: &str = "signup";

/// Registration parameters; email or phone plus a password.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SignupRequest {
	/// Email address to register.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Phone number to register.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Password for the new account.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	/// Custom metadata stored on the new user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	/// Captcha payload, serialized as `gotrue_meta_security`.
	#[serde(rename = "gotrue_meta_security", skip_serializing_if = "Option::is_none")]
	pub security: Option<MetaSecurity>,
}

/// Registration outcome.
///
/// With autoconfirm enabled the server signs the user in immediately and
/// returns a session; otherwise it returns the unconfirmed user record and
/// sends a confirmation email.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SignupResponse {
	/// Autoconfirm was enabled; the user is signed in.
	Session(Session),
	/// Confirmation pending; only the user record came back.
	User(User),
}
impl SignupResponse {
	/// Returns the created user regardless of which shape came back.
	pub fn user(&self) -> Option<&User> {
		match self {
			SignupResponse::Session(session) => session.user.as_ref(),
			SignupResponse::User(user) => Some(user),
		}
	}
}

impl AuthClient {
	/// `POST /signup`
	///
	/// Registers a new user with an email or phone plus a password.
	pub async fn signup(&self, request: SignupRequest) -> Result<SignupResponse> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, SIGNUP_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}
}

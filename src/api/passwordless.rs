//! Passwordless delivery endpoints (`/otp`, `/magiclink`, `/recover`,
//! `/invite`).

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	api::token::MetaSecurity,
	client::AuthClient,
	http::RedirectMode,
	types::User,
};

const OTP_PATH: &str = "otp";
const MAGICLINK_PATH: &str = "magiclink";
const RECOVER_PATH: &str = "recover";
const INVITE_PATH: &str = "invite";

/// One-time-password delivery parameters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OtpRequest {
	/// Email to deliver a magic link to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Phone number to deliver an SMS code to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Signs the user up on first contact when true.
	pub create_user: bool,
	/// Custom metadata stored when a user is created.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	/// Captcha payload, serialized as `gotrue_meta_security`.
	#[serde(rename = "gotrue_meta_security", skip_serializing_if = "Option::is_none")]
	pub security: Option<MetaSecurity>,
}

/// Magic-link delivery parameters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MagiclinkRequest {
	/// Email to deliver the link to.
	pub email: String,
	/// Captcha payload, serialized as `gotrue_meta_security`.
	#[serde(rename = "gotrue_meta_security", skip_serializing_if = "Option::is_none")]
	pub security: Option<MetaSecurity>,
}

/// Password recovery parameters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RecoverRequest {
	/// Email to deliver the recovery link to.
	pub email: String,
	/// Captcha payload, serialized as `gotrue_meta_security`.
	#[serde(rename = "gotrue_meta_security", skip_serializing_if = "Option::is_none")]
	pub security: Option<MetaSecurity>,
}

/// Invite parameters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct InviteRequest {
	/// Email to invite.
	pub email: String,
	/// Custom metadata stored on the invited user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}

impl AuthClient {
	/// `POST /otp`
	///
	/// Delivers a magic link or SMS code depending on whether the request
	/// carries an email or a phone number. With `create_user` set, an unknown
	/// address is signed up on the fly.
	pub async fn otp(&self, request: OtpRequest) -> Result<()> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, OTP_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_no_content(response).await
	}

	/// `POST /magiclink`
	///
	/// Delivers a sign-in link to the given email. Deprecated server-side in
	/// favor of [`otp`](Self::otp) with `create_user` enabled; kept for older
	/// instances. Rate-limited to one delivery per minute by default.
	pub async fn magiclink(&self, request: MagiclinkRequest) -> Result<()> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, MAGICLINK_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_no_content(response).await
	}

	/// `POST /recover`
	///
	/// Delivers a password recovery email. Rate-limited to one delivery per
	/// minute by default.
	pub async fn recover(&self, request: RecoverRequest) -> Result<()> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, RECOVER_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_no_content(response).await
	}

	/// `POST /invite`
	///
	/// Invites a new user by email. Requires a service-role bearer token.
	pub async fn invite(&self, request: InviteRequest) -> Result<User> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, INVITE_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}
}

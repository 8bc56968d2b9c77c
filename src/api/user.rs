//! Authenticated user endpoints (`/user`, `/logout`, `/reauthenticate`).

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, client::AuthClient, http::RedirectMode, types::User};

const USER_PATH: &str = "user";
const LOGOUT_PATH: &str = "logout";
const REAUTHENTICATE_PATH: &str = "reauthenticate";

/// Self-service updates to the authenticated user.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateUserRequest {
	/// New email address; triggers a confirmation magic link.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// New phone number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// New password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	/// Reauthentication nonce required by secure password updates.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nonce: Option<String>,
	/// Custom metadata merged into the user's profile.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}

impl AuthClient {
	/// `GET /user`
	///
	/// Returns the user the configured bearer token belongs to.
	pub async fn get_user(&self) -> Result<User> {
		let outbound = self.build_request(Method::GET, USER_PATH, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `PUT /user`
	///
	/// Updates email, phone, password, or custom metadata of the
	/// authenticated user. Changing the email sends a magic link to the new
	/// address.
	pub async fn update_user(&self, request: UpdateUserRequest) -> Result<User> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::PUT, USER_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `POST /logout`
	///
	/// Revokes all refresh tokens of the authenticated user. Outstanding
	/// JWTs stay valid until they expire.
	pub async fn logout(&self) -> Result<()> {
		let outbound = self.build_request(Method::POST, LOGOUT_PATH, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_no_content(response).await
	}

	/// `GET /reauthenticate`
	///
	/// Sends a reauthentication nonce to the user's email (preferred) or
	/// phone. The nonce is consumed by a subsequent password update.
	pub async fn reauthenticate(&self) -> Result<()> {
		let outbound = self.build_request(Method::GET, REAUTHENTICATE_PATH, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_no_content(response).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn update_body_omits_unset_fields() {
		let request =
			UpdateUserRequest { email: Some("new@b.com".into()), ..UpdateUserRequest::default() };
		let body = serde_json::to_value(&request).expect("Failed to encode update request.");

		assert_eq!(body.get("email").and_then(|v| v.as_str()), Some("new@b.com"));
		assert!(body.get("password").is_none());
		assert!(body.get("data").is_none());
	}
}

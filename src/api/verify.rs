//! Verification flows (`GET /verify`, `POST /verify`).

// self
use crate::{
	_prelude::*,
	api::field_set,
	client::AuthClient,
	error::ValidationError,
	http::RedirectMode,
	redirect::{VerificationRedirect, parse_redirect_fragment},
	types::Session,
};

const VERIFY_PATH: &str = "verify";

/// Verification flows a token can belong to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
	/// Email confirmation after signup.
	Signup,
	/// Invite acceptance.
	Invite,
	/// Magic-link sign-in.
	Magiclink,
	/// Password recovery.
	Recovery,
	/// Email address change confirmation.
	EmailChange,
	/// SMS OTP verification.
	Sms,
	/// Phone number change confirmation.
	PhoneChange,
	/// Email OTP verification.
	Email,
}
impl VerificationType {
	/// Returns the wire identifier for the verification type.
	pub fn as_str(self) -> &'static str {
		match self {
			VerificationType::Signup => "signup",
			VerificationType::Invite => "invite",
			VerificationType::Magiclink => "magiclink",
			VerificationType::Recovery => "recovery",
			VerificationType::EmailChange => "email_change",
			VerificationType::Sms => "sms",
			VerificationType::PhoneChange => "phone_change",
			VerificationType::Email => "email",
		}
	}
}
impl Display for VerificationType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for VerificationType {
	type Err = UnknownVerificationType;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"signup" => Ok(VerificationType::Signup),
			"invite" => Ok(VerificationType::Invite),
			"magiclink" => Ok(VerificationType::Magiclink),
			"recovery" => Ok(VerificationType::Recovery),
			"email_change" => Ok(VerificationType::EmailChange),
			"sms" => Ok(VerificationType::Sms),
			"phone_change" => Ok(VerificationType::PhoneChange),
			"email" => Ok(VerificationType::Email),
			_ => Err(UnknownVerificationType),
		}
	}
}

/// Error returned when a verification type tag is not recognized.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("Unrecognized verification type.")]
pub struct UnknownVerificationType;

/// Parameters of the redirect-based GET verification.
#[derive(Clone, Debug)]
pub struct VerifyRequest {
	/// Flow the token belongs to.
	pub verification_type: VerificationType,
	/// Token issued by signup, recover, magiclink, or invite.
	pub token: String,
	/// URL the server should redirect the browser to.
	pub redirect_to: String,
}

/// Parameters of the user-scoped POST verification.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyForUserRequest {
	/// Flow the token belongs to.
	#[serde(rename = "type")]
	pub verification_type: VerificationType,
	/// Token issued by signup, recover, magiclink, or invite.
	pub token: String,
	/// URL the server should redirect the browser to.
	pub redirect_to: String,
	/// Email the token was issued for.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Phone number the token was issued for.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
}

impl AuthClient {
	/// `GET /verify`
	///
	/// Verifies a registration, recovery, magic link, or invite token. The
	/// server answers with a 303 redirect; this call does not follow it and
	/// instead returns the redirect target with its fragment parsed.
	///
	/// An `Ok` return only means the exchange succeeded at the HTTP layer.
	/// The server signals verification failure through the fragment content,
	/// so check [`VerificationRedirect::is_error`] before using the token
	/// fields.
	pub async fn verify(&self, request: VerifyRequest) -> Result<VerificationRedirect> {
		if request.token.is_empty() || request.redirect_to.is_empty() {
			return Err(ValidationError::InvalidVerifyRequest.into());
		}

		let outbound = self.build_request(
			Method::GET,
			VERIFY_PATH,
			&[
				("type", request.verification_type.as_str()),
				("token", &request.token),
				("redirect_to", &request.redirect_to),
			],
			None,
		)?;
		let response = self.send(outbound, RedirectMode::Stop).await?;
		let location = self.expect_redirect(response).await?;

		parse_redirect_fragment(&location)
	}

	/// `POST /verify`
	///
	/// Verifies a token against the email or phone it was issued for and
	/// returns a JSON session instead of a redirect.
	pub async fn verify_for_user(&self, request: VerifyForUserRequest) -> Result<Session> {
		if request.token.is_empty()
			|| request.redirect_to.is_empty()
			|| (!field_set(&request.email) && !field_set(&request.phone))
		{
			return Err(ValidationError::InvalidVerifyRequest.into());
		}

		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, VERIFY_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}
}

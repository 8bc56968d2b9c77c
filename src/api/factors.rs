//! MFA factor endpoints (`/factors`).

// self
use crate::{
	_prelude::*,
	client::AuthClient,
	http::RedirectMode,
	types::{FactorType, Session},
};

const FACTORS_PATH: &str = "factors";

/// Factor enrollment parameters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EnrollFactorRequest {
	/// Display name shown to the user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub friendly_name: Option<String>,
	/// Mechanism to enroll; defaults to TOTP.
	pub factor_type: FactorType,
	/// Issuer stamped into the TOTP provisioning URI.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	/// Phone number receiving codes, for phone factors.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
}

/// Freshly enrolled factor.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EnrollFactorResponse {
	/// Server-assigned factor identifier.
	pub id: Uuid,
	/// Mechanism that was enrolled.
	#[serde(default, rename = "type")]
	pub factor_type: FactorType,
	/// TOTP provisioning material, for TOTP factors.
	#[serde(default)]
	pub totp: Option<TotpSecret>,
}

/// TOTP provisioning material returned at enrollment.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TotpSecret {
	/// SVG QR code encoding the provisioning URI.
	#[serde(default)]
	pub qr_code: String,
	/// Shared secret for manual entry.
	#[serde(default)]
	pub secret: String,
	/// `otpauth://` provisioning URI.
	#[serde(default)]
	pub uri: String,
}

/// Pending challenge for an enrolled factor.
#[derive(Clone, Debug)]
pub struct ChallengeFactorResponse {
	/// Challenge identifier to pass back on verification.
	pub id: Uuid,
	/// When the challenge stops being redeemable.
	pub expires_at: OffsetDateTime,
}

/// Challenge verification parameters.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyFactorRequest {
	/// Factor the challenge belongs to; travels in the path, not the body.
	#[serde(skip)]
	pub factor_id: Uuid,
	/// Challenge being answered.
	pub challenge_id: Uuid,
	/// Code produced by the factor.
	pub code: String,
}

/// Factor removal receipt.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UnenrollFactorResponse {
	/// Identifier of the removed factor.
	pub id: Uuid,
}

impl AuthClient {
	/// `POST /factors`
	///
	/// Enrolls a new factor for the authenticated user.
	pub async fn enroll_factor(
		&self,
		request: EnrollFactorRequest,
	) -> Result<EnrollFactorResponse> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, FACTORS_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `POST /factors/{factor_id}/challenge`
	///
	/// Opens a challenge against an enrolled factor.
	pub async fn challenge_factor(&self, factor_id: Uuid) -> Result<ChallengeFactorResponse> {
		// Expiry arrives as a Unix timestamp rather than RFC 3339.
		#[derive(Deserialize)]
		struct Raw {
			id: Uuid,
			expires_at: i64,
		}

		let path = format!("{FACTORS_PATH}/{factor_id}/challenge");
		let outbound = self.build_request(Method::POST, &path, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;
		let raw: Raw = self.expect_json(response).await?;
		let expires_at = OffsetDateTime::from_unix_timestamp(raw.expires_at)
			.unwrap_or(OffsetDateTime::UNIX_EPOCH);

		Ok(ChallengeFactorResponse { id: raw.id, expires_at })
	}

	/// `POST /factors/{factor_id}/verify`
	///
	/// Answers a challenge; success upgrades the session to MFA level.
	pub async fn verify_factor(&self, request: VerifyFactorRequest) -> Result<Session> {
		let path = format!("{FACTORS_PATH}/{}/verify", request.factor_id);
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, &path, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `DELETE /factors/{factor_id}`
	///
	/// Removes an enrolled factor.
	pub async fn unenroll_factor(&self, factor_id: Uuid) -> Result<UnenrollFactorResponse> {
		let path = format!("{FACTORS_PATH}/{factor_id}");
		let outbound = self.build_request(Method::DELETE, &path, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}
}

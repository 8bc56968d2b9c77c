//! Token exchange (`POST /token`) and grant-shape validation.

// self
use crate::{
	_prelude::*,
	api::field_set,
	client::AuthClient,
	error::ValidationError,
	http::RedirectMode,
	types::TokenResponse,
};

const TOKEN_PATH: &str = "token";

/// Identity providers accepted for the `id_token` grant.
const ID_TOKEN_PROVIDERS: [&str; 4] = ["github", "apple", "kakao", "keycloak"];

/// OAuth2-style grant modes implemented by the token endpoint.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Email/phone plus password.
	Password,
	/// Session renewal from a refresh token.
	RefreshToken,
	/// Proof Key for Code Exchange: authorization code plus verifier.
	Pkce,
	/// Sign-in with an upstream provider's ID token.
	IdToken,
}
impl GrantType {
	/// Returns the wire identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::Password => "password",
			GrantType::RefreshToken => "refresh_token",
			GrantType::Pkce => "pkce",
			GrantType::IdToken => "id_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Captcha wrapper the server expects under `gotrue_meta_security`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MetaSecurity {
	/// Captcha token forwarded to the server-side verifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub captcha_token: Option<String>,
}

/// Token exchange request.
///
/// The struct is a superset of the fields of all grant types; only the subset
/// matching [`GrantType`] is legal, enforced by [`validate`](Self::validate)
/// before any network call. The grant type itself travels in the query
/// string, not the body.
#[derive(Clone, Debug, Serialize)]
pub struct TokenRequest {
	/// Declared grant mode; drives validation and the `grant_type` query
	/// parameter.
	#[serde(skip)]
	pub grant_type: GrantType,
	/// Email address, for the password grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Phone number, for the password grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Password, for the password grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	/// Refresh token, for the refresh_token grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
	/// Authorization code, for the pkce grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Code verifier matching the code challenge, for the pkce grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code_verifier: Option<String>,
	/// Upstream ID token, for the id_token grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
	/// Nonce the ID token was issued against.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nonce: Option<String>,
	/// Upstream identity provider, for the id_token grant.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub provider: Option<String>,
	/// Upstream access token accompanying the ID token.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub access_token: Option<String>,
	/// Captcha payload, serialized as `gotrue_meta_security`.
	#[serde(rename = "gotrue_meta_security", skip_serializing_if = "Option::is_none")]
	pub security: Option<MetaSecurity>,
}
impl TokenRequest {
	/// Starts an empty request for `grant`.
	pub fn new(grant: GrantType) -> Self {
		Self {
			grant_type: grant,
			email: None,
			phone: None,
			password: None,
			refresh_token: None,
			code: None,
			code_verifier: None,
			id_token: None,
			nonce: None,
			provider: None,
			access_token: None,
			security: None,
		}
	}

	/// Checks the field shape against the declared grant type without
	/// contacting the server.
	///
	/// The checks exist to fail fast with a precise error instead of letting
	/// the server reject an ambiguous request. A populated field belonging to
	/// a different grant (e.g. a refresh token on a password grant) marks the
	/// request as malformed rather than being silently ignored.
	pub fn validate(&self) -> Result<(), ValidationError> {
		match self.grant_type {
			GrantType::Password =>
				if (!field_set(&self.email) && !field_set(&self.phone))
					|| !field_set(&self.password)
					|| field_set(&self.refresh_token)
				{
					return Err(ValidationError::InvalidTokenRequest);
				},
			GrantType::RefreshToken =>
				if !field_set(&self.refresh_token)
					|| field_set(&self.email)
					|| field_set(&self.phone)
					|| field_set(&self.password)
				{
					return Err(ValidationError::InvalidTokenRequest);
				},
			GrantType::Pkce =>
				if !field_set(&self.code) || !field_set(&self.code_verifier) {
					return Err(ValidationError::InvalidTokenRequest);
				},
			GrantType::IdToken => {
				if !field_set(&self.id_token) {
					return Err(ValidationError::InvalidTokenRequest);
				}

				// An unsupported provider is reported separately so callers
				// can tell a malformed request from an unsupported provider.
				match self.provider.as_deref() {
					Some(provider) if ID_TOKEN_PROVIDERS.contains(&provider) => {},
					_ => return Err(ValidationError::InvalidProvider),
				}
			},
		}

		Ok(())
	}
}

impl AuthClient {
	/// `POST /token?grant_type=...`
	///
	/// OAuth2-style endpoint implementing the password, refresh_token, pkce,
	/// and id_token grant types. The request shape is validated locally
	/// before dispatch.
	pub async fn token(&self, request: TokenRequest) -> Result<TokenResponse> {
		request.validate()?;

		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(
			Method::POST,
			TOKEN_PATH,
			&[("grant_type", request.grant_type.as_str())],
			Some(body),
		)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// Signs in with email and password.
	///
	/// Convenience wrapper over [`token`](Self::token) with the password
	/// grant.
	pub async fn sign_in_with_email_password(
		&self,
		email: &str,
		password: &str,
	) -> Result<TokenResponse> {
		self.token(TokenRequest {
			email: Some(email.to_owned()),
			password: Some(password.to_owned()),
			..TokenRequest::new(GrantType::Password)
		})
		.await
	}

	/// Signs in with phone and password.
	///
	/// Convenience wrapper over [`token`](Self::token) with the password
	/// grant.
	pub async fn sign_in_with_phone_password(
		&self,
		phone: &str,
		password: &str,
	) -> Result<TokenResponse> {
		self.token(TokenRequest {
			phone: Some(phone.to_owned()),
			password: Some(password.to_owned()),
			..TokenRequest::new(GrantType::Password)
		})
		.await
	}

	/// Exchanges a refresh token for a fresh session.
	///
	/// Convenience wrapper over [`token`](Self::token) with the refresh_token
	/// grant.
	pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
		self.token(TokenRequest {
			refresh_token: Some(refresh_token.to_owned()),
			..TokenRequest::new(GrantType::RefreshToken)
		})
		.await
	}

	/// Signs in with an upstream provider's ID token.
	///
	/// Convenience wrapper over [`token`](Self::token) with the id_token
	/// grant.
	pub async fn sign_in_with_id_token(
		&self,
		provider: &str,
		id_token: &str,
		nonce: Option<&str>,
	) -> Result<TokenResponse> {
		self.token(TokenRequest {
			provider: Some(provider.to_owned()),
			id_token: Some(id_token.to_owned()),
			nonce: nonce.map(str::to_owned),
			..TokenRequest::new(GrantType::IdToken)
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn password_grant_requires_a_subject_and_password() {
		let request = TokenRequest {
			email: Some("a@b.com".into()),
			password: Some("secret".into()),
			..TokenRequest::new(GrantType::Password)
		};

		assert_eq!(request.validate(), Ok(()));

		let request = TokenRequest {
			phone: Some("+4915551234567".into()),
			password: Some("secret".into()),
			..TokenRequest::new(GrantType::Password)
		};

		assert_eq!(request.validate(), Ok(()));

		let request = TokenRequest {
			email: Some("a@b.com".into()),
			..TokenRequest::new(GrantType::Password)
		};

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));

		let request =
			TokenRequest { password: Some("secret".into()), ..TokenRequest::new(GrantType::Password) };

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));
	}

	#[test]
	fn password_grant_rejects_a_mixed_in_refresh_token() {
		let request = TokenRequest {
			email: Some("a@b.com".into()),
			password: Some("secret".into()),
			refresh_token: Some("rt".into()),
			..TokenRequest::new(GrantType::Password)
		};

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));
	}

	#[test]
	fn refresh_grant_rejects_password_fields() {
		let request = TokenRequest {
			refresh_token: Some("rt".into()),
			..TokenRequest::new(GrantType::RefreshToken)
		};

		assert_eq!(request.validate(), Ok(()));

		let request = TokenRequest {
			refresh_token: Some("rt".into()),
			email: Some("a@b.com".into()),
			..TokenRequest::new(GrantType::RefreshToken)
		};

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));

		let request = TokenRequest::new(GrantType::RefreshToken);

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));
	}

	#[test]
	fn pkce_grant_requires_code_and_verifier() {
		let request = TokenRequest {
			code: Some("code".into()),
			code_verifier: Some("verifier".into()),
			..TokenRequest::new(GrantType::Pkce)
		};

		assert_eq!(request.validate(), Ok(()));

		let request = TokenRequest { code: Some("code".into()), ..TokenRequest::new(GrantType::Pkce) };

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));
	}

	#[test]
	fn id_token_grant_distinguishes_provider_failures() {
		let request = TokenRequest {
			id_token: Some("jwt".into()),
			provider: Some("github".into()),
			..TokenRequest::new(GrantType::IdToken)
		};

		assert_eq!(request.validate(), Ok(()));

		// Unsupported provider is a distinct failure kind.
		let request = TokenRequest {
			id_token: Some("jwt".into()),
			provider: Some("google".into()),
			..TokenRequest::new(GrantType::IdToken)
		};

		assert_eq!(request.validate(), Err(ValidationError::InvalidProvider));

		let request = TokenRequest {
			id_token: Some("jwt".into()),
			..TokenRequest::new(GrantType::IdToken)
		};

		assert_eq!(request.validate(), Err(ValidationError::InvalidProvider));

		// A missing ID token is the generic shape failure, checked first.
		let request = TokenRequest {
			provider: Some("github".into()),
			..TokenRequest::new(GrantType::IdToken)
		};

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));
	}

	#[test]
	fn empty_strings_count_as_unset() {
		let request = TokenRequest {
			email: Some(String::new()),
			password: Some("secret".into()),
			..TokenRequest::new(GrantType::Password)
		};

		assert_eq!(request.validate(), Err(ValidationError::InvalidTokenRequest));
	}

	#[test]
	fn grant_type_stays_out_of_the_body() {
		let request = TokenRequest {
			email: Some("a@b.com".into()),
			password: Some("secret".into()),
			..TokenRequest::new(GrantType::Password)
		};
		let body = serde_json::to_value(&request).expect("Failed to encode token request.");

		assert!(body.get("grant_type").is_none());
		assert!(body.get("refresh_token").is_none());
		assert_eq!(body.get("email").and_then(|v| v.as_str()), Some("a@b.com"));
	}
}

//! SSO initiation (`POST /sso`).

// self
use crate::{_prelude::*, client::AuthClient, http::RedirectMode};

const SSO_PATH: &str = "sso";

/// SSO initiation parameters; the provider is selected by id or by email
/// domain.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SsoRequest {
	/// SSO provider identifier, when known.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub provider_id: Option<Uuid>,
	/// Email domain mapped to an SSO provider.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,
	/// URL the identity provider should return the browser to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_to: Option<String>,
	/// Asks the server to answer with a JSON body carrying the authorization
	/// URL instead of a 303 redirect.
	pub skip_http_redirect: bool,
}

/// Authorization URL the caller should visit to continue the SSO flow.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SsoResponse {
	/// Identity provider authorization URL.
	pub url: String,
}

impl AuthClient {
	/// `POST /sso`
	///
	/// Initiates an SSO sign-in with the selected provider. With
	/// `skip_http_redirect` set the server returns the authorization URL as
	/// JSON; otherwise the 303 redirect is captured without being followed
	/// and its target returned.
	pub async fn sso(&self, request: SsoRequest) -> Result<SsoResponse> {
		let skip_http_redirect = request.skip_http_redirect;
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, SSO_PATH, &[], Some(body))?;

		if skip_http_redirect {
			let response = self.send(outbound, RedirectMode::Follow).await?;

			self.expect_json(response).await
		} else {
			let response = self.send(outbound, RedirectMode::Stop).await?;
			let url = self.expect_redirect(response).await?;

			Ok(SsoResponse { url })
		}
	}
}

//! Fragment parsing for the redirect-based verification flow.

// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, api::verify::VerificationType};

/// Parsed outcome of a verification redirect.
///
/// The server encodes verification results in the fragment of the redirect
/// target rather than the response body, and it signals verification failure
/// through `error`/`error_code`/`error_description` keys in that same
/// fragment. The redirect itself is always an HTTP-level success, so the two
/// signals are kept in independent channels: check
/// [`is_error`](Self::is_error) before trusting the token fields.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VerificationRedirect {
	/// Raw redirect target exactly as the server sent it.
	pub url: String,
	/// Access token issued by the verification; empty on failure.
	pub access_token: String,
	/// Token scheme reported alongside the access token.
	pub token_type: String,
	/// Access token lifetime in seconds; 0 when absent or unparseable.
	pub expires_in: u64,
	/// Refresh token issued by the verification; empty on failure.
	pub refresh_token: String,
	/// Verification flow the redirect belongs to, when recognized.
	pub verification_type: Option<VerificationType>,
	/// Error slug carried in the fragment.
	pub error: Option<String>,
	/// Machine-readable error code carried in the fragment.
	pub error_code: Option<String>,
	/// Human-readable error description carried in the fragment.
	pub error_description: Option<String>,
}
impl VerificationRedirect {
	/// Returns true when the fragment carries any error field, in which case
	/// the token fields are meaningless.
	pub fn is_error(&self) -> bool {
		self.error.is_some() || self.error_code.is_some() || self.error_description.is_some()
	}
}

/// Parses the `Location` target of a verification redirect.
///
/// The fragment is read as a `key=value&...` query string. `expires_in`
/// soft-fails to 0 when absent or non-numeric since the remaining fields are
/// still usable. A well-formed fragment that carries error fields is NOT an
/// error return; only an unparseable URL fails.
pub fn parse_redirect_fragment(location: &str) -> Result<VerificationRedirect> {
	let url = Url::parse(location).map_err(|source| Error::RedirectParse { source })?;
	let fragment = url.fragment().unwrap_or_default().to_owned();
	let mut redirect = VerificationRedirect { url: location.to_owned(), ..Default::default() };

	for (key, value) in form_urlencoded::parse(fragment.as_bytes()) {
		match key.as_ref() {
			"access_token" => redirect.access_token = value.into_owned(),
			"token_type" => redirect.token_type = value.into_owned(),
			"expires_in" => redirect.expires_in = value.parse().unwrap_or(0),
			"refresh_token" => redirect.refresh_token = value.into_owned(),
			"type" => redirect.verification_type = value.parse().ok(),
			"error" => redirect.error = Some(value.into_owned()),
			"error_code" => redirect.error_code = Some(value.into_owned()),
			"error_description" => redirect.error_description = Some(value.into_owned()),
			_ => {},
		}
	}

	Ok(redirect)
}

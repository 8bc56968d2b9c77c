//! Transport pair used to dispatch auth requests.

// crates.io
use reqwest::redirect::Policy;
// self
use crate::_prelude::*;

/// Redirect handling mode for a single dispatch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirectMode {
	/// Follow redirects; the transport default for JSON endpoints.
	Follow,
	/// Surface 3xx responses to the caller instead of following them.
	///
	/// The GET verification flow and redirect-capturing SSO initiation treat a
	/// 303 as their success signal, so those responses must stay in hand.
	Stop,
}

/// Reqwest transport pair shared by every endpoint call.
///
/// reqwest fixes the redirect policy at client construction time, so the two
/// dispatch modes are backed by two clients. Callers injecting their own
/// transport provide both halves through [`AuthHttpClient::with_clients`];
/// the non-following half must be built with [`Policy::none`].
#[derive(Clone, Debug)]
pub struct AuthHttpClient {
	following: ReqwestClient,
	direct: ReqwestClient,
}
impl AuthHttpClient {
	/// Builds the default transport pair.
	pub fn new() -> Result<Self> {
		let following = ReqwestClient::builder().build().map_err(Error::request_creation)?;

		Self::with_following(following)
	}

	/// Wraps a caller-supplied redirect-following client and builds the
	/// non-following twin with default settings.
	pub fn with_following(following: ReqwestClient) -> Result<Self> {
		let direct = ReqwestClient::builder()
			.redirect(Policy::none())
			.build()
			.map_err(Error::request_creation)?;

		Ok(Self { following, direct })
	}

	/// Wraps a fully caller-supplied transport pair.
	pub fn with_clients(following: ReqwestClient, direct: ReqwestClient) -> Self {
		Self { following, direct }
	}

	/// Selects the client backing the requested dispatch mode.
	pub(crate) fn for_mode(&self, mode: RedirectMode) -> &ReqwestClient {
		match mode {
			RedirectMode::Follow => &self.following,
			RedirectMode::Stop => &self.direct,
		}
	}
}

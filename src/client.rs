//! Auth client handle, request construction, and dispatch plumbing.

// crates.io
use reqwest::{
	Request, Response,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, LOCATION},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{classify_error, decode_json},
	http::{AuthHttpClient, RedirectMode},
};

/// Header carrying the project API key on every request.
const APIKEY_HEADER: &str = "apikey";

/// Immutable identity read by the request builder for every call: the project
/// API key plus an optional bearer token.
#[derive(Clone, Debug)]
pub struct ClientIdentity {
	api_key: String,
	bearer_token: Option<String>,
}
impl ClientIdentity {
	/// Creates an unauthenticated identity from an API key.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self { api_key: api_key.into(), bearer_token: None }
	}

	/// Returns the project API key.
	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	/// Returns the bearer token, if one is configured.
	pub fn bearer_token(&self) -> Option<&str> {
		self.bearer_token.as_deref()
	}
}

/// Client handle for a single Supabase Auth instance.
///
/// The handle is cheap to clone and safe to share across tasks: every call
/// constructs its request from read-only state and retains nothing afterward.
/// There is no session cache or token store inside the client; cancellation
/// and timeouts are whatever the injected reqwest clients enforce.
#[derive(Clone, Debug)]
pub struct AuthClient {
	base_url: Url,
	identity: ClientIdentity,
	http: AuthHttpClient,
}
impl AuthClient {
	/// Creates a client for `https://<project_reference>.supabase.co/auth/v1/`.
	///
	/// The project reference is not checked against the server; requests fail
	/// later if it does not name a real project.
	pub fn new(project_reference: &str, api_key: impl Into<String>) -> Result<Self> {
		if project_reference.is_empty()
			|| !project_reference.chars().all(|c| c.is_ascii_alphanumeric())
		{
			return Err(Error::InvalidProjectReference);
		}

		Self::with_base_url(&format!("https://{project_reference}.supabase.co/auth/v1"), api_key)
	}

	/// Creates a client against a custom auth base URL.
	pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
		Ok(Self {
			base_url: normalize_base_url(base_url)?,
			identity: ClientIdentity::new(api_key),
			http: AuthHttpClient::new()?,
		})
	}

	/// Returns a copy pointed at a different auth base URL.
	pub fn custom_base_url(mut self, base_url: &str) -> Result<Self> {
		self.base_url = normalize_base_url(base_url)?;

		Ok(self)
	}

	/// Sets the bearer token attached as `Authorization: Bearer <token>`.
	///
	/// User-scoped endpoints need the user's access token here; admin
	/// endpoints need a service-role token.
	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.identity.bearer_token = Some(token.into());

		self
	}

	/// Replaces the underlying transport pair.
	pub fn with_http_client(mut self, http: AuthHttpClient) -> Self {
		self.http = http;

		self
	}

	/// Returns the identity used for every call.
	pub fn identity(&self) -> &ClientIdentity {
		&self.identity
	}

	/// Returns the auth base URL requests are joined onto.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Builds an outbound request for `path` relative to the base URL.
	///
	/// Headers follow a fixed contract: `apikey` is always set,
	/// `Authorization` only when a bearer token is configured, and
	/// `Content-Type: application/json` exactly when a body is supplied.
	pub(crate) fn build_request(
		&self,
		method: Method,
		path: &str,
		query: &[(&str, &str)],
		body: Option<Vec<u8>>,
	) -> Result<Request> {
		let mut url = self.base_url.join(path).map_err(Error::request_creation)?;

		if !query.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in query {
				pairs.append_pair(key, value);
			}
		}

		let mut request = Request::new(method, url);
		let headers = request.headers_mut();
		let api_key =
			HeaderValue::from_str(self.identity.api_key()).map_err(Error::request_creation)?;

		headers.insert(APIKEY_HEADER, api_key);

		if let Some(token) = self.identity.bearer_token() {
			let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
				.map_err(Error::request_creation)?;

			headers.insert(AUTHORIZATION, bearer);
		}
		if let Some(bytes) = body {
			headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
			*request.body_mut() = Some(bytes.into());
		}

		Ok(request)
	}

	/// Encodes a request body as JSON.
	pub(crate) fn encode_body<B>(body: &B) -> Result<Vec<u8>>
	where
		B: Serialize,
	{
		serde_json::to_vec(body).map_err(|source| Error::RequestEncoding { source })
	}

	/// Dispatches a request through the transport selected by `mode`.
	///
	/// Only transport-level failures surface here; status handling belongs to
	/// the response helpers below.
	pub(crate) async fn send(&self, request: Request, mode: RedirectMode) -> Result<Response> {
		#[cfg(feature = "tracing")]
		tracing::debug!(
			method = %request.method(),
			url = %request.url(),
			follow_redirects = matches!(mode, RedirectMode::Follow),
			"dispatching auth request",
		);

		self.http.for_mode(mode).execute(request).await.map_err(Error::request_dispatch)
	}

	/// Reads the full body, classifying non-2xx responses and decoding 2xx
	/// bodies into `T`.
	pub(crate) async fn expect_json<T>(&self, response: Response) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let status = response.status();
		let bytes = response.bytes().await.map_err(Error::request_dispatch)?;

		if !status.is_success() {
			return Err(classify_error(status, &bytes));
		}

		decode_json(&bytes).map_err(|source| Error::ResponseDecoding { source })
	}

	/// Drains the body and classifies non-2xx responses; 2xx bodies are
	/// discarded.
	pub(crate) async fn expect_no_content(&self, response: Response) -> Result<()> {
		let status = response.status();
		let bytes = response.bytes().await.map_err(Error::request_dispatch)?;

		if !status.is_success() {
			return Err(classify_error(status, &bytes));
		}

		Ok(())
	}

	/// Extracts the `Location` target of a 303 response dispatched with
	/// [`RedirectMode::Stop`], draining the body on every path.
	///
	/// Any other status is routed through error classification; a 303 without
	/// a `Location` header violates the redirect contract and is reported as
	/// [`Error::MissingRedirectLocation`].
	pub(crate) async fn expect_redirect(&self, response: Response) -> Result<String> {
		let status = response.status();

		if status != StatusCode::SEE_OTHER {
			let bytes = response.bytes().await.map_err(Error::request_dispatch)?;

			return Err(classify_error(status, &bytes));
		}

		let location = response
			.headers()
			.get(LOCATION)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);

		// The redirect body carries nothing useful; drain it anyway so the
		// connection returns to the pool.
		let _ = response.bytes().await;

		location.ok_or(Error::MissingRedirectLocation)
	}
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
	let mut url = Url::parse(base_url).map_err(Error::request_creation)?;

	// A trailing slash keeps Url::join appending instead of replacing the
	// final path segment.
	if !url.path().ends_with('/') {
		url.set_path(&format!("{}/", url.path()));
	}

	Ok(url)
}

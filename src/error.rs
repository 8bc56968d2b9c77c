//! Error taxonomy and server error classification shared by every endpoint call.

// self
use crate::{_prelude::*, types::WeakPassword};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

const ERR_CODE_USER_ALREADY_EXISTS: &str = "user_already_exists";
const ERR_CODE_INVALID_CREDENTIALS: &str = "invalid_credentials";
const ERR_CODE_SESSION_NOT_FOUND: &str = "session_not_found";
const ERR_CODE_BAD_JWT: &str = "bad_jwt";
const ERR_CODE_EMAIL_NOT_CONFIRMED: &str = "email_not_confirmed";
const ERR_CODE_UNEXPECTED_FAILURE: &str = "unexpected_failure";
const ERR_CODE_EMAIL_SEND_RATE_LIMIT: &str = "over_email_send_rate_limit";
const ERR_CODE_NO_AUTHORIZATION: &str = "no_authorization";
const ERR_CODE_NOT_ADMIN: &str = "not_admin";
const ERR_CODE_VALIDATION_FAILED: &str = "validation_failed";
const ERR_CODE_REFRESH_TOKEN_NOT_FOUND: &str = "refresh_token_not_found";

const ERR_MSG_SENDING_CONFIRMATION_EMAIL: &str = "Error sending confirmation email";
const ERR_MSG_USER_ID_MUST_BE_UUID: &str = "user_id must be an UUID";

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local request validation failed before any network call.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Server rejected the request for a classified reason.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Project reference would not produce a valid auth URL.
	#[error("Cannot create auth client: invalid project reference.")]
	InvalidProjectReference,
	/// Outbound request could not be constructed.
	#[error("Failed to create request.")]
	RequestCreation {
		/// Underlying URL or header construction failure.
		#[source]
		source: BoxError,
	},
	/// Request body could not be encoded as JSON.
	#[error("Failed to encode request body.")]
	RequestEncoding {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Transport failed before a response was received.
	#[error("Failed to send request.")]
	RequestDispatch {
		/// Underlying transport failure (DNS, TCP, TLS, timeout).
		#[source]
		source: BoxError,
	},
	/// A success body could not be decoded into the expected shape.
	#[error("Failed to decode response body.")]
	ResponseDecoding {
		/// Structured parsing failure including the failing JSON path.
		#[source]
		source: JsonPathError,
	},
	/// An error body could not be decoded into the server's error shape.
	#[error("Failed to decode error response body ({status}).")]
	ErrorResponseDecoding {
		/// HTTP status line of the rejected response.
		status: String,
		/// Structured parsing failure including the failing JSON path.
		#[source]
		source: JsonPathError,
	},
	/// A redirect response arrived without a `Location` header.
	#[error("No redirect URL found in response.")]
	MissingRedirectLocation,
	/// A redirect `Location` header was not a parseable URL.
	#[error("Failed to parse redirect URL.")]
	RedirectParse {
		/// Underlying URL parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl Error {
	/// Wraps a request-construction failure.
	pub fn request_creation(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::RequestCreation { source: Box::new(src) }
	}

	/// Wraps a transport failure that occurred before a response was fully received.
	pub fn request_dispatch(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::RequestDispatch { source: Box::new(src) }
	}
}

/// Local validation failures; these never reach the network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
	/// Token request fields do not match the declared grant type.
	#[error("Token request fields do not match the declared grant type.")]
	InvalidTokenRequest,
	/// The `id_token` grant names an unset or unsupported identity provider.
	#[error("Unsupported identity provider for the id_token grant.")]
	InvalidProvider,
	/// Verify request is missing its token, redirect target, or subject.
	#[error("Verify request is missing required fields.")]
	InvalidVerifyRequest,
}

/// Server rejections classified from the error response catalog.
///
/// One variant per distinct error code the server is known to emit, plus
/// [`ApiError::Server`] preserving the status line and message for everything
/// outside the catalog.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ApiError {
	/// `user_already_exists`.
	#[error("User already exists.")]
	UserAlreadyExists,
	/// `invalid_credentials`.
	#[error("Invalid credentials.")]
	InvalidCredentials,
	/// `session_not_found`.
	#[error("Session not found.")]
	SessionNotFound,
	/// `bad_jwt`.
	#[error("Invalid JWT.")]
	BadJwt,
	/// `email_not_confirmed`.
	#[error("Email not confirmed.")]
	EmailNotConfirmed,
	/// `unexpected_failure` while sending the confirmation email.
	#[error("Failed to send confirmation email.")]
	FailedSendingConfirmationEmail,
	/// `over_email_send_rate_limit`.
	#[error("Email send rate limit exceeded.")]
	OverEmailSendRateLimit,
	/// `no_authorization`.
	#[error("No authorization.")]
	NoAuthorization,
	/// `not_admin`.
	#[error("Not admin.")]
	NotAdmin,
	/// `validation_failed` on a malformed user identifier.
	#[error("Invalid user id.")]
	InvalidUserId,
	/// `refresh_token_not_found`.
	#[error("Refresh token not found.")]
	RefreshTokenNotFound,

	/// Rejection outside the catalog; keeps the server's own words.
	#[error("Auth server returned {status}: {message}.")]
	Server {
		/// HTTP status line of the rejected response.
		status: String,
		/// Message text taken from the error payload.
		message: String,
	},
}

/// Error payload returned by the auth server.
///
/// The error shape is not uniform across endpoints, so every field is an
/// explicit optional and absence never fails decoding.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorResponse {
	/// Error slug, mostly set by OAuth-style endpoints.
	#[serde(default)]
	pub error: Option<String>,
	/// Human-readable description accompanying `error`.
	#[serde(default)]
	pub error_description: Option<String>,
	/// HTTP-level numeric code echoed in the body.
	#[serde(default)]
	pub code: Option<u16>,
	/// Human-readable message, mostly set by REST-style endpoints.
	#[serde(default)]
	pub msg: Option<String>,
	/// Machine-readable error code slug.
	#[serde(default)]
	pub error_code: Option<String>,
	/// Weak-password detail attached to password rejections.
	#[serde(default)]
	pub weak_password: Option<WeakPassword>,
}
impl ErrorResponse {
	/// Best-effort human message, preferring `msg` over `error`.
	pub fn message(&self) -> &str {
		self.msg.as_deref().or(self.error.as_deref()).unwrap_or_default()
	}

	/// Looks up the distinct error kind for this payload, if any.
	///
	/// Message-conditioned rules are evaluated before the plain code table and
	/// both require `error_code` to be present.
	fn distinct(&self) -> Option<ApiError> {
		let code = self.error_code.as_deref()?;
		let msg = self.msg.as_deref();

		if code == ERR_CODE_UNEXPECTED_FAILURE && msg == Some(ERR_MSG_SENDING_CONFIRMATION_EMAIL) {
			return Some(ApiError::FailedSendingConfirmationEmail);
		}
		if code == ERR_CODE_VALIDATION_FAILED && msg == Some(ERR_MSG_USER_ID_MUST_BE_UUID) {
			return Some(ApiError::InvalidUserId);
		}

		match code {
			ERR_CODE_USER_ALREADY_EXISTS => Some(ApiError::UserAlreadyExists),
			ERR_CODE_INVALID_CREDENTIALS => Some(ApiError::InvalidCredentials),
			ERR_CODE_SESSION_NOT_FOUND => Some(ApiError::SessionNotFound),
			ERR_CODE_BAD_JWT => Some(ApiError::BadJwt),
			ERR_CODE_EMAIL_NOT_CONFIRMED => Some(ApiError::EmailNotConfirmed),
			ERR_CODE_EMAIL_SEND_RATE_LIMIT => Some(ApiError::OverEmailSendRateLimit),
			ERR_CODE_NO_AUTHORIZATION => Some(ApiError::NoAuthorization),
			ERR_CODE_NOT_ADMIN => Some(ApiError::NotAdmin),
			ERR_CODE_REFRESH_TOKEN_NOT_FOUND => Some(ApiError::RefreshTokenNotFound),
			_ => None,
		}
	}
}

/// Classifies the body of a non-2xx response into exactly one typed error.
pub(crate) fn classify_error(status: StatusCode, body: &[u8]) -> Error {
	let payload = match decode_json::<ErrorResponse>(body) {
		Ok(payload) => payload,
		Err(source) => return Error::ErrorResponseDecoding { status: status.to_string(), source },
	};

	if let Some(distinct) = payload.distinct() {
		return distinct.into();
	}

	ApiError::Server { status: status.to_string(), message: payload.message().to_owned() }.into()
}

/// Decodes a JSON body while tracking the path of any failure.
pub(crate) fn decode_json<T>(body: &[u8]) -> Result<T, JsonPathError>
where
	T: serde::de::DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
}

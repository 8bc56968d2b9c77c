//! Schema types shared across endpoint wrappers.

// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// User record as returned by the auth server.
///
/// Most fields default when absent; the server omits anything that has never
/// been set for the user.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
	/// Server-assigned user identifier.
	pub id: Uuid,
	/// Audience claim stamped into the user's tokens.
	#[serde(default)]
	pub aud: String,
	/// Role granted to the user.
	#[serde(default)]
	pub role: String,
	/// Primary email address.
	#[serde(default)]
	pub email: String,
	/// Primary phone number.
	#[serde(default)]
	pub phone: String,
	/// When the email address was confirmed.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub email_confirmed_at: Option<OffsetDateTime>,
	/// When the phone number was confirmed.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub phone_confirmed_at: Option<OffsetDateTime>,
	/// When either contact channel was first confirmed.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub confirmed_at: Option<OffsetDateTime>,
	/// When the latest confirmation email went out.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub confirmation_sent_at: Option<OffsetDateTime>,
	/// When the latest recovery email went out.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub recovery_sent_at: Option<OffsetDateTime>,
	/// When the user was invited, for invite-based signups.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub invited_at: Option<OffsetDateTime>,
	/// Last successful sign-in.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub last_sign_in_at: Option<OffsetDateTime>,
	/// Ban expiry, when the user is banned.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub banned_until: Option<OffsetDateTime>,
	/// Record creation time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Record update time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
	/// Server-managed metadata (provider list, etc.).
	#[serde(default)]
	pub app_metadata: Value,
	/// Caller-managed metadata set at signup or via user update.
	#[serde(default)]
	pub user_metadata: Value,
	/// MFA factors enrolled by the user.
	#[serde(default)]
	pub factors: Vec<Factor>,
}

/// Token-bearing session returned by sign-in, token exchange, and
/// verification.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
	/// JWT granting access to the project's APIs.
	pub access_token: String,
	/// Token scheme, `bearer` in practice.
	#[serde(default)]
	pub token_type: String,
	/// Access token lifetime in seconds.
	#[serde(default)]
	pub expires_in: u64,
	/// Absolute access token expiry as a Unix timestamp, when reported.
	#[serde(default)]
	pub expires_at: Option<i64>,
	/// Opaque token redeemable for a fresh session.
	#[serde(default)]
	pub refresh_token: String,
	/// Upstream provider access token, for OAuth-backed sign-ins.
	#[serde(default)]
	pub provider_token: Option<String>,
	/// Upstream provider refresh token, for OAuth-backed sign-ins.
	#[serde(default)]
	pub provider_refresh_token: Option<String>,
	/// User the session belongs to.
	#[serde(default)]
	pub user: Option<User>,
	/// Advisory attached when the password is accepted but weak.
	#[serde(default)]
	pub weak_password: Option<WeakPassword>,
}

/// Response of the token exchange endpoint.
pub type TokenResponse = Session;

/// Weak-password detail carried by password rejections and advisories.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WeakPassword {
	/// Reason tags explaining why the password is considered weak.
	#[serde(default)]
	pub reasons: Vec<WeakPasswordReason>,
}

/// Reason tags the server uses in weak-password details.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeakPasswordReason {
	/// Password is too short.
	Length,
	/// Password uses too narrow a character set.
	Characters,
	/// Password appears in a breach corpus.
	Pwned,
	/// Reason tag this client does not recognize.
	#[serde(other)]
	Other,
}

/// MFA factor attached to a user.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Factor {
	/// Server-assigned factor identifier.
	pub id: Uuid,
	/// Enrollment state (`unverified`, `verified`).
	#[serde(default)]
	pub status: String,
	/// Caller-chosen display name.
	#[serde(default)]
	pub friendly_name: String,
	/// Mechanism backing the factor.
	#[serde(default)]
	pub factor_type: FactorType,
	/// Enrollment time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Last update time.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}

/// MFA mechanisms the server can enroll.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorType {
	/// Time-based one-time passwords.
	#[default]
	Totp,
	/// SMS-delivered codes.
	Phone,
}

/// Publicly available settings of an auth instance.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Settings {
	/// Enabled external identity providers, keyed by provider name.
	#[serde(default)]
	pub external: std::collections::BTreeMap<String, bool>,
	/// Whether self-service signup is disabled.
	#[serde(default)]
	pub disable_signup: bool,
	/// Whether email addresses confirm automatically.
	#[serde(default)]
	pub mailer_autoconfirm: bool,
	/// Whether phone numbers confirm automatically.
	#[serde(default)]
	pub phone_autoconfirm: bool,
	/// Configured SMS provider name.
	#[serde(default)]
	pub sms_provider: String,
	/// Whether SAML SSO is enabled for the instance.
	#[serde(default)]
	pub saml_enabled: bool,
}

/// Health report of an auth instance.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Health {
	/// Server version string.
	#[serde(default)]
	pub version: String,
	/// Service name.
	#[serde(default)]
	pub name: String,
	/// Human-readable service description.
	#[serde(default)]
	pub description: String,
}

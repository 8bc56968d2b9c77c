//! Endpoint wrappers over the shared request/response engine.
//!
//! Every wrapper follows the same shape: validate locally where applicable,
//! encode the request, build it with the client identity headers, dispatch,
//! then classify or decode. The decision logic lives in [`crate::client`],
//! [`crate::error`], and [`crate::redirect`]; these modules only marshal
//! endpoint-specific schemas.

pub mod admin;
pub mod factors;
pub mod meta;
pub mod passwordless;
pub mod signup;
pub mod sso;
pub mod token;
pub mod user;
pub mod verify;

pub use admin::*;
pub use factors::*;
pub use passwordless::*;
pub use signup::*;
pub use sso::*;
pub use token::*;
pub use user::*;
pub use verify::*;

/// Returns true when an optional string field carries a non-empty value.
pub(crate) fn field_set(field: &Option<String>) -> bool {
	field.as_deref().is_some_and(|value| !value.is_empty())
}

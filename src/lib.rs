//! Typed client for the Supabase Auth (GoTrue) HTTP API: token grants, verification flows, MFA
//! factors, and admin user management over an injectable reqwest transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod redirect;
pub mod types;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience helpers for integration tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::client::AuthClient;

	/// API key baked into every mock-backed test client.
	pub const TEST_API_KEY: &str = "test-anon-key";

	/// Builds an unauthenticated client against a mock server base URL.
	pub fn test_client(base_url: &str) -> AuthClient {
		AuthClient::with_base_url(base_url, TEST_API_KEY).expect("Failed to build test auth client.")
	}

	/// Builds a client that also carries a bearer token.
	pub fn test_client_with_token(base_url: &str, token: &str) -> AuthClient {
		test_client(base_url).with_token(token)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
	};

	pub use reqwest::{Client as ReqwestClient, Method, StatusCode};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;
	pub use uuid::Uuid;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};

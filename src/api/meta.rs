//! Instance metadata endpoints (`/settings`, `/health`).

// self
use crate::{
	_prelude::*,
	client::AuthClient,
	http::RedirectMode,
	types::{Health, Settings},
};

const SETTINGS_PATH: &str = "settings";
const HEALTH_PATH: &str = "health";

impl AuthClient {
	/// `GET /settings`
	///
	/// Returns the publicly available settings of the auth instance.
	pub async fn settings(&self) -> Result<Settings> {
		let outbound = self.build_request(Method::GET, SETTINGS_PATH, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `GET /health`
	///
	/// Checks the health of the auth server.
	pub async fn health(&self) -> Result<Health> {
		let outbound = self.build_request(Method::GET, HEALTH_PATH, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}
}

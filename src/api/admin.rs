//! Admin user management (`/admin/users`); every call requires a
//! service-role bearer token.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, client::AuthClient, http::RedirectMode, types::User};

const ADMIN_USERS_PATH: &str = "admin/users";

/// Admin-side user creation parameters.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AdminCreateUserRequest {
	/// Email address of the new user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Phone number of the new user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Initial password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	/// Marks the email confirmed without sending anything.
	pub email_confirm: bool,
	/// Marks the phone confirmed without sending anything.
	pub phone_confirm: bool,
	/// Role granted to the new user.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Ban duration such as `24h`, or `none` to lift a ban.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ban_duration: Option<String>,
	/// Caller-managed metadata.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_metadata: Option<Value>,
	/// Server-managed metadata.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub app_metadata: Option<Value>,
}

/// Admin-side user update parameters; unset fields stay untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AdminUpdateUserRequest {
	/// User to update; travels in the path, not the body.
	#[serde(skip)]
	pub user_id: Uuid,
	/// New email address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// New phone number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// New password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<String>,
	/// Marks the email confirmed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email_confirm: Option<bool>,
	/// Marks the phone confirmed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone_confirm: Option<bool>,
	/// New role.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Ban duration such as `24h`, or `none` to lift a ban.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ban_duration: Option<String>,
	/// Caller-managed metadata; replaces the stored document.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_metadata: Option<Value>,
	/// Server-managed metadata; replaces the stored document.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub app_metadata: Option<Value>,
}

/// Pagination window for listing users.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminListUsersQuery {
	/// 1-based page number; server default when unset.
	pub page: Option<u32>,
	/// Page size; server default when unset.
	pub per_page: Option<u32>,
}

/// One page of users.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AdminListUsersResponse {
	/// Audience the listing was scoped to.
	#[serde(default)]
	pub aud: String,
	/// Users on this page.
	#[serde(default)]
	pub users: Vec<User>,
}

impl AuthClient {
	/// `POST /admin/users`
	///
	/// Creates a user without any confirmation flow.
	pub async fn admin_create_user(&self, request: AdminCreateUserRequest) -> Result<User> {
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::POST, ADMIN_USERS_PATH, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `GET /admin/users`
	///
	/// Lists users page by page.
	pub async fn admin_list_users(
		&self,
		query: AdminListUsersQuery,
	) -> Result<AdminListUsersResponse> {
		let page = query.page.map(|value| value.to_string());
		let per_page = query.per_page.map(|value| value.to_string());
		let mut pairs = Vec::new();

		if let Some(value) = page.as_deref() {
			pairs.push(("page", value));
		}
		if let Some(value) = per_page.as_deref() {
			pairs.push(("per_page", value));
		}

		let outbound = self.build_request(Method::GET, ADMIN_USERS_PATH, &pairs, None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `GET /admin/users/{user_id}`
	///
	/// Fetches a single user by id.
	pub async fn admin_get_user(&self, user_id: Uuid) -> Result<User> {
		let path = format!("{ADMIN_USERS_PATH}/{user_id}");
		let outbound = self.build_request(Method::GET, &path, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `PUT /admin/users/{user_id}`
	///
	/// Updates a single user by id.
	pub async fn admin_update_user(&self, request: AdminUpdateUserRequest) -> Result<User> {
		let path = format!("{ADMIN_USERS_PATH}/{}", request.user_id);
		let body = Self::encode_body(&request)?;
		let outbound = self.build_request(Method::PUT, &path, &[], Some(body))?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_json(response).await
	}

	/// `DELETE /admin/users/{user_id}`
	///
	/// Deletes a single user by id.
	pub async fn admin_delete_user(&self, user_id: Uuid) -> Result<()> {
		let path = format!("{ADMIN_USERS_PATH}/{user_id}");
		let outbound = self.build_request(Method::DELETE, &path, &[], None)?;
		let response = self.send(outbound, RedirectMode::Follow).await?;

		self.expect_no_content(response).await
	}
}

// crates.io
use httpmock::prelude::*;
use serde_json::json;
use uuid::Uuid;
// self
use supabase_auth_client::{
	api::admin::{AdminCreateUserRequest, AdminListUsersQuery, AdminUpdateUserRequest},
	client::AuthClient,
	error::{ApiError, Error},
};

const API_KEY: &str = "test-anon-key";
const SERVICE_TOKEN: &str = "test-service-token";
const USER_ID: &str = "b54816a1-51b8-4597-8407-8ebd53a1e103";

fn client(server: &MockServer) -> AuthClient {
	AuthClient::with_base_url(&server.base_url(), API_KEY)
		.expect("Failed to build test client.")
		.with_token(SERVICE_TOKEN)
}

#[tokio::test]
async fn create_user_authenticates_with_the_service_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/admin/users")
				.header("apikey", API_KEY)
				.header("authorization", format!("Bearer {SERVICE_TOKEN}"))
				.json_body(json!({
					"email": "a@b.com",
					"password": "secret",
					"email_confirm": true,
					"phone_confirm": false
				}));
			then.status(200).json_body(json!({ "id": USER_ID, "email": "a@b.com" }));
		})
		.await;
	let user = client(&server)
		.admin_create_user(AdminCreateUserRequest {
			email: Some("a@b.com".into()),
			password: Some("secret".into()),
			email_confirm: true,
			..Default::default()
		})
		.await
		.expect("Admin user creation should succeed.");

	mock.assert_async().await;

	assert_eq!(user.id.to_string(), USER_ID);
	assert_eq!(user.email, "a@b.com");
}

#[tokio::test]
async fn list_users_forwards_pagination_as_query_parameters() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/admin/users")
				.query_param("page", "2")
				.query_param("per_page", "50");
			then.status(200).json_body(json!({
				"aud": "authenticated",
				"users": [{ "id": USER_ID, "email": "a@b.com" }]
			}));
		})
		.await;
	let listed = client(&server)
		.admin_list_users(AdminListUsersQuery { page: Some(2), per_page: Some(50) })
		.await
		.expect("Admin user listing should succeed.");

	mock.assert_async().await;

	assert_eq!(listed.aud, "authenticated");
	assert_eq!(listed.users.len(), 1);
	assert_eq!(listed.users[0].email, "a@b.com");
}

#[tokio::test]
async fn update_user_puts_against_the_id_path() {
	let server = MockServer::start_async().await;
	let user_id = USER_ID.parse::<Uuid>().expect("Failed to parse test user id.");
	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path(format!("/admin/users/{USER_ID}"))
				.json_body(json!({ "role": "service_role" }));
			then.status(200).json_body(json!({ "id": USER_ID, "role": "service_role" }));
		})
		.await;
	let user = client(&server)
		.admin_update_user(AdminUpdateUserRequest {
			user_id,
			role: Some("service_role".into()),
			..Default::default()
		})
		.await
		.expect("Admin user update should succeed.");

	mock.assert_async().await;

	assert_eq!(user.role, "service_role");
}

#[tokio::test]
async fn delete_user_accepts_an_empty_success() {
	let server = MockServer::start_async().await;
	let user_id = USER_ID.parse::<Uuid>().expect("Failed to parse test user id.");
	let mock = server
		.mock_async(|when, then| {
			when.method(DELETE).path(format!("/admin/users/{USER_ID}"));
			then.status(204);
		})
		.await;

	client(&server).admin_delete_user(user_id).await.expect("Admin user deletion should succeed.");
	mock.assert_async().await;
}

#[tokio::test]
async fn non_admin_tokens_classify_distinctly() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/admin/users");
			then.status(403).json_body(json!({
				"error_code": "not_admin",
				"msg": "User not allowed"
			}));
		})
		.await;
	let err = client(&server)
		.admin_list_users(AdminListUsersQuery::default())
		.await
		.expect_err("Listing without admin rights must fail.");

	assert!(matches!(err, Error::Api(ApiError::NotAdmin)));
}

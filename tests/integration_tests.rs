// Integration tests for the Supabase client and the workflows wired to it,
// running against mockito HTTP doubles.

use matchcircle_accounts::core::{IdentityProvider, ProfileStore};
use matchcircle_accounts::{
    AuthAction, AuthOutcome, CoreValue, CredentialFlow, Credentials, ProfileDraft, ProfileFlow,
    ProfileOutcome, ProfileRole, SupabaseClient,
};
use mockito::Matcher;
use std::sync::Arc;

fn client_for(server: &mockito::ServerGuard) -> SupabaseClient {
    SupabaseClient::new(server.url(), "anon-key".to_string(), "profiles".to_string())
}

#[tokio::test]
async fn test_sign_in_success_parses_session() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
        .match_header("apikey", "anon-key")
        .match_body(Matcher::Json(serde_json::json!({
            "email": "a@b.com",
            "password": "pw123",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"access_token":"jwt-token","token_type":"bearer","expires_in":3600,"user":{"id":"user-1","email":"a@b.com"}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let session = client
        .sign_in_with_password("a@b.com", "pw123")
        .await
        .expect("sign-in should succeed");

    assert_eq!(session.access_token, "jwt-token");
    assert_eq!(session.token_type, "bearer");
    assert_eq!(session.expires_in, Some(3600));
    assert_eq!(session.user_id, "user-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_in_failure_surfaces_gotrue_message_verbatim() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .sign_in_with_password("a@b.com", "wrong")
        .await
        .expect_err("sign-in should fail");

    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[tokio::test]
async fn test_sign_up_failure_uses_msg_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/v1/signup")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":422,"msg":"User already registered"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .sign_up("a@b.com", "pw123")
        .await
        .expect_err("sign-up should fail");

    assert_eq!(err.to_string(), "User already registered");
}

#[tokio::test]
async fn test_get_user_returns_none_for_unauthenticated_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/auth/v1/user")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":401,"msg":"invalid JWT"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let user = client
        .get_user("stale-token")
        .await
        .expect("401 is not a transport failure");

    assert!(user.is_none());
}

#[tokio::test]
async fn test_get_user_resolves_identity() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", "Bearer jwt-token")
        .match_header("apikey", "anon-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"user-1","email":"a@b.com"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let user = client
        .get_user("jwt-token")
        .await
        .expect("lookup should succeed")
        .expect("token should resolve to a user");

    assert_eq!(user.id, "user-1");
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_insert_profile_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/profiles")
        .match_header("authorization", "Bearer jwt-token")
        .match_header("apikey", "anon-key")
        .match_header("prefer", "return=minimal")
        .match_body(Matcher::Json(serde_json::json!({
            "user_id": "user-1",
            "name": "Al",
            "age": 30,
            "bio": "",
            "values": ["kind", "calm"],
            "is_for_someone_else": false,
            "role": "single",
        })))
        .with_status(201)
        .create_async()
        .await;

    let client = client_for(&server);
    let record = matchcircle_accounts::ProfileRecord {
        user_id: "user-1".to_string(),
        name: "Al".to_string(),
        age: 30,
        bio: String::new(),
        values: [CoreValue::Kind, CoreValue::Calm].into_iter().collect(),
        is_for_someone_else: false,
        role: ProfileRole::Single,
    };

    client
        .insert_profile("jwt-token", &record)
        .await
        .expect("insert should succeed");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_insert_failure_surfaces_postgrest_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/rest/v1/profiles")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"code":"23505","message":"duplicate key value violates unique constraint \"profiles_user_id_key\""}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let record = matchcircle_accounts::ProfileRecord {
        user_id: "user-1".to_string(),
        name: "Al".to_string(),
        age: 30,
        bio: String::new(),
        values: Default::default(),
        is_for_someone_else: false,
        role: ProfileRole::Single,
    };

    let err = client
        .insert_profile("jwt-token", &record)
        .await
        .expect_err("insert should fail");

    assert_eq!(
        err.to_string(),
        "duplicate key value violates unique constraint \"profiles_user_id_key\""
    );
}

#[tokio::test]
async fn test_credential_flow_end_to_end_against_provider() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
        .create_async()
        .await;

    let client = Arc::new(client_for(&server));
    let flow = CredentialFlow::new(client as Arc<dyn IdentityProvider>);

    let outcome = flow
        .submit(AuthAction::SignIn, Credentials::new("a@b.com", "pw123"))
        .await;

    match outcome {
        AuthOutcome::Failed { message } => assert_eq!(message, "Invalid login credentials"),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(!flow.in_flight());
}

#[tokio::test]
async fn test_profile_flow_end_to_end_against_provider() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/auth/v1/user")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"user-1","email":"a@b.com"}"#)
        .create_async()
        .await;
    let insert_mock = server
        .mock("POST", "/rest/v1/profiles")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "user_id": "user-1",
            "name": "Al",
            "age": 30,
        })))
        .with_status(201)
        .create_async()
        .await;

    let client = Arc::new(client_for(&server));
    let flow = ProfileFlow::new(
        client.clone() as Arc<dyn IdentityProvider>,
        client as Arc<dyn ProfileStore>,
    );

    let draft = ProfileDraft {
        name: "Al".to_string(),
        age: Some(30),
        ..ProfileDraft::default()
    };

    let outcome = flow.submit(Some("jwt-token"), draft).await;

    match outcome {
        ProfileOutcome::Succeeded { user_id, redirect } => {
            assert_eq!(user_id, "user-1");
            assert_eq!(redirect, "/");
        }
        other => panic!("expected Succeeded, got {:?}", other),
    }
    insert_mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthenticated_profile_flow_never_touches_the_store() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/auth/v1/user")
        .with_status(401)
        .with_body(r#"{"code":401,"msg":"invalid JWT"}"#)
        .create_async()
        .await;
    // Expect zero hits on the profiles table.
    let insert_mock = server
        .mock("POST", "/rest/v1/profiles")
        .expect(0)
        .create_async()
        .await;

    let client = Arc::new(client_for(&server));
    let flow = ProfileFlow::new(
        client.clone() as Arc<dyn IdentityProvider>,
        client as Arc<dyn ProfileStore>,
    );

    let draft = ProfileDraft {
        name: "Al".to_string(),
        age: Some(30),
        ..ProfileDraft::default()
    };

    let outcome = flow.submit(Some("stale-token"), draft).await;

    assert!(matches!(outcome, ProfileOutcome::Rejected { .. }));
    insert_mock.assert_async().await;
}

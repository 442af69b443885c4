use crate::core::providers::{IdentityProvider, ProfileStore, ProviderError};
use crate::models::{AuthenticatedUser, ProfileRecord, Session};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Provider-supplied error text. Display is the raw message so callers
    /// can surface it to the user verbatim.
    #[error("{0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase API client
///
/// Handles all communication with the hosted backend:
/// - Credential verification and session issuance (GoTrue, `/auth/v1`)
/// - Current-user lookup for the profile auth guard
/// - Profile record inserts (PostgREST, `/rest/v1`)
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    profiles_table: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, anon_key: String, profiles_table: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            anon_key,
            profiles_table,
            client,
        }
    }

    /// Verify credentials against GoTrue and return the issued session
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SupabaseError> {
        let url = format!(
            "{}/auth/v1/token?grant_type=password",
            self.base_url.trim_end_matches('/')
        );

        tracing::debug!(%email, "signing in via {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(extract_error_message(response).await));
        }

        let json: Value = response.json().await?;

        let access_token = json
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| SupabaseError::InvalidResponse("Missing access_token".into()))?
            .to_string();
        let token_type = json
            .get("token_type")
            .and_then(|t| t.as_str())
            .unwrap_or("bearer")
            .to_string();
        let expires_in = json.get("expires_in").and_then(|t| t.as_u64());
        let user_id = json
            .get("user")
            .and_then(|u| u.get("id"))
            .and_then(|id| id.as_str())
            .ok_or_else(|| SupabaseError::InvalidResponse("Missing user id".into()))?
            .to_string();

        Ok(Session {
            access_token,
            token_type,
            expires_in,
            user_id,
        })
    }

    /// Register a new account. GoTrue does not sign the user in here.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), SupabaseError> {
        let url = format!("{}/auth/v1/signup", self.base_url.trim_end_matches('/'));

        tracing::debug!(%email, "signing up via {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(extract_error_message(response).await));
        }

        Ok(())
    }

    /// Resolve the identity behind an access token
    ///
    /// Returns `Ok(None)` when the token is not an authenticated session
    /// (GoTrue answers 401/403), which the profile workflow treats as the
    /// missing-session case.
    pub async fn get_user(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthenticatedUser>, SupabaseError> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                return Err(SupabaseError::ApiError(extract_error_message(response).await));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        let id = json
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| SupabaseError::InvalidResponse("Missing user id".into()))?
            .to_string();
        let email = json
            .get("email")
            .and_then(|e| e.as_str())
            .map(str::to_string);

        Ok(Some(AuthenticatedUser { id, email }))
    }

    /// Insert a single profile record through PostgREST
    pub async fn insert_profile(
        &self,
        access_token: &str,
        record: &ProfileRecord,
    ) -> Result<(), SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.profiles_table
        );

        tracing::debug!(user_id = %record.user_id, "inserting profile via {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(access_token)
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(extract_error_message(response).await));
        }

        Ok(())
    }
}

/// Pull the human-readable error text out of a GoTrue/PostgREST error body.
///
/// GoTrue uses `error_description` or `msg`, PostgREST uses `message`; the
/// HTTP status is the fallback when the body carries none of them.
async fn extract_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(json) = serde_json::from_str::<Value>(&body) {
        for key in ["error_description", "msg", "message"] {
            if let Some(message) = json.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }

    format!("Request failed with status {}", status)
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ProviderError> {
        SupabaseClient::sign_in_with_password(self, email, password)
            .await
            .map_err(|e| ProviderError::new(e.to_string()))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ProviderError> {
        SupabaseClient::sign_up(self, email, password)
            .await
            .map_err(|e| ProviderError::new(e.to_string()))
    }

    async fn get_user(
        &self,
        access_token: &str,
    ) -> Result<Option<AuthenticatedUser>, ProviderError> {
        SupabaseClient::get_user(self, access_token)
            .await
            .map_err(|e| ProviderError::new(e.to_string()))
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn insert_profile(
        &self,
        access_token: &str,
        record: &ProfileRecord,
    ) -> Result<(), ProviderError> {
        SupabaseClient::insert_profile(self, access_token, record)
            .await
            .map_err(|e| ProviderError::new(e.to_string()))
    }
}

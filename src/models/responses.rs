use crate::models::domain::Session;
use serde::{Deserialize, Serialize};

/// Response for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub session: Session,
    /// Path the client should navigate to.
    pub redirect: String,
}

/// Response for a successful signup (no auto-login; the user signs in separately)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Response for a successful profile creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCreatedResponse {
    pub user_id: String,
    /// Path the client should navigate to.
    pub redirect: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

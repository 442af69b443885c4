use crate::models::domain::{CoreValue, ProfileRole};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for both credential actions (login and signup share a form).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to create a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub age: u16,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub values: Vec<CoreValue>,
    #[serde(default)]
    #[serde(alias = "is_for_someone_else", rename = "isForSomeoneElse")]
    pub is_for_someone_else: bool,
    #[serde(default)]
    pub role: ProfileRole,
}

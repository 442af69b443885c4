//! MatchCircle Accounts - account and profile onboarding service
//!
//! This library backs the MatchCircle dating app's two onboarding screens:
//! the login/signup form and the profile-creation form. Credential
//! verification, session issuance, and profile persistence are delegated to
//! the hosted Supabase backend; the workflows here handle form validation,
//! the auth guard, single-flight submission, and success/failure branching.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    AuthAction, AuthOutcome, CredentialFlow, IdentityProvider, ProfileFlow, ProfileOutcome,
    ProfileStore, SubmissionState, DEFAULT_VIEW, LOGIN_REQUIRED_MESSAGE, SIGNUP_SUCCESS_MESSAGE,
};
pub use models::{
    CoreValue, Credentials, ProfileDraft, ProfileRecord, ProfileRole, Session, ValueSelection,
};
pub use services::{SupabaseClient, SupabaseError};

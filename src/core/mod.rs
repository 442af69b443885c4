// Core workflow exports
pub mod credential_flow;
pub mod profile_flow;
pub mod providers;

pub use credential_flow::{
    AuthAction, AuthOutcome, CredentialFlow, SubmissionState, SIGNUP_SUCCESS_MESSAGE,
};
pub use profile_flow::{ProfileFlow, ProfileOutcome, LOGIN_REQUIRED_MESSAGE};
pub use providers::{IdentityProvider, ProfileStore, ProviderError};

/// Path of the application's default view, navigated to on success paths.
pub const DEFAULT_VIEW: &str = "/";

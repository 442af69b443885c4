// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AuthenticatedUser, CoreValue, Credentials, ProfileDraft, ProfileRecord, ProfileRole, Session,
    ValueSelection,
};
pub use requests::{CreateProfileRequest, CredentialsRequest};
pub use responses::{
    ErrorResponse, HealthResponse, LoginResponse, ProfileCreatedResponse, SignupResponse,
};

use crate::models::{AuthenticatedUser, ProfileRecord, Session};
use async_trait::async_trait;
use thiserror::Error;

/// Error returned by an external collaborator.
///
/// Display is the provider-supplied text so it can be surfaced to the user
/// verbatim, without categorization or localization.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// External identity provider: credential verification and session issuance.
///
/// Injected into the workflows rather than reached through a global handle so
/// tests can substitute an in-memory double.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and establish a session.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, ProviderError>;

    /// Register a new account. Does not sign the user in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), ProviderError>;

    /// Resolve the identity behind an access token.
    ///
    /// `Ok(None)` means the token does not belong to an authenticated user;
    /// `Err` is reserved for transport-level failures.
    async fn get_user(&self, access_token: &str)
        -> Result<Option<AuthenticatedUser>, ProviderError>;
}

/// External persistence for profile records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a single profile record on behalf of the token's owner.
    async fn insert_profile(
        &self,
        access_token: &str,
        record: &ProfileRecord,
    ) -> Result<(), ProviderError>;
}

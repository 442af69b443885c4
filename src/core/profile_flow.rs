use crate::core::providers::{IdentityProvider, ProfileStore};
use crate::core::DEFAULT_VIEW;
use crate::models::{ProfileDraft, ProfileRecord};
use std::sync::Arc;

/// Message shown when profile submission is attempted without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to create a profile.";

/// Result of one profile submission.
///
/// `Failed` hands the draft back untouched so the caller can retry with the
/// form contents preserved.
#[derive(Debug, Clone)]
pub enum ProfileOutcome {
    /// Validation or the auth guard stopped the submission; no write was issued.
    Rejected { message: String },
    /// The record was persisted; the caller navigates to `redirect`.
    Succeeded {
        user_id: String,
        redirect: &'static str,
    },
    /// The provider refused the insert; `message` is its text, verbatim.
    Failed {
        message: String,
        draft: ProfileDraft,
    },
}

/// Profile submission workflow behind the profile-creation screen.
///
/// Runs validate → auth guard → single insert. Unlike [`CredentialFlow`],
/// this workflow carries no in-flight guard, matching the behavior it was
/// specified from; rapid duplicate submissions can each reach the store.
///
/// [`CredentialFlow`]: crate::core::credential_flow::CredentialFlow
pub struct ProfileFlow {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
}

impl ProfileFlow {
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn ProfileStore>) -> Self {
        Self { identity, store }
    }

    /// Validate the draft, check for an authenticated user, and issue exactly
    /// one insert. `access_token` is the caller's session token, if any.
    pub async fn submit(&self, access_token: Option<&str>, draft: ProfileDraft) -> ProfileOutcome {
        // Validating: a non-empty name and a numeric age are required.
        // No business-rule validation (age range, bio length) is applied.
        if draft.name.trim().is_empty() {
            return ProfileOutcome::Rejected {
                message: "Name is required.".to_string(),
            };
        }
        let age = match draft.age {
            Some(age) => age,
            None => {
                return ProfileOutcome::Rejected {
                    message: "Age is required.".to_string(),
                }
            }
        };

        // Auth guard: no authenticated user means no write of any kind.
        let token = match access_token {
            Some(token) => token,
            None => {
                return ProfileOutcome::Rejected {
                    message: LOGIN_REQUIRED_MESSAGE.to_string(),
                }
            }
        };
        let user = match self.identity.get_user(token).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return ProfileOutcome::Rejected {
                    message: LOGIN_REQUIRED_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                // The original treats a failed identity lookup the same as no
                // session: reject without writing.
                tracing::warn!("identity lookup failed during profile submission: {}", e);
                return ProfileOutcome::Rejected {
                    message: LOGIN_REQUIRED_MESSAGE.to_string(),
                };
            }
        };

        let record = ProfileRecord {
            user_id: user.id.clone(),
            name: draft.name.clone(),
            age,
            bio: draft.bio.clone(),
            values: draft.values.clone(),
            is_for_someone_else: draft.is_for_someone_else,
            role: draft.role,
        };

        match self.store.insert_profile(token, &record).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "profile created");
                ProfileOutcome::Succeeded {
                    user_id: user.id,
                    redirect: DEFAULT_VIEW,
                }
            }
            Err(e) => {
                tracing::info!(user_id = %user.id, "profile insert rejected: {}", e);
                ProfileOutcome::Failed {
                    message: e.to_string(),
                    draft,
                }
            }
        }
    }
}

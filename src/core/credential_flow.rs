use crate::core::providers::IdentityProvider;
use crate::core::DEFAULT_VIEW;
use crate::models::{Credentials, Session};
use std::sync::{Arc, Mutex};

/// Message shown after a successful registration. There is no auto-login;
/// the user signs in separately.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful! You can now log in.";

/// Where a submission currently stands.
///
/// The flow is re-submittable from every state except `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// The two mutually exclusive credential actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    SignIn,
    SignUp,
}

/// Result of one credential submission.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// Sign-in succeeded; the caller navigates to `redirect`.
    SignedIn {
        session: Session,
        redirect: &'static str,
    },
    /// Sign-up succeeded; the user is told to log in, no session is issued.
    SignupComplete { message: &'static str },
    /// The provider rejected the request; `message` is its text, verbatim.
    Failed { message: String },
    /// Another submission was already in flight; nothing was sent.
    InFlight,
}

/// Credential submission workflow behind the login/signup screen.
///
/// Exactly one of the two provider operations runs per submission, and a
/// single-flight guard makes a submission issued while another is pending a
/// no-op. The guard clears unconditionally when the pending call settles.
pub struct CredentialFlow {
    provider: Arc<dyn IdentityProvider>,
    state: Mutex<SubmissionState>,
    last_error: Mutex<Option<String>>,
}

impl CredentialFlow {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(SubmissionState::Idle),
            last_error: Mutex::new(None),
        }
    }

    /// Current state of the flow.
    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap()
    }

    /// Whether a submission is currently pending.
    pub fn in_flight(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    /// The provider message from the most recent failed submission, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }

    /// Run one credential action to completion.
    pub async fn submit(&self, action: AuthAction, credentials: Credentials) -> AuthOutcome {
        if !self.try_begin() {
            tracing::debug!(email = %credentials.email, "credential submission ignored, request already in flight");
            return AuthOutcome::InFlight;
        }

        let outcome = match action {
            AuthAction::SignIn => self.sign_in(&credentials).await,
            AuthAction::SignUp => self.sign_up(&credentials).await,
        };

        self.settle(&outcome);
        outcome
    }

    async fn sign_in(&self, credentials: &Credentials) -> AuthOutcome {
        match self
            .provider
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await
        {
            Ok(session) => {
                tracing::info!(user_id = %session.user_id, "sign-in succeeded");
                AuthOutcome::SignedIn {
                    session,
                    redirect: DEFAULT_VIEW,
                }
            }
            Err(e) => {
                tracing::info!(email = %credentials.email, "sign-in rejected: {}", e);
                AuthOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> AuthOutcome {
        match self
            .provider
            .sign_up(&credentials.email, &credentials.password)
            .await
        {
            Ok(()) => {
                tracing::info!(email = %credentials.email, "sign-up succeeded");
                AuthOutcome::SignupComplete {
                    message: SIGNUP_SUCCESS_MESSAGE,
                }
            }
            Err(e) => {
                tracing::info!(email = %credentials.email, "sign-up rejected: {}", e);
                AuthOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Atomically claim the in-flight slot. Returns false if already taken.
    fn try_begin(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if *state == SubmissionState::Submitting {
            return false;
        }
        *state = SubmissionState::Submitting;
        self.last_error.lock().unwrap().take();
        true
    }

    /// Clear the in-flight guard and record the terminal state.
    fn settle(&self, outcome: &AuthOutcome) {
        let mut state = self.state.lock().unwrap();
        match outcome {
            AuthOutcome::SignedIn { .. } | AuthOutcome::SignupComplete { .. } => {
                *state = SubmissionState::Succeeded;
            }
            AuthOutcome::Failed { message } => {
                *state = SubmissionState::Failed;
                *self.last_error.lock().unwrap() = Some(message.clone());
            }
            // settle is only reached for submissions that ran.
            AuthOutcome::InFlight => {}
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Email/password pair collected from the login screen.
///
/// Transient: held only until the submission settles, never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Session issued by the identity provider on sign-in.
///
/// The access token is opaque to this service; it is handed back to the
/// provider on subsequent calls and never inspected locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user_id: String,
}

/// The currently authenticated identity, as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Closed vocabulary of core values a profile can select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreValue {
    Kind,
    Funny,
    Ambitious,
    Calm,
    Adventurous,
}

impl CoreValue {
    /// The full vocabulary, in display order.
    pub const ALL: [CoreValue; 5] = [
        CoreValue::Kind,
        CoreValue::Funny,
        CoreValue::Ambitious,
        CoreValue::Calm,
        CoreValue::Adventurous,
    ];
}

/// Unordered selection over the core-value vocabulary.
///
/// Toggling is idempotent per element: toggle selects an absent value and
/// deselects a present one, so toggling twice restores the original set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSelection(BTreeSet<CoreValue>);

impl ValueSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` if absent, deselect it if present.
    pub fn toggle(&mut self, value: CoreValue) {
        if !self.0.insert(value) {
            self.0.remove(&value);
        }
    }

    pub fn contains(&self, value: CoreValue) -> bool {
        self.0.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CoreValue> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<CoreValue> for ValueSelection {
    fn from_iter<I: IntoIterator<Item = CoreValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Who the profile is being created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRole {
    Single,
    Matchmaker,
    Both,
}

impl Default for ProfileRole {
    fn default() -> Self {
        ProfileRole::Single
    }
}

/// Form contents of the profile-creation screen, prior to validation.
///
/// Age is optional here because the form may not have a numeric value yet;
/// validation requires it before submission.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub age: Option<u16>,
    pub bio: String,
    pub values: ValueSelection,
    pub is_for_someone_else: bool,
    pub role: ProfileRole,
}

/// Profile record as persisted by the hosted backend.
///
/// Invariant: `user_id` is the id of the authenticated user at creation time;
/// the workflow refuses to build one without a live session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: String,
    pub name: String,
    pub age: u16,
    pub bio: String,
    pub values: ValueSelection,
    pub is_for_someone_else: bool,
    pub role: ProfileRole,
}

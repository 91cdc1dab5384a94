use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a freshly created session (60 minutes)
pub const SESSION_DURATION_MS: i64 = 60 * 60 * 1000;

/// The authenticated (or anonymous) client record.
///
/// Field names serialize in camelCase so the persisted record keeps the
/// `{id, email?, isAnonymous, hasCompletedQuiz, sessionExpiry}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_anonymous: bool,
    pub has_completed_quiz: bool,
    /// Absolute expiry in epoch milliseconds
    pub session_expiry: i64,
}

impl Session {
    /// Starts a new session with a random id that expires `SESSION_DURATION_MS` after `now`.
    ///
    /// The id is only ever displayed; it is not an authorization token.
    pub fn start(request: &LoginRequest, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: if request.anonymous {
                None
            } else {
                request.email.clone()
            },
            is_anonymous: request.anonymous,
            has_completed_quiz: request.has_completed_quiz,
            session_expiry: now.saturating_add(SESSION_DURATION_MS),
        }
    }

    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.session_expiry
    }

    /// Milliseconds left before expiry, zero once expired
    pub fn remaining_ms(&self, now: i64) -> i64 {
        self.session_expiry.saturating_sub(now).max(0)
    }

    /// Label shown in the header
    pub fn display_name(&self) -> &str {
        match (&self.email, self.is_anonymous) {
            (Some(email), false) => email,
            _ => "Anonymous Session",
        }
    }
}

/// Input to a login action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub anonymous: bool,
    /// Callers that already know the quiz is done can skip straight to the dashboard
    pub has_completed_quiz: bool,
}

impl LoginRequest {
    pub fn email<S: Into<String>>(email: S) -> Self {
        Self {
            email: Some(email.into()),
            anonymous: false,
            has_completed_quiz: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            email: None,
            anonymous: true,
            has_completed_quiz: false,
        }
    }

    pub fn with_completed_quiz(mut self, done: bool) -> Self {
        self.has_completed_quiz = done;
        self
    }
}

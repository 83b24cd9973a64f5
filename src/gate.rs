use crate::dataset::PasswordTable;
use serde::Serialize;

/// Matches the limit of the password field in the viewer UI.
pub const MAX_PASSWORD_CHARS: usize = 30;

/// Authentication is scoped to exactly one class at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    AuthenticatedFor(String),
}

impl AuthState {
    pub fn is_authenticated_for(&self, class_id: &str) -> bool {
        matches!(self, AuthState::AuthenticatedFor(c) if c == class_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOutcome {
    Success,
    Failure,
    AlreadyAuthenticated,
    NotAuthenticated,
}

impl AuthOutcome {
    pub fn granted(self) -> bool {
        matches!(self, AuthOutcome::Success | AuthOutcome::AlreadyAuthenticated)
    }

    pub fn message(self, class_id: &str) -> String {
        match self {
            AuthOutcome::Success => format!("class {class_id} authenticated"),
            AuthOutcome::Failure => "incorrect password; please check and try again".to_string(),
            AuthOutcome::AlreadyAuthenticated => format!("class {class_id} is authenticated"),
            AuthOutcome::NotAuthenticated => {
                "select a class and submit its password first".to_string()
            }
        }
    }
}

/// Class switch transition: any class other than the authenticated one
/// forfeits authentication.
pub fn select(prior: AuthState, selected_class: &str) -> AuthState {
    if prior.is_authenticated_for(selected_class) {
        prior
    } else {
        AuthState::Unauthenticated
    }
}

/// `submitted` is `Some` only when the caller asked for a password check.
pub fn authenticate(
    selected_class: &str,
    submitted: Option<&str>,
    passwords: &PasswordTable,
    prior: AuthState,
) -> (AuthState, AuthOutcome) {
    let prior = select(prior, selected_class);

    let Some(submitted) = submitted else {
        return match prior {
            AuthState::AuthenticatedFor(_) => (prior, AuthOutcome::AlreadyAuthenticated),
            AuthState::Unauthenticated => (prior, AuthOutcome::NotAuthenticated),
        };
    };

    // An empty configured password locks the class, even for an empty submission.
    let real = passwords.get(selected_class);
    if !real.is_empty() && submitted == real {
        (
            AuthState::AuthenticatedFor(selected_class.to_string()),
            AuthOutcome::Success,
        )
    } else {
        (AuthState::Unauthenticated, AuthOutcome::Failure)
    }
}

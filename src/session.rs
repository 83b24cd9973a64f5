use crate::dataset::{Dataset, StudentRecord};
use crate::gate::{self, AuthOutcome, AuthState, MAX_PASSWORD_CHARS};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown session: {0}")]
    UnknownSession(String),
    #[error("unknown class: {0}")]
    UnknownClass(String),
    #[error("no class selected")]
    NoClassSelected,
    #[error("select a class and submit its password first")]
    NotAuthenticated,
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
    #[error("student not found: {0}")]
    UnknownStudent(String),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::UnknownSession(_) => "unknown_session",
            SessionError::UnknownClass(_) | SessionError::UnknownStudent(_) => "not_found",
            SessionError::NoClassSelected | SessionError::NotAuthenticated => "not_authenticated",
            SessionError::PasswordTooLong { .. } => "bad_params",
        }
    }
}

/// One viewer: its class selection and the authentication tied to it.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    selected_class: Option<String>,
    auth: AuthState,
    opened_at: DateTime<Utc>,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn is_authenticated(&self) -> bool {
        self.selected_class
            .as_deref()
            .is_some_and(|c| self.auth.is_authenticated_for(c))
    }

    pub fn select(&mut self, dataset: &Dataset, class_id: &str) -> Result<(), SessionError> {
        if !dataset.contains_class(class_id) {
            return Err(SessionError::UnknownClass(class_id.to_string()));
        }
        self.auth = gate::select(std::mem::take(&mut self.auth), class_id);
        self.selected_class = Some(class_id.to_string());
        Ok(())
    }

    /// Outcome without a password check.
    pub fn status(&mut self, dataset: &Dataset) -> AuthOutcome {
        let Some(class_id) = self.selected_class.clone() else {
            return AuthOutcome::NotAuthenticated;
        };
        self.run_gate(dataset, &class_id, None)
    }

    pub fn authenticate(
        &mut self,
        dataset: &Dataset,
        password: &str,
    ) -> Result<AuthOutcome, SessionError> {
        if password.chars().count() > MAX_PASSWORD_CHARS {
            return Err(SessionError::PasswordTooLong {
                max: MAX_PASSWORD_CHARS,
            });
        }
        let Some(class_id) = self.selected_class.clone() else {
            return Err(SessionError::NoClassSelected);
        };
        let outcome = self.run_gate(dataset, &class_id, Some(password));
        match outcome {
            AuthOutcome::Success => {
                tracing::info!(session = %self.id, class = %class_id, "class authenticated")
            }
            _ => tracing::info!(session = %self.id, class = %class_id, "authentication failed"),
        }
        Ok(outcome)
    }

    fn run_gate(
        &mut self,
        dataset: &Dataset,
        class_id: &str,
        submitted: Option<&str>,
    ) -> AuthOutcome {
        let (next, outcome) = gate::authenticate(
            class_id,
            submitted,
            dataset.passwords(),
            std::mem::take(&mut self.auth),
        );
        self.auth = next;
        outcome
    }

    /// The selected class's roster, only once that class is authenticated.
    pub fn authorized_roster<'d>(
        &self,
        dataset: &'d Dataset,
    ) -> Result<(&'d str, &'d [StudentRecord]), SessionError> {
        let Some(class_id) = self.selected_class.as_deref() else {
            return Err(SessionError::NoClassSelected);
        };
        if !self.auth.is_authenticated_for(class_id) {
            return Err(SessionError::NotAuthenticated);
        }
        let class_id = dataset
            .classes()
            .iter()
            .map(String::as_str)
            .find(|c| *c == class_id)
            .ok_or_else(|| SessionError::UnknownClass(class_id.to_string()))?;
        Ok((class_id, dataset.roster(class_id).unwrap_or(&[])))
    }
}

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// A known `preferred` class becomes the selection; otherwise the first
    /// class in sorted order.
    pub fn open(&mut self, dataset: &Dataset, preferred: Option<&str>) -> &Session {
        let selected_class = preferred
            .filter(|c| dataset.contains_class(c))
            .map(str::to_string)
            .or_else(|| dataset.classes().first().cloned());
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, class = ?selected_class, "session opened");
        self.sessions.entry(id).or_insert(Session {
            id,
            selected_class,
            auth: AuthState::Unauthenticated,
            opened_at: Utc::now(),
        })
    }

    pub fn get(&self, session_id: &str) -> Result<&Session, SessionError> {
        parse_session_id(session_id)
            .and_then(|id| self.sessions.get(&id))
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))
    }

    pub fn get_mut(&mut self, session_id: &str) -> Result<&mut Session, SessionError> {
        parse_session_id(session_id)
            .and_then(|id| self.sessions.get_mut(&id))
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))
    }

    pub fn close(&mut self, session_id: &str) -> bool {
        parse_session_id(session_id)
            .and_then(|id| self.sessions.remove(&id))
            .is_some()
    }
}

fn parse_session_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

use pollemic_domain::ID;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: ID,
    #[serde(default)]
    pub email: Option<String>,
}

/// The signed in staff member, as seen by the SDK.
///
/// Token storage and refresh belong to whoever implements this.
pub trait Session: Send + Sync {
    fn current_user(&self) -> Option<CurrentUser>;

    fn bearer_token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    fn logout(&self);
}

struct SessionState {
    user: Option<CurrentUser>,
    token: Option<String>,
}

/// In-memory session with a fixed token
pub struct StaticSession {
    state: RwLock<SessionState>,
}

impl StaticSession {
    pub fn new(token: Option<String>, user: Option<CurrentUser>) -> Self {
        Self {
            state: RwLock::new(SessionState { user, token }),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None, None)
    }
}

impl Session for StaticSession {
    fn current_user(&self) -> Option<CurrentUser> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    fn bearer_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    fn logout(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.user = None;
        state.token = None;
    }
}

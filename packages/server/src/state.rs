//! Shared application state

use std::sync::Arc;

use authlab_auth::{SessionStore, UserStore};
use authlab_token::TokenService;

/// State handed to every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    tokens: Arc<TokenService>,
    users: Arc<UserStore>,
    sessions: Arc<SessionStore>,
}

impl AppState {
    /// Builds the state from its services.
    pub fn new(tokens: TokenService, users: UserStore, sessions: SessionStore) -> Self {
        Self {
            tokens: Arc::new(tokens),
            users: Arc::new(users),
            sessions: Arc::new(sessions),
        }
    }

    /// Token issuer and verifier.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// User directory.
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Cookie session store.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }
}

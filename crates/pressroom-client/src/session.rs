//! Session accessor handed to the client.
//!
//! Token storage belongs to whoever embeds the client (cookies, a desktop
//! store, a config file). The client only reads through [`SessionProvider`].

use std::sync::{PoisonError, RwLock};

use pressroom_common::models::SessionUser;

/// Read access to the current credentials.
pub trait SessionProvider: Send + Sync {
    /// Session token sent as `x-access-token`.
    fn token(&self) -> Option<String>;
    /// The signed-in user, if any.
    fn user(&self) -> Option<SessionUser>;
}

/// Credentials held for the session.
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

/// In-memory [`SessionProvider`].
#[derive(Debug, Default)]
pub struct MemorySession {
    inner: RwLock<Session>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(token: impl Into<String>, user: SessionUser) -> Self {
        let session = Self::new();
        session.sign_in(token, user);
        session
    }

    pub fn sign_in(&self, token: impl Into<String>, user: SessionUser) {
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        session.token = Some(token.into());
        session.user = Some(user);
    }

    pub fn sign_out(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
    }

    /// Convenience: clone the session for use in async contexts.
    pub fn snapshot(&self) -> Session {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.snapshot().token.filter(|t| !t.is_empty())
    }

    fn user(&self) -> Option<SessionUser> {
        self.snapshot().user
    }
}

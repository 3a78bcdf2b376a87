use std::fmt;

use subtle::ConstantTimeEq;
use tracing::{info, warn};

use phototrack_api_structs::LoginPayload;

use super::{Database, Error};
use crate::models::sessions::{Session, SessionId};

/// Decides whether a credential pair may open a session.
pub trait Authenticator: fmt::Debug + Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Lets every well-formed credential pair in.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyCredentials;

impl Authenticator for AnyCredentials {
    fn authenticate(&self, _username: &str, _password: &str) -> bool {
        true
    }
}

/// A single configured login.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        StaticCredentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        let username_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let password_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (username_ok & password_ok).into()
    }
}

#[async_trait::async_trait]
pub trait SessionProvider {
    /// Opens a session, or returns `None` when the credentials are refused.
    async fn open_session(&self, login: &LoginPayload) -> Result<Option<SessionId>, Error>;

    async fn get_session(&self, session_id: &str) -> Option<Session>;

    async fn list_session_ids(&self) -> Vec<SessionId>;

    async fn close_session(&self, session_id: &str) -> Option<Session>;
}

#[async_trait::async_trait]
impl SessionProvider for Database {
    async fn open_session(&self, login: &LoginPayload) -> Result<Option<SessionId>, Error> {
        if !self
            .authenticator
            .authenticate(&login.username, &login.password)
        {
            warn!(username = %login.username, "Bad user credentials");
            return Ok(None);
        }

        let session_id = self
            .sessions
            .write()
            .await
            .create(login.username.clone())?;
        info!(%session_id, username = %login.username, "Opened session");

        Ok(Some(session_id))
    }

    async fn get_session(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().await.get(session_id)
    }

    async fn list_session_ids(&self) -> Vec<SessionId> {
        self.sessions.read().await.ids()
    }

    async fn close_session(&self, session_id: &str) -> Option<Session> {
        let closed = self.sessions.write().await.remove(session_id);
        if closed.is_some() {
            info!(%session_id, "Closed session");
        }
        closed
    }
}

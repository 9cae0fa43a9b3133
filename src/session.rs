use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token grant returned by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: SessionUser,
}

/// Snapshot of "is a user present", handed to views when they are built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_present(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> Option<SessionUser>;

    /// Email/password sign-in. Rejections carry the provider's message.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn session(&self) -> Session {
        Session {
            user: self.current_user().await,
        }
    }
}

/// Single-account provider for the local backend.
///
/// With no configured credentials every sign-in is rejected.
pub struct LocalSessionProvider {
    credentials: Option<(String, String)>,
    user: RwLock<Option<SessionUser>>,
}

impl LocalSessionProvider {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        let credentials = match (email, password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        };
        Self {
            credentials,
            user: RwLock::new(None),
        }
    }
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    async fn current_user(&self) -> Option<SessionUser> {
        self.user.read().await.clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let Some((expected_email, expected_password)) = &self.credentials else {
            return Err(AuthError::Rejected("Sign-in is disabled for this site".to_string()));
        };

        if !email.eq_ignore_ascii_case(expected_email) || password != expected_password {
            tracing::warn!(email, "[sign_in] rejected");
            return Err(AuthError::Rejected("Invalid login credentials".to_string()));
        }

        let user = SessionUser {
            id: "local-admin".to_string(),
            email: Some(expected_email.clone()),
        };
        *self.user.write().await = Some(user.clone());
        tracing::info!(email, "[sign_in] session started");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.user.write().await = None;
        Ok(())
    }
}

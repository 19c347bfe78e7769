//! Operator session context
//!
//! Holds the bearer token, the operator identity reported by the backend
//! and a few UI preferences. Every HTTP client reads the token from here;
//! nothing else stores auth state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use shared::page::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Console preferences that survive restarts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Merge upcoming discounts into dealer/product views
    #[serde(default)]
    pub include_upcoming: bool,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            include_upcoming: false,
        }
    }
}

/// Session state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<UserInfo>,
    #[serde(default)]
    preferences: UiPreferences,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<UserInfo>) {
        self.user = user;
    }

    pub fn preferences(&self) -> &UiPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut UiPreferences {
        &mut self.preferences
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Permissions of the current operator (empty when signed out)
    pub fn permissions(&self) -> &[String] {
        self.user
            .as_ref()
            .map(|u| u.permissions.as_slice())
            .unwrap_or(&[])
    }

    /// Forget token and identity, keep preferences
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Shared, cloneable handle to the session
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Current bearer token
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token().map(str::to_string)
    }

    pub async fn set_token(&self, token: Option<String>) {
        self.inner.write().await.set_token(token);
    }

    pub async fn preferences(&self) -> UiPreferences {
        self.inner.read().await.preferences().clone()
    }

    /// Mutate the session in place
    pub async fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }
}

/// JSON file persistence for [`Session`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the stored session, or an empty one when no file exists
    pub fn load(&self) -> Result<Session, SessionError> {
        if !self.file_path.exists() {
            return Ok(Session::default());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(path = %self.file_path.display(), "Session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}

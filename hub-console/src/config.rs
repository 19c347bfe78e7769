//! Console configuration
//!
//! Values come from the environment (a `.env` file is loaded first by the
//! binary); CLI flags override them.

use std::path::PathBuf;
use std::time::Duration;

use hub_client::ClientConfig;
use hub_client::config::DEFAULT_TIMEOUT_SECS;
use shared::page::DEFAULT_PAGE_SIZE;

use crate::debounce::DEFAULT_DEBOUNCE_MS;

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend API base URL (env: HUB_API_URL)
    pub api_url: String,
    /// Request timeout in seconds (env: HUB_API_TIMEOUT_SECS)
    pub timeout_secs: u64,
    /// Session file (env: HUB_SESSION_FILE)
    pub session_file: PathBuf,
    /// Default page size for paged lists (env: HUB_PAGE_SIZE)
    pub page_size: u32,
    /// Search debounce in milliseconds (env: HUB_SEARCH_DEBOUNCE_MS)
    pub search_debounce_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: PathBuf::from("./.hub/session.json"),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// Unset, empty or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_url: get("HUB_API_URL").unwrap_or(defaults.api_url),
            timeout_secs: get("HUB_API_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            session_file: get("HUB_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            page_size: get("HUB_PAGE_SIZE")
                .and_then(|v| v.trim().parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            search_debounce_ms: get("HUB_SEARCH_DEBOUNCE_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.search_debounce_ms),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url).with_timeout(self.timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

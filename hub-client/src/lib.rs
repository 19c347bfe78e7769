//! Hub Client - HTTP client for the distribution platform backend
//!
//! Provides network-based HTTP calls (reqwest) and an in-process client
//! driving an axum `Router` through tower `oneshot`, plus typed endpoint
//! adapters and the operator session context.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod oneshot;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use oneshot::OneshotHttpClient;
pub use session::{Session, SessionError, SessionHandle, SessionStore, UiPreferences};

// Re-export shared types for convenience
pub use shared::client::UserInfo;

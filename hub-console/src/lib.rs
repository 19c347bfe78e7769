//! Dealer Hub console
//!
//! View controllers over the backend API: fetch, reconcile, keep state,
//! raise alerts. The `hub-console` binary drives them from the command line.

pub mod alert;
pub mod config;
pub mod debounce;
pub mod form;
pub mod guard;
pub mod logger;
pub mod reconcile;
pub mod render;
pub mod views;

pub use alert::{Alert, AlertLevel, Alerts};
pub use config::ConsoleConfig;
pub use guard::{Policy, Route};
pub use views::{FetchOutcome, ViewState};

//! Shared types for the Dealer Hub console
//!
//! Wire models, pagination envelopes, response unwrapping and the unified
//! error code system used by `hub-client` and `hub-console`.

pub mod client;
pub mod error;
pub mod models;
pub mod page;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use page::{Page, PageRequest, RawPage, to_page};
pub use response::{EnvelopeError, unwrap_payload};
pub use types::{Identified, Permission};

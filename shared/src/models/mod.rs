//! Data models
//!
//! Wire types of the distribution backend. Field names are camelCase on
//! the wire; all ids are `i64`.

pub mod category;
pub mod dealer;
pub mod discount;
pub mod product;
pub mod role;

// Re-exports
pub use category::*;
pub use dealer::*;
pub use discount::*;
pub use product::*;
pub use role::*;

//! rusty-posts/crates/rp-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Posts.

pub mod assembly;
pub mod models;
pub mod traits;
pub mod error;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;

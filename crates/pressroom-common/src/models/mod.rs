//! Domain models exchanged with the publishing backend.
//!
//! The backend speaks MongoDB-style documents: ids live under `_id`, fields are
//! camelCase. Every model keeps the fields it does not name in a flattened
//! `extra` map so nothing is lost when a document is sent back.

pub mod column;
pub mod hash;
pub mod insight;
pub mod publisher;
pub mod share;
pub mod story;
pub mod tag;
pub mod user;

/// Re-export all model types for convenience.
pub use column::*;
pub use hash::*;
pub use insight::*;
pub use publisher::*;
pub use share::*;
pub use story::*;
pub use tag::*;
pub use user::*;

/// Fields a model does not name explicitly.
pub type Extra = serde_json::Map<String, serde_json::Value>;

//! Resource names and client-side validation failures.
//!
//! Both are raised before any request leaves the process, so they carry no
//! HTTP status.

use std::fmt;

/// Logical backend resource an operation reads or mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Admin,
    Column,
    Story,
    Tag,
    ContactCat,
    Publisher,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::Column => "Column",
            Self::Story => "Story",
            Self::Tag => "Tag",
            Self::ContactCat => "Contact category",
            Self::Publisher => "Publisher",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required argument was absent or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required.")]
    Missing { field: &'static str },

    #[error("Validation failed: {message}")]
    Invalid { message: String },
}

impl ValidationError {
    /// Name of the offending field, when the failure is about a single one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field } => Some(field),
            Self::Invalid { .. } => None,
        }
    }
}

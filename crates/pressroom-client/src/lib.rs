//! Pressroom REST client.
//!
//! One async method per backend operation, all sharing the same request
//! building, precondition, and error-mapping rules.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pressroom_client::{ApiClient, MemorySession};
//!
//! #[tokio::main]
//! async fn main() -> pressroom_client::Result<()> {
//!     let config = pressroom_common::config::AppConfig::local("https://api.example.com", "pid");
//!     let client = ApiClient::new(&config, Arc::new(MemorySession::new()))?;
//!
//!     let columns = client.get_publisher_columns().await?;
//!     println!("{} columns", columns.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod session;

mod columns;
mod hashes;
mod insights;
mod publishers;
mod shortener;
mod stories;
mod tags;
mod uploads;
mod users;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use session::{MemorySession, Session, SessionProvider};
pub use uploads::{CropRegion, UploadFile};

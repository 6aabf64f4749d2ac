//! # pressroom-common
//!
//! Shared models, configuration, resource names, and validation helpers used by
//! every Pressroom crate. No I/O lives here beyond loading configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

//! # pressroom-shell
//!
//! The attribution flow a Pressroom site runs on every navigation: mint a short
//! hash, register it against the story being read, and put it in the URL
//! fragment so a copied link carries it. A link opened fresh with a hash
//! already in its fragment is checked first (dark social traffic).
//!
//! [`FlowMachine`] decides what to do for each [`ShellEvent`];
//! [`AttributionFlow`] carries those decisions out against a [`HashService`]
//! and a [`Navigator`].

pub mod flow;
pub mod hash;
pub mod location;
pub mod machine;
pub mod navigator;
pub mod service;
pub mod sid;

pub use flow::{AttributionFlow, FlowOutcome, Registration};
pub use hash::{generate_hash, hash_at};
pub use location::{HistoryAction, Location};
pub use machine::{Effect, FlowMachine, FlowState, ShellEvent};
pub use navigator::{MemoryHistory, Navigator};
pub use service::HashService;
pub use sid::{ObjectIdSidResolver, SidResolver};

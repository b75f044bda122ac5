//! # policy-model
//!
//! In-memory authorization policy model shared by every storage backend in
//! the turnstile workspace.  This crate holds the rule container
//! ([`PolicyModel`]), the one-rule-per-line text grammar used by file-backed
//! stores, and the [`PolicyStore`] contract that backends implement,
//! together with a volatile [`MemoryStore`] reference backend.
//!
//! ## Quick start
//!
//! ```rust
//! use policy_model::{load_policy_line, PolicyModel};
//!
//! let mut model = PolicyModel::new();
//! load_policy_line("p, alice, data1, read", &mut model);
//! load_policy_line("g, alice, admin", &mut model);
//!
//! assert_eq!(model.rules("p", "p").len(), 1);
//! assert_eq!(model.rules("g", "g").len(), 1);
//! ```

mod grammar;
mod model;
mod store;

// Re-export primary public API at crate root.
pub use grammar::{join_rule, load_policy_line, parse_rule_line, section_of};
pub use model::{PolicyModel, Rule};
pub use store::{MemoryStore, PolicyStore, StoreError};

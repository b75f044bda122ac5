//! # file-store
//!
//! Flat-file policy storage backend for the turnstile workspace.  This crate
//! persists an in-memory [`policy_model::PolicyModel`] to a plain text file
//! (one rule per line, comma-separated fields) and loads it back, speaking
//! the [`policy_model::PolicyStore`] contract.  Only bulk load and save are
//! supported; the single-rule mutation operations always fail with
//! an unsupported-operation error.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use file_store::FileStore;
//! use policy_model::{PolicyModel, PolicyStore};
//!
//! let store = FileStore::new("policy.csv");
//!
//! let mut model = PolicyModel::new();
//! store.load_policy(&mut model).unwrap();
//!
//! for (ptype, rules) in model.section("p") {
//!     println!("{ptype}: {} rules", rules.len());
//! }
//! ```

mod store;

pub use store::FileStore;

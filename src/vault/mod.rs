//! Vault module — credential storage.
//!
//! This module provides:
//! - Owner identity resolution (`identity`)
//! - `CredentialRecord` and its input/view types (`credential`)
//! - Reversible at-rest encoding of secrets (`encoding`)
//! - SQLite schema and row-level access (`schema`, `records`)
//! - High-level `PasswordVault` used by CLI commands (`store`)

pub mod credential;
pub mod encoding;
pub mod identity;
pub mod records;
pub mod schema;
pub mod store;

// Re-export the most commonly used items.
pub use credential::{
    CredentialRecord, CredentialUpdate, CredentialView, ListQuery, NewCredential, SortOrder,
};
pub use identity::{current_user, Owner};
pub use store::PasswordVault;

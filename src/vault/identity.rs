//! Owner identity.
//!
//! Every credential and insight record belongs to exactly one owner. The
//! owner is resolved once per invocation and passed explicitly through
//! every vault call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the current user from the first identity source that is set.
///
/// Sources are checked in order; blank values are skipped. Returns
/// `Unauthenticated` when none yields an id.
pub fn current_user<'a, I>(sources: I) -> Result<Owner>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    sources
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| !id.is_empty())
        .map(Owner::new)
        .ok_or(PassVaultError::Unauthenticated)
}
